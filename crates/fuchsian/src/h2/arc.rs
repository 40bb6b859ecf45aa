//! Geodesic segments between two points of the disk.

use crate::cfg::NEAR_DIAMETRIC_EPS;
use crate::planar::{i, Circle};
use crate::Complex;

use super::geodesic::H2Geodesic;
use super::point::H2Point;
use super::tangent::H2TangentVector;

/// Oriented geodesic arc from `p1` to `p2`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct H2GeodesicArc {
    p1: H2Point,
    p2: H2Point,
}

impl H2GeodesicArc {
    #[inline]
    pub fn new(p1: H2Point, p2: H2Point) -> Self {
        Self { p1, p2 }
    }

    #[inline]
    pub fn endpoints(&self) -> (H2Point, H2Point) {
        (self.p1, self.p2)
    }

    #[inline]
    pub fn endpoints_in_disk_model(&self) -> (Complex, Complex) {
        (self.p1.disk(), self.p2.disk())
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.p1.distance(&self.p2)
    }

    #[inline]
    pub fn midpoint(&self) -> H2Point {
        self.p1.midpoint(&self.p2)
    }

    /// Straight in the disk model iff the arc lies on a diameter (exact test).
    #[inline]
    pub fn is_line_segment_in_disk_model(&self) -> bool {
        (self.p2.disk() * self.p1.disk().conj()).im == 0.0
    }

    fn circle_center(&self) -> Complex {
        let (z1, z2) = self.endpoints_in_disk_model();
        (z2 * (1.0 + z1.norm_sqr()) - z1 * (1.0 + z2.norm_sqr()))
            / (2.0 * i() * (z1.conj() * z2).im)
    }

    fn circle_radius(&self) -> f64 {
        let (z1, z2) = self.endpoints_in_disk_model();
        let w = z2.conj() * z1;
        ((z2 - z1) * (1.0 - w)).norm() / (2.0 * w.im.abs())
    }

    /// Circle orthogonal to the boundary carrying the arc; `None` on a diameter.
    pub fn circle_in_disk_model(&self) -> Option<Circle> {
        if self.is_line_segment_in_disk_model() {
            return None;
        }
        Some(Circle::new(self.circle_center(), self.circle_radius()))
    }

    pub fn circle_and_angles(&self) -> Option<(Circle, f64, f64)> {
        let c = self.circle_in_disk_model()?;
        let (z1, z2) = self.endpoints_in_disk_model();
        Some((c, c.angle_of(z1), c.angle_of(z2)))
    }

    /// Complete geodesic carrying the arc, oriented like the arc.
    ///
    /// Nearly diametric arcs use the straight-line endpoints; the test is
    /// relative to the chord, so short arcs off a diameter keep their circle.
    /// Degenerate for `p1 == p2`.
    pub fn geodesic(&self) -> H2Geodesic {
        let (z1, z2) = self.endpoints_in_disk_model();
        let d = z2 - z1;
        if (z1.conj() * z2).im.abs() < NEAR_DIAMETRIC_EPS * d.norm() {
            let u = d / d.norm();
            return H2Geodesic::from_endpoints_unchecked(-u, u);
        }
        let c = self.circle_center();
        let r = self.circle_radius();
        let e1 = Complex::new(1.0, -r) / c.conj();
        let e2 = Complex::new(1.0, r) / c.conj();
        if (e1 - z1).norm_sqr() < (e2 - z1).norm_sqr() {
            H2Geodesic::from_endpoints_unchecked(e1, e2)
        } else {
            H2Geodesic::from_endpoints_unchecked(e2, e1)
        }
    }

    /// `n + 2` points at equal hyperbolic spacing, both endpoints included.
    pub fn even_subdivision(&self, n: usize) -> Vec<H2Point> {
        let v = H2TangentVector::from_points(&self.p1, &self.p2);
        let steps = (n + 1) as f64;
        let mut out = Vec::with_capacity(n + 2);
        out.push(self.p1);
        for k in 1..=n {
            out.push(v.exponentiate_at(k as f64 / steps));
        }
        out.push(self.p2);
        out
    }

    /// Bounding box `(x_min, x_max, y_min, y_max)` of the arc in hyperboloid projection.
    ///
    /// The arc is the trace of a plane section of the hyperboloid; interior
    /// extrema of `x` and `y` are found on the combination `l·A + m·B` of the
    /// endpoint vectors and kept only when they fall between the endpoints.
    pub fn extremal_coordinates_in_hyperboloid_projection(&self) -> (f64, f64, f64, f64) {
        let a = self.p1.hyperboloid_projection();
        let b = self.p2.hyperboloid_projection();
        let (a1, a2, b1, b2) = (a.re, a.im, b.re, b.im);
        let mut x_min = a1.min(b1);
        let mut x_max = a1.max(b1);
        let mut y_min = a2.min(b2);
        let mut y_max = a2.max(b2);
        if x_min == x_max || y_min == y_max {
            return (x_min, x_max, y_min, y_max);
        }

        let a_k = self.p1.klein();
        let b_k = self.p2.klein();
        let a3 = (1.0 + a1 * a1 + a2 * a2).sqrt();
        let b3 = (1.0 + b1 * b1 + b2 * b2).sqrt();
        let s = a1 * b1 + a2 * b2 - a3 * b3;

        // candidate extremum on the arc for ratio t = m/l, if it lies between the endpoints
        let candidate = |t: f64| -> Option<(f64, f64)> {
            let c = 1.0 / (1.0 + t * t - 2.0 * s * t);
            if c <= 0.0 {
                return None;
            }
            let l = c.sqrt();
            let m = t * l;
            let (x, y) = (l * a1 + m * b1, l * a2 + m * b2);
            let w = H2Point::from_hyperboloid_projection(Complex::new(x, y)).klein();
            if ((w - b_k).conj() * (w - a_k)).re < 0.0 {
                Some((x, y))
            } else {
                None
            }
        };

        if let Some((x, _)) = candidate((b1 + a1 * s) / (a1 + b1 * s)) {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
        }
        if let Some((_, y)) = candidate((b2 + a2 * s) / (a2 + b2 * s)) {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        (x_min, x_max, y_min, y_max)
    }
}

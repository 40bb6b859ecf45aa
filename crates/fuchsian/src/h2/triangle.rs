//! Geodesic triangles.

use std::f64::consts::PI;

use super::arc::H2GeodesicArc;
use super::point::H2Point;
use super::polygon::klein_orientation;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct H2Triangle {
    a: H2Point,
    b: H2Point,
    c: H2Point,
}

impl H2Triangle {
    #[inline]
    pub fn new(a: H2Point, b: H2Point, c: H2Point) -> Self {
        Self { a, b, c }
    }

    #[inline]
    pub fn points(&self) -> [H2Point; 3] {
        [self.a, self.b, self.c]
    }

    /// Sides `[bc, ac, ab]`, each opposite the vertex of the same index.
    pub fn sides(&self) -> [H2GeodesicArc; 3] {
        [
            H2GeodesicArc::new(self.b, self.c),
            H2GeodesicArc::new(self.a, self.c),
            H2GeodesicArc::new(self.a, self.b),
        ]
    }

    /// Lengths of the sides opposite `a`, `b`, `c`.
    pub fn side_lengths(&self) -> [f64; 3] {
        [
            self.b.distance(&self.c),
            self.a.distance(&self.c),
            self.a.distance(&self.b),
        ]
    }

    /// Unsigned interior angles at `a`, `b`, `c`, whatever the orientation.
    pub fn angles(&self) -> [f64; 3] {
        let z = [self.a.disk(), self.b.disk(), self.c.disk()];
        let angle_at = |k: usize| {
            let (p, q, r) = (z[k], z[(k + 1) % 3], z[(k + 2) % 3]);
            let u = (r - p) / (1.0 - p.conj() * r);
            let v = (q - p) / (1.0 - p.conj() * q);
            (v * u.conj()).arg().abs()
        };
        [angle_at(0), angle_at(1), angle_at(2)]
    }

    /// Area `π − (α + β + γ)`.
    pub fn area(&self) -> f64 {
        PI - self.angles().iter().sum::<f64>()
    }

    /// Closed containment, decided on the straight triangle of the Klein model.
    pub fn contains(&self, p: &H2Point) -> bool {
        let (a, b, c, k) = (self.a.klein(), self.b.klein(), self.c.klein(), p.klein());
        let s1 = klein_orientation(a, b, k);
        let s2 = klein_orientation(b, c, k);
        let s3 = klein_orientation(c, a, k);
        let has_neg = s1 < 0.0 || s2 < 0.0 || s3 < 0.0;
        let has_pos = s1 > 0.0 || s2 > 0.0 || s3 > 0.0;
        !(has_neg && has_pos)
    }

    /// Midpoint subdivision `[a-corner, b-corner, c-corner, middle]`.
    pub fn subdivide(&self) -> [H2Triangle; 4] {
        let mid_a = self.b.midpoint(&self.c);
        let mid_b = self.a.midpoint(&self.c);
        let mid_c = self.a.midpoint(&self.b);
        [
            H2Triangle::new(self.a, mid_b, mid_c),
            H2Triangle::new(self.b, mid_a, mid_c),
            H2Triangle::new(self.c, mid_a, mid_b),
            H2Triangle::new(mid_a, mid_b, mid_c),
        ]
    }
}

//! Complete geodesics of the disk, given by their two ideal endpoints.

use std::fmt;

use crate::error::{GeometryError, Result};
use crate::planar::{intersect_circle_and_line, intersect_circles, re, Circle, PlanarLine};
use crate::Complex;

use super::arc::H2GeodesicArc;
use super::point::H2Point;

/// Oriented geodesic from `z1` to `z2`, both on the unit circle.
///
/// In the disk model it is either a diameter (straight line) or an arc of a
/// circle orthogonal to the boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct H2Geodesic {
    z1: Complex,
    z2: Complex,
}

impl H2Geodesic {
    /// Fails when both endpoints coincide.
    pub fn new(z1: Complex, z2: Complex) -> Result<Self> {
        if z1 == z2 {
            return Err(GeometryError::InvalidGeometry(format!(
                "no geodesic between the endpoint {} and itself",
                z1
            )));
        }
        Ok(Self { z1, z2 })
    }

    /// For endpoints that are distinct by construction (fixed points, images).
    #[inline]
    pub(crate) fn from_endpoints_unchecked(z1: Complex, z2: Complex) -> Self {
        Self { z1, z2 }
    }

    /// The geodesic through two points, oriented from `p1` to `p2`.
    pub fn through_points(p1: &H2Point, p2: &H2Point) -> Result<Self> {
        if p1 == p2 {
            return Err(GeometryError::InvalidGeometry(
                "a geodesic needs two distinct points".into(),
            ));
        }
        Ok(H2GeodesicArc::new(*p1, *p2).geodesic())
    }

    #[inline]
    pub fn endpoints(&self) -> (Complex, Complex) {
        (self.z1, self.z2)
    }

    pub fn swap_orientation(&self) -> Self {
        Self {
            z1: self.z2,
            z2: self.z1,
        }
    }

    #[inline]
    pub fn is_circle_in_disk_model(&self) -> bool {
        (self.z1 / self.z2).im.abs() > 0.0
    }

    pub fn circle_in_disk_model(&self) -> Option<Circle> {
        if !self.is_circle_in_disk_model() {
            return None;
        }
        let center = 2.0 * (self.z1 * self.z2) / (self.z1 + self.z2);
        let radius = (self.z1 - self.z2).norm() / (self.z1 + self.z2).norm();
        Some(Circle::new(center, radius))
    }

    pub fn line_in_disk_model(&self) -> Option<PlanarLine> {
        if self.is_circle_in_disk_model() {
            None
        } else {
            Some(PlanarLine::new(self.z1, self.z2))
        }
    }

    /// Supporting circle with the angles of `z1` and `z2` seen from its center.
    pub fn circle_and_angles(&self) -> Option<(Circle, f64, f64)> {
        let c = self.circle_in_disk_model()?;
        Some((c, c.angle_of(self.z1), c.angle_of(self.z2)))
    }

    pub fn contains(&self, p: &H2Point) -> bool {
        match self.circle_in_disk_model() {
            Some(c) => c.contains(p.disk()),
            None => PlanarLine::new(self.z1, self.z2).contains(p.disk()),
        }
    }

    /// Euclidean-closest point to the origin, which is also the hyperbolic one.
    pub fn closest_point_to_origin(&self) -> Complex {
        if self.z1 == -self.z2 {
            return re(0.0);
        }
        (self.z1 * self.z2 / (self.z1 + self.z2)) * (2.0 - (self.z1 - self.z2).norm())
    }
}

impl fmt::Display for H2Geodesic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{z1={}, z2={}}}", self.z1, self.z2)
    }
}

/// Whether the geodesics cross in H², by the sign of the endpoint cross-ratio.
///
/// Geodesics sharing an endpoint do not cross.
pub fn do_intersect(l1: &H2Geodesic, l2: &H2Geodesic) -> bool {
    let (a1, a2) = l1.endpoints();
    let (b1, b2) = l2.endpoints();
    let cross_ratio = ((b2 - a1) / (b2 - a2)) * ((b1 - a2) / (b1 - a1));
    cross_ratio.re < 0.0
}

/// Crossing point of two geodesics.
///
/// Two diameters always meet at the origin.
pub fn intersect(l1: &H2Geodesic, l2: &H2Geodesic) -> Option<H2Point> {
    if !do_intersect(l1, l2) {
        return None;
    }
    let pick = |(p1, p2): (Complex, Complex)| {
        H2Point::from_disk(if p1.norm() > p2.norm() { p2 } else { p1 })
    };
    match (l1.circle_in_disk_model(), l2.circle_in_disk_model()) {
        (Some(c1), Some(c2)) => intersect_circles(&c1, &c2).map(pick),
        (Some(c1), None) => {
            intersect_circle_and_line(&c1, &PlanarLine::new(l2.z1, l2.z2)).map(pick)
        }
        (None, Some(c2)) => {
            intersect_circle_and_line(&c2, &PlanarLine::new(l1.z1, l1.z2)).map(pick)
        }
        (None, None) => Some(H2Point::origin()),
    }
}

/// An ideal endpoint shared by both geodesics (exact comparison).
pub fn common_endpoint_in_disk_model(l1: &H2Geodesic, l2: &H2Geodesic) -> Option<Complex> {
    let (z1, z2) = l1.endpoints();
    let (w1, w2) = l2.endpoints();
    if z1 == w1 || z1 == w2 {
        Some(z1)
    } else if z2 == w1 || z2 == w2 {
        Some(z2)
    } else {
        None
    }
}

#[inline]
pub fn common_endpoint(l1: &H2Geodesic, l2: &H2Geodesic) -> bool {
    common_endpoint_in_disk_model(l1, l2).is_some()
}

/// The geodesic orthogonal to both, for ultraparallel geodesics.
///
/// Its endpoints are the roots of `z² − Sz + P` where the pair `(S, P)` is
/// the unique one whose roots are harmonic to both endpoint pairs.
pub fn common_perpendicular(l1: &H2Geodesic, l2: &H2Geodesic) -> Option<H2Geodesic> {
    if do_intersect(l1, l2) || common_endpoint(l1, l2) {
        return None;
    }
    let (a1, a2) = l1.endpoints();
    let (b1, b2) = l2.endpoints();
    let (s1, s2) = (a1 + a2, b1 + b2);
    let (p1, p2) = (a1 * a2, b1 * b2);
    if s1 == s2 {
        return None;
    }
    let s = 2.0 * (p1 - p2) / (s1 - s2);
    let p = (s1 * p2 - s2 * p1) / (s2 - s1);
    let delta = (s * s - 4.0 * p).sqrt();
    H2Geodesic::new((s - delta) / 2.0, (s + delta) / 2.0).ok()
}

/// Points of `l1` and `l2` realizing their distance.
///
/// Intersecting geodesics give the crossing point twice; asymptotic ones
/// (shared endpoint) have no closest points.
pub fn closest_points(l1: &H2Geodesic, l2: &H2Geodesic) -> Option<(H2Point, H2Point)> {
    if common_endpoint(l1, l2) {
        return None;
    }
    match common_perpendicular(l1, l2) {
        Some(perp) => Some((intersect(l1, &perp)?, intersect(l2, &perp)?)),
        None => intersect(l1, l2).map(|q| (q, q)),
    }
}

/// Point of `l1` closest to `l2`.
pub fn closest_point(l1: &H2Geodesic, l2: &H2Geodesic) -> Option<H2Point> {
    closest_points(l1, l2).map(|(p, _)| p)
}

/// `None` for asymptotic geodesics, `Some(0.0)` for crossing ones.
pub fn distance_geodesics(l1: &H2Geodesic, l2: &H2Geodesic) -> Option<f64> {
    if do_intersect(l1, l2) {
        return Some(0.0);
    }
    closest_points(l1, l2).map(|(p, q)| p.distance(&q))
}

use crate::cfg::PLANAR_EPS;
use crate::Complex;

use super::line::PlanarLine;

/// Euclidean circle `|z − center| = radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Complex,
    pub radius: f64,
}

impl Circle {
    #[inline]
    pub fn new(center: Complex, radius: f64) -> Self {
        Self { center, radius }
    }

    /// On the circle, up to `PLANAR_EPS` relative to the radius.
    #[inline]
    pub fn contains(&self, z: Complex) -> bool {
        ((z - self.center).norm() - self.radius).abs() <= PLANAR_EPS * self.radius.max(1.0)
    }

    /// Argument of `z` seen from the center.
    #[inline]
    pub fn angle_of(&self, z: Complex) -> f64 {
        (z - self.center).arg()
    }

    #[inline]
    pub fn point_at(&self, angle: f64) -> Complex {
        self.center + Complex::from_polar(self.radius, angle)
    }
}

/// Both intersection points of two circles, or `None` if they miss each other.
///
/// Tangent circles return the tangency point twice.
pub fn intersect_circles(c1: &Circle, c2: &Circle) -> Option<(Complex, Complex)> {
    let d = c2.center - c1.center;
    let dist = d.norm();
    if dist == 0.0 {
        return None;
    }
    if dist > c1.radius + c2.radius || dist < (c1.radius - c2.radius).abs() {
        return None;
    }
    // distance from c1.center to the radical line along d
    let along = (c1.radius * c1.radius - c2.radius * c2.radius + dist * dist) / (2.0 * dist);
    let h = (c1.radius * c1.radius - along * along).max(0.0).sqrt();
    let unit = d / dist;
    let foot = c1.center + unit * along;
    let normal = Complex::new(-unit.im, unit.re);
    Some((foot + normal * h, foot - normal * h))
}

/// Both intersection points of a circle and a line, or `None`.
pub fn intersect_circle_and_line(c: &Circle, l: &PlanarLine) -> Option<(Complex, Complex)> {
    let dir = l.direction();
    let len = dir.norm();
    if len == 0.0 {
        return None;
    }
    let unit = dir / len;
    // project the center onto the line
    let t = ((c.center - l.p1) * unit.conj()).re;
    let foot = l.p1 + unit * t;
    let d2 = (c.center - foot).norm_sqr();
    let r2 = c.radius * c.radius;
    if d2 > r2 {
        return None;
    }
    let h = (r2 - d2).sqrt();
    Some((foot + unit * h, foot - unit * h))
}

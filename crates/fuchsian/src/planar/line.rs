use crate::cfg::PLANAR_EPS;
use crate::Complex;

/// Euclidean line through two distinct points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanarLine {
    pub p1: Complex,
    pub p2: Complex,
}

impl PlanarLine {
    #[inline]
    pub fn new(p1: Complex, p2: Complex) -> Self {
        Self { p1, p2 }
    }

    #[inline]
    pub fn direction(&self) -> Complex {
        self.p2 - self.p1
    }

    /// On the line, up to `PLANAR_EPS` (distance scaled by the direction length).
    pub fn contains(&self, z: Complex) -> bool {
        let dir = self.direction();
        let len = dir.norm();
        if len == 0.0 {
            return z == self.p1;
        }
        let cross = ((z - self.p1) * dir.conj()).im;
        (cross / len).abs() <= PLANAR_EPS
    }
}

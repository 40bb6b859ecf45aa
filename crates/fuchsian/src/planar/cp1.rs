use std::fmt;

use crate::Complex;

/// Point `[z1 : z2]` of the complex projective line.
///
/// `z2 == 0` is the point at infinity. Equality is projective and exact:
/// `z1·w2 − z2·w1 == 0`.
#[derive(Clone, Copy, Debug)]
pub struct CP1Point {
    pub z1: Complex,
    pub z2: Complex,
}

impl CP1Point {
    #[inline]
    pub fn new(z1: Complex, z2: Complex) -> Self {
        Self { z1, z2 }
    }

    /// Affine point `[z : 1]`.
    #[inline]
    pub fn from_complex(z: Complex) -> Self {
        Self {
            z1: z,
            z2: Complex::new(1.0, 0.0),
        }
    }

    #[inline]
    pub fn infinity() -> Self {
        Self {
            z1: Complex::new(1.0, 0.0),
            z2: Complex::new(0.0, 0.0),
        }
    }

    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.z2 == Complex::new(0.0, 0.0)
    }

    /// Affine coordinate `z1/z2`; `None` at infinity.
    #[inline]
    pub fn complex_coordinate(&self) -> Option<Complex> {
        if self.is_infinity() {
            None
        } else {
            Some(self.z1 / self.z2)
        }
    }
}

impl PartialEq for CP1Point {
    fn eq(&self, other: &Self) -> bool {
        self.z1 * other.z2 - self.z2 * other.z1 == Complex::new(0.0, 0.0)
    }
}

impl fmt::Display for CP1Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.complex_coordinate() {
            None => write!(f, "infinity"),
            Some(z) => write!(f, "{}", z),
        }
    }
}

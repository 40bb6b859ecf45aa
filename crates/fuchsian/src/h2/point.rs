//! Points of the hyperbolic plane and the four coordinate models.

use std::fmt;

use nalgebra::Vector3;

use crate::error::{GeometryError, Result};
use crate::planar::i;
use crate::Complex;

use super::isometry::H2Isometry;

/// Point of H², stored by its Poincaré disk coordinate (`|z| < 1`).
///
/// Invariant (not enforced): the disk coordinate lies in the open unit disk.
/// Equality is equality of disk coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct H2Point {
    z: Complex,
}

impl H2Point {
    #[inline]
    pub fn from_disk(z: Complex) -> Self {
        Self { z }
    }

    #[inline]
    pub fn origin() -> Self {
        Self::default()
    }

    /// From the upper half-plane model via the Cayley map `z ↦ i(z − i)/(z + i)`.
    #[inline]
    pub fn from_upper_half_plane(z: Complex) -> Self {
        Self {
            z: i() * (z - i()) / (z + i()),
        }
    }

    /// From the Klein (projective) model.
    #[inline]
    pub fn from_klein(k: Complex) -> Self {
        Self {
            z: k / (1.0 + (1.0 - k.norm_sqr()).sqrt()),
        }
    }

    /// From the horizontal projection `(x, y)` of the hyperboloid point `(x, y, √(1+x²+y²))`.
    #[inline]
    pub fn from_hyperboloid_projection(h: Complex) -> Self {
        Self {
            z: h / (1.0 + (1.0 + h.norm_sqr()).sqrt()),
        }
    }

    /// From a point of the upper sheet `z² − x² − y² = 1`; only `(x, y)` is read.
    #[inline]
    pub fn from_hyperboloid(v: Vector3<f64>) -> Self {
        Self::from_hyperboloid_projection(Complex::new(v.x, v.y))
    }

    #[inline]
    pub fn disk(&self) -> Complex {
        self.z
    }

    #[inline]
    pub fn upper_half_plane(&self) -> Complex {
        -i() * (self.z + i()) / (self.z - i())
    }

    #[inline]
    pub fn klein(&self) -> Complex {
        2.0 * self.z / (1.0 + self.z.norm_sqr())
    }

    #[inline]
    pub fn hyperboloid_projection(&self) -> Complex {
        2.0 * self.z / (1.0 - self.z.norm_sqr())
    }

    pub fn hyperboloid(&self) -> Vector3<f64> {
        let n = self.z.norm_sqr();
        let h = self.hyperboloid_projection();
        Vector3::new(h.re, h.im, (1.0 + n) / (1.0 - n))
    }

    /// Hyperbolic distance `2·artanh(|z − w| / |1 − w̄z|)`.
    pub fn distance(&self, other: &H2Point) -> f64 {
        let num = (self.z - other.z).norm();
        if num == 0.0 {
            return 0.0;
        }
        let den = (1.0 - other.z.conj() * self.z).norm();
        2.0 * (num / den).atanh()
    }

    /// Point halfway along the geodesic arc to `other`.
    pub fn midpoint(&self, other: &H2Point) -> H2Point {
        if self == other {
            return *self;
        }
        let f = H2Isometry::mapping_point_to_origin(self);
        let w = f.apply_disk(other.z);
        let d = self.distance(other);
        let m = Complex::from_polar((0.25 * d).tanh(), w.arg());
        f.inverse() * H2Point::from_disk(m)
    }

    /// Weighted barycenter computed on the hyperboloid.
    ///
    /// Fails if the weight count differs from the point count, or if the
    /// weighted sum is not timelike (e.g. all weights zero).
    pub fn centroid(points: &[H2Point], weights: &[f64]) -> Result<H2Point> {
        if points.len() != weights.len() {
            return Err(GeometryError::InvalidGeometry(format!(
                "centroid of {} points with {} weights",
                points.len(),
                weights.len()
            )));
        }
        let sum: Vector3<f64> = points
            .iter()
            .zip(weights)
            .map(|(p, w)| p.hyperboloid() * *w)
            .fold(Vector3::zeros(), |acc, v| acc + v);
        let q = sum.z * sum.z - sum.x * sum.x - sum.y * sum.y;
        if q.is_nan() || q <= 0.0 || sum.z <= 0.0 {
            return Err(GeometryError::InvalidGeometry(
                "weighted sum is not a positive timelike vector".into(),
            ));
        }
        Ok(H2Point::from_hyperboloid(sum / q.sqrt()))
    }
}

impl fmt::Display for H2Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.z)
    }
}

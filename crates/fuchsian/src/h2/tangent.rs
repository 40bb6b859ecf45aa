//! Tangent vectors of H² in the disk model.
//!
//! A tangent vector is a root point plus a Euclidean vector in the disk
//! chart; its hyperbolic length is `2|v|/(1 − |z|²)`. Exponentiation and
//! parallel transport both go through the isometry moving the root to the
//! origin, where geodesics are diameters.

use std::fmt;
use std::ops::Mul;

use crate::error::{GeometryError, Result};
use crate::planar::re;
use crate::Complex;

use super::isometry::H2Isometry;
use super::point::H2Point;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct H2TangentVector {
    root: H2Point,
    vector: Complex,
}

impl H2TangentVector {
    #[inline]
    pub fn new(root: H2Point, vector: Complex) -> Self {
        Self { root, vector }
    }

    /// Zero vector at `root`.
    #[inline]
    pub fn zero_at(root: H2Point) -> Self {
        Self {
            root,
            vector: re(0.0),
        }
    }

    /// Vector at `from` whose exponential is `to`.
    pub fn from_points(from: &H2Point, to: &H2Point) -> Self {
        if from == to {
            return Self::zero_at(*from);
        }
        let z = from.disk();
        let w = H2Isometry::mapping_point_to_origin(from).apply_disk(to.disk());
        let d = from.distance(to);
        Self {
            root: *from,
            vector: (w / w.norm()) * (0.5 * d * (1.0 - z.norm_sqr())),
        }
    }

    #[inline]
    pub fn root(&self) -> H2Point {
        self.root
    }

    #[inline]
    pub fn vector(&self) -> Complex {
        self.vector
    }

    #[inline]
    pub fn length(&self) -> f64 {
        2.0 * self.vector.norm() / (1.0 - self.root.disk().norm_sqr())
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        let l = self.length();
        l * l
    }

    #[inline]
    pub fn exponentiate(&self) -> H2Point {
        self.exponentiate_at(1.0)
    }

    /// Point reached at time `t` along the geodesic with initial velocity `self`.
    pub fn exponentiate_at(&self, t: f64) -> H2Point {
        if self.vector == re(0.0) {
            return self.root;
        }
        let s = t * self.length();
        let f = H2Isometry::mapping_point_to_origin(&self.root);
        let dir = f.derivative_disk(self.root.disk()) * self.vector;
        let w = (dir / dir.norm()) * (0.5 * s).tanh();
        f.inverse() * H2Point::from_disk(w)
    }

    /// Velocity at time `t` of the geodesic with initial velocity `self`.
    pub fn parallel_transport(&self, t: f64) -> H2TangentVector {
        if self.vector == re(0.0) {
            return *self;
        }
        let len = self.length();
        let f = H2Isometry::mapping_point_to_origin(&self.root);
        let dir = f.derivative_disk(self.root.disk()) * self.vector;
        let unit = dir / dir.norm();
        let q = unit * (0.5 * t * len).tanh();
        let at_origin = H2TangentVector::new(
            H2Point::from_disk(q),
            unit * (0.5 * len * (1.0 - q.norm_sqr())),
        );
        f.inverse() * at_origin
    }

    /// Riemannian inner product; both vectors must share their root.
    pub fn scal_prod(v1: &H2TangentVector, v2: &H2TangentVector) -> Result<f64> {
        if v1.root != v2.root {
            return Err(GeometryError::InvalidGeometry(format!(
                "inner product of vectors rooted at {} and {}",
                v1.root, v2.root
            )));
        }
        let n = 1.0 - v1.root.disk().norm_sqr();
        Ok(4.0 * (v1.vector * v2.vector.conj()).re / (n * n))
    }

    /// Sum of inner products over paired slices.
    pub fn scal_prod_all(v1: &[H2TangentVector], v2: &[H2TangentVector]) -> Result<f64> {
        if v1.len() != v2.len() {
            return Err(GeometryError::InvalidGeometry(format!(
                "inner product of {} and {} vectors",
                v1.len(),
                v2.len()
            )));
        }
        v1.iter()
            .zip(v2)
            .map(|(a, b)| Self::scal_prod(a, b))
            .sum()
    }

    /// Sum of two vectors at the same root.
    pub fn checked_add(&self, other: &H2TangentVector) -> Result<H2TangentVector> {
        if self.root != other.root {
            return Err(GeometryError::InvalidGeometry(
                "cannot add tangent vectors with different roots".into(),
            ));
        }
        Ok(Self::new(self.root, self.vector + other.vector))
    }

    pub fn exponentiate_all(t: f64, vs: &[H2TangentVector]) -> Vec<H2Point> {
        vs.iter().map(|v| v.exponentiate_at(t)).collect()
    }

    pub fn parallel_transport_all(t: f64, vs: &[H2TangentVector]) -> Vec<H2TangentVector> {
        vs.iter().map(|v| v.parallel_transport(t)).collect()
    }
}

impl Mul<H2TangentVector> for f64 {
    type Output = H2TangentVector;
    #[inline]
    fn mul(self, v: H2TangentVector) -> H2TangentVector {
        H2TangentVector::new(v.root, v.vector * self)
    }
}

impl fmt::Display for H2TangentVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{root = {}, vector = {}}}", self.root, self.vector)
    }
}

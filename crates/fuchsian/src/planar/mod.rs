//! Euclidean helpers in the complex plane.
//!
//! Purpose
//! - Give the disk-model code explicit circles, lines and projective points
//!   instead of raw pairs of numbers.
//! - `Circle` and `PlanarLine` carry the intersection formulas used by
//!   geodesic intersection; `CP1Point` represents isometry fixed points,
//!   including the point at infinity.
//!
//! Code cross-refs: `h2::geodesic::{H2Geodesic, intersect}`,
//! `h2::isometry::H2Isometry::fixed_points`.

mod circle;
mod cp1;
mod line;

pub use circle::{intersect_circle_and_line, intersect_circles, Circle};
pub use cp1::CP1Point;
pub use line::PlanarLine;

use crate::Complex;

/// The imaginary unit.
#[inline]
pub fn i() -> Complex {
    Complex::new(0.0, 1.0)
}

/// Complex number from a real part only.
#[inline]
pub fn re(x: f64) -> Complex {
    Complex::new(x, 0.0)
}

/// Angle reduced to `[0, 2π)`.
#[inline]
pub fn mod_2pi(theta: f64) -> f64 {
    theta.rem_euclid(std::f64::consts::TAU)
}

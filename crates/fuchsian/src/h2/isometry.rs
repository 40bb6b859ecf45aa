//! Orientation-preserving isometries of the Poincaré disk.
//!
//! Purpose
//! - `H2Isometry` is the Möbius map `z ↦ u(z − a)/(1 − āz)` with `|u| = 1`,
//!   kept as the pair `(u, a)`. Composition, inversion and the action on
//!   every geometric object use closed formulas in these two numbers.
//! - Classification follows trace² = `2(1 + Re u)/(1 − |a|²)` against 4, with
//!   an exact comparison for the parabolic case.
//! - The gluing conjugator realizes a Fenchel–Nielsen twist: it conjugates a
//!   boundary translation of one piece onto the inverse boundary translation
//!   of the other piece, shifted along the common axis.
//!
//! Conventions
//! - `f * g` is `f ∘ g`.
//! - `mapping_to_vertical_up(L)` sends `L.z1 ↦ −i` and `L.z2 ↦ i`.
//! - An axis is oriented from the repelling towards the attracting fixed point.
//!
//! Code cross-refs: `H2Geodesic`, `CP1Point`, `representation::IsomH2Representation`.

use std::fmt;
use std::ops::Mul;

use nalgebra::Matrix2;

use crate::cfg::{GLUING_TRACE_EPS, ISOMETRY_EQ_EPS};
use crate::error::{GeometryError, Result};
use crate::planar::{i, re, CP1Point};
use crate::Complex;

use super::arc::H2GeodesicArc;
use super::geodesic::H2Geodesic;
use super::point::H2Point;
use super::polygon::H2Polygon;
use super::tangent::H2TangentVector;
use super::triangle::H2Triangle;

/// Classification by trace² against 4; the identity (trace² = 4) reads as parabolic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IsometryKind {
    Elliptic,
    Parabolic,
    Hyperbolic,
}

/// Möbius isometry `z ↦ u(z − a)/(1 − āz)` of the disk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct H2Isometry {
    u: Complex,
    a: Complex,
}

impl Default for H2Isometry {
    fn default() -> Self {
        Self::identity()
    }
}

impl H2Isometry {
    #[inline]
    pub fn identity() -> Self {
        Self {
            u: re(1.0),
            a: re(0.0),
        }
    }

    /// Raw constructor; `|u| = 1` and `|a| < 1` are the caller's business.
    #[inline]
    pub fn from_disk_coordinates(u: Complex, a: Complex) -> Self {
        Self { u, a }
    }

    #[inline]
    pub fn disk_coordinates(&self) -> (Complex, Complex) {
        (self.u, self.a)
    }

    #[inline]
    pub fn apply_disk(&self, z: Complex) -> Complex {
        self.u * (z - self.a) / (1.0 - self.a.conj() * z)
    }

    /// Complex derivative of the Möbius map at `z`.
    #[inline]
    pub fn derivative_disk(&self, z: Complex) -> Complex {
        let den = 1.0 - self.a.conj() * z;
        self.u * (1.0 - self.a.norm_sqr()) / (den * den)
    }

    /// Apply to any object the isometry acts on (`f.act(p)` reads as `f·p`).
    #[inline]
    pub fn act<T>(&self, x: T) -> T
    where
        H2Isometry: Mul<T, Output = T>,
    {
        *self * x
    }

    /// Apply to a batch of copyable objects.
    pub fn act_all<T: Copy>(&self, xs: &[T]) -> Vec<T>
    where
        H2Isometry: Mul<T, Output = T>,
    {
        xs.iter().map(|x| *self * *x).collect()
    }

    /// `self ∘ other`.
    pub fn compose(&self, other: &H2Isometry) -> H2Isometry {
        let t = 1.0 + self.a * (other.u * other.a).conj();
        H2Isometry {
            u: self.u * other.u * t / t.conj(),
            a: (other.a + self.a * other.u.conj()) / t,
        }
    }

    #[inline]
    pub fn inverse(&self) -> H2Isometry {
        H2Isometry {
            u: self.u.conj(),
            a: -self.u * self.a,
        }
    }

    #[inline]
    pub fn trace_squared(&self) -> f64 {
        2.0 * (1.0 + self.u.re) / (1.0 - self.a.norm_sqr())
    }

    /// Exact comparison of trace² with 4; near-parabolic maps may flip kinds.
    pub fn kind(&self) -> IsometryKind {
        let t = self.trace_squared();
        if t < 4.0 {
            IsometryKind::Elliptic
        } else if t == 4.0 {
            IsometryKind::Parabolic
        } else {
            IsometryKind::Hyperbolic
        }
    }

    #[inline]
    pub fn is_elliptic(&self) -> bool {
        self.trace_squared() < 4.0
    }

    #[inline]
    pub fn is_parabolic(&self) -> bool {
        self.trace_squared() == 4.0
    }

    #[inline]
    pub fn is_hyperbolic(&self) -> bool {
        self.trace_squared() > 4.0
    }

    /// `acosh(trace²/2 − 1)`; NaN for elliptic maps.
    #[inline]
    pub fn translation_length(&self) -> f64 {
        (0.5 * self.trace_squared() - 1.0).acosh()
    }

    /// Squared distance of `(u, a)` to the identity `(1, 0)`.
    #[inline]
    pub fn error(&self) -> f64 {
        self.a.norm_sqr() + (self.u - 1.0).norm_sqr()
    }

    pub fn almost_equal(&self, other: &H2Isometry) -> bool {
        (self.u - other.u).norm_sqr() + (self.a - other.a).norm_sqr() < ISOMETRY_EQ_EPS
    }

    /// Both fixed points in CP¹ (disk coordinates); `(0, ∞)` when `a = 0`.
    pub fn fixed_points(&self) -> (CP1Point, CP1Point) {
        if self.a == re(0.0) {
            return (CP1Point::from_complex(re(0.0)), CP1Point::infinity());
        }
        let one = re(1.0);
        let d = ((self.u - one) * (self.u - one) + 4.0 * self.a.norm_sqr() * self.u).sqrt();
        let den = 2.0 * self.a.conj();
        (
            CP1Point::new(one - self.u + d, den),
            CP1Point::new(one - self.u - d, den),
        )
    }

    /// Invariant geodesic of a hyperbolic isometry, repelling → attracting.
    pub fn axis(&self) -> Option<H2Geodesic> {
        if !self.is_hyperbolic() {
            return None;
        }
        let (p1, p2) = self.fixed_points();
        let c1 = p1.complex_coordinate()?;
        let c2 = p2.complex_coordinate()?;
        let one = re(1.0);
        if (one - self.a.conj() * c2).norm_sqr() < (one - self.a.conj() * c1).norm_sqr() {
            Some(H2Geodesic::from_endpoints_unchecked(c2, c1))
        } else {
            Some(H2Geodesic::from_endpoints_unchecked(c1, c2))
        }
    }

    /// Matrix in SU(1,1) acting on the disk: `[[st, −ast], [−ā s/t, s/t]]`, `t² = u`.
    pub fn su11_matrix(&self) -> Matrix2<Complex> {
        let s = 1.0 / (1.0 - self.a.norm_sqr()).sqrt();
        let t = self.u.sqrt();
        Matrix2::new(
            t * s,
            -self.a * t * s,
            -self.a.conj() * s / t,
            s / t,
        )
    }

    /// Inverse of `su11_matrix` (any nonzero complex multiple works).
    pub fn from_su11(m: &Matrix2<Complex>) -> Self {
        Self {
            u: m[(0, 0)] / m[(1, 1)],
            a: -m[(0, 1)] / m[(0, 0)],
        }
    }

    /// Matrix in SL(2,ℝ) acting on the upper half-plane, conjugate to this map
    /// through the Cayley transform used by `H2Point::from_upper_half_plane`.
    pub fn sl2r_matrix(&self) -> Matrix2<f64> {
        let (cayley, cayley_inv) = cayley_matrices();
        let m = cayley_inv * self.su11_matrix() * cayley;
        // m is real up to a global phase
        let big = m
            .iter()
            .copied()
            .fold(re(0.0), |acc, z| if z.norm() > acc.norm() { z } else { acc });
        let phase = big.conj() / big.norm();
        let r = m.map(|z| (z * phase).re);
        let det = r.determinant();
        r / det.sqrt()
    }

    /// From a matrix of SL(2,ℝ) acting on the upper half-plane.
    pub fn from_sl2r(m: &Matrix2<f64>) -> Self {
        let (cayley, cayley_inv) = cayley_matrices();
        let mc = m.map(re);
        Self::from_su11(&(cayley * mc * cayley_inv))
    }

    /// Rotation `z ↦ e^{iθ} z` about the origin.
    #[inline]
    pub fn rotation(theta: f64) -> Self {
        Self {
            u: Complex::from_polar(1.0, theta),
            a: re(0.0),
        }
    }

    /// Rotation by π about `p`.
    pub fn half_turn(p: &H2Point) -> Self {
        let t = Self::mapping_point_to_origin(p);
        t.inverse() * Self::rotation(std::f64::consts::PI) * t
    }

    /// Translation along the imaginary axis (upwards for positive length).
    pub fn translation_length_normalized(length: f64) -> Self {
        let l = length.cosh();
        let mut a = -i() * ((l - 1.0) / (l + 1.0)).sqrt();
        if length < 0.0 {
            a = -a;
        }
        Self { u: re(1.0), a }
    }

    /// Translation along the imaginary axis sending `−it` to the origin.
    #[inline]
    pub fn vertical_translation(t: f64) -> Self {
        Self {
            u: re(1.0),
            a: -i() * t,
        }
    }

    /// Composition of two vertical translations (tanh addition formula).
    pub fn vertical_translation2(t1: f64, t2: f64) -> Self {
        Self::vertical_translation((t1 + t2) / (1.0 + t1 * t2))
    }

    /// Composition of three vertical translations.
    pub fn vertical_translation3(t1: f64, t2: f64, t3: f64) -> Self {
        let t = (t1 + t2 + t3 + t1 * t2 * t3) / (1.0 + t1 * t2 + t1 * t3 + t2 * t3);
        Self::vertical_translation(t)
    }

    /// Translation of signed `length` along `axis` (towards `axis.z2` when positive).
    pub fn from_translation_axis_and_length(axis: &H2Geodesic, length: f64) -> Self {
        let f = Self::mapping_to_vertical_up(axis);
        f.inverse() * Self::translation_length_normalized(length) * f
    }

    /// The map with `u = 1` sending `z_in` to `z_out`.
    pub fn mapping_point_in_disk_normalized(z_in: Complex, z_out: Complex) -> Self {
        let n1 = z_in.norm_sqr();
        let n2 = z_out.norm_sqr();
        Self {
            u: re(1.0),
            a: (z_in * (1.0 - n2) - z_out * (1.0 - n1)) / (1.0 - n1 * n2),
        }
    }

    #[inline]
    pub fn mapping_point_to_origin(p: &H2Point) -> Self {
        Self {
            u: re(1.0),
            a: p.disk(),
        }
    }

    /// Sends `l1` onto `l2`, endpoints in order.
    pub fn mapping_geodesic(l1: &H2Geodesic, l2: &H2Geodesic) -> Self {
        let f1 = Self::mapping_to_vertical_up(l1);
        let f2 = Self::mapping_to_vertical_up(l2);
        f2.inverse() * f1
    }

    /// Sends `l` onto the imaginary axis with `l.z1 ↦ −i`, `l.z2 ↦ i`.
    pub fn mapping_to_vertical_up(l: &H2Geodesic) -> Self {
        let (a1, a2) = l.endpoints();
        let a = l.closest_point_to_origin();
        Self {
            u: i() * ((a.conj() * (a1 + a2) - 2.0) / (a1 - a2)),
            a,
        }
    }

    /// Sends `l` onto the imaginary axis with `l.z1 ↦ i`, `l.z2 ↦ −i`.
    pub fn mapping_to_vertical_down(l: &H2Geodesic) -> Self {
        let (a1, a2) = l.endpoints();
        let a = l.closest_point_to_origin();
        Self {
            u: -i() * ((a.conj() * (a1 + a2) - 2.0) / (a1 - a2)),
            a,
        }
    }

    /// Vertical translation parameter centering `l` with respect to the imaginary axis.
    ///
    /// `None` when the discriminant is negative (`l` meets the imaginary axis).
    pub fn geodesic_normalizer(l: &H2Geodesic) -> Option<f64> {
        let (z1, z2) = l.endpoints();
        let b = -2.0 * (z1.im + z2.im) / (1.0 - z1 * z2).norm_sqr();
        let disc = b * b - 1.0;
        if disc < 0.0 {
            return None;
        }
        let delta = disc.sqrt();
        let t1 = -b - delta;
        let t2 = -b + delta;
        Some(if t1.abs() < t2.abs() { -t1 } else { -t2 })
    }

    /// Puts the axis of `f1` vertically (downwards) and centers the axis of `f1_left`.
    pub fn normalizing_pair_on_left_hand_side(f1: &H2Isometry, f1_left: &H2Isometry) -> Option<Self> {
        let l1 = f1.axis()?;
        let l1_left = f1_left.axis()?;
        let first = Self::mapping_to_vertical_down(&l1);
        let t = Self::geodesic_normalizer(&(first * l1_left))?;
        Some(Self::vertical_translation(t) * first)
    }

    /// Puts the axis of `f1` vertically (upwards) and centers the axis of `f1_left`.
    pub fn normalizing_pair_on_right_hand_side(f1: &H2Isometry, f1_left: &H2Isometry) -> Option<Self> {
        let l1 = f1.axis()?;
        let l1_left = f1_left.axis()?;
        let first = Self::mapping_to_vertical_up(&l1);
        let t = Self::geodesic_normalizer(&(first * l1_left))?;
        Some(Self::vertical_translation(t) * first)
    }

    /// Conjugator `C` gluing two boundary curves with a twist.
    ///
    /// `f1`, `f2` are the boundary translations being glued, `f1_left`,
    /// `f2_left` the neighboring boundary translations of each piece used to
    /// fix the base position on each axis; `twist_normalized` is a vertical
    /// translation parameter in `(−1, 1)`. The result satisfies
    /// `C·f2·C⁻¹ = f1⁻¹`.
    pub fn find_conjugator_for_gluing(
        f1: &H2Isometry,
        f1_left: &H2Isometry,
        f2: &H2Isometry,
        f2_left: &H2Isometry,
        twist_normalized: f64,
    ) -> Result<Self> {
        let (tr1, tr2) = (f1.trace_squared(), f2.trace_squared());
        if (tr1 - tr2).abs() > GLUING_TRACE_EPS {
            return Err(GeometryError::MismatchedTranslationLengths {
                first: tr1,
                second: tr2,
            });
        }
        let not_hyperbolic =
            || GeometryError::InvalidGeometry("gluing needs hyperbolic boundary isometries".into());
        let not_disjoint =
            || GeometryError::InvalidGeometry("neighboring axis meets the gluing axis".into());

        let c1 = Self::mapping_to_vertical_up(&f1.axis().ok_or_else(not_hyperbolic)?);
        let t1 = Self::geodesic_normalizer(&(c1 * f1_left.axis().ok_or_else(not_hyperbolic)?))
            .ok_or_else(not_disjoint)?;

        let c2 = Self::mapping_to_vertical_down(&f2.axis().ok_or_else(not_hyperbolic)?);
        let t2 = Self::geodesic_normalizer(&(c2 * f2_left.axis().ok_or_else(not_hyperbolic)?))
            .ok_or_else(not_disjoint)?;

        let c = Self::vertical_translation3(-t1, twist_normalized, t2);
        Ok(c1.inverse() * c * c2)
    }
}

fn cayley_matrices() -> (Matrix2<Complex>, Matrix2<Complex>) {
    // C(z) = i(z − i)/(z + i) and its inverse, both up to scale
    let cayley = Matrix2::new(i(), re(1.0), re(1.0), i());
    let cayley_inv = Matrix2::new(i(), re(-1.0), re(-1.0), i()) * re(-0.5);
    (cayley, cayley_inv)
}

impl Mul<H2Isometry> for H2Isometry {
    type Output = H2Isometry;
    #[inline]
    fn mul(self, rhs: H2Isometry) -> H2Isometry {
        self.compose(&rhs)
    }
}

impl Mul<H2Point> for H2Isometry {
    type Output = H2Point;
    #[inline]
    fn mul(self, p: H2Point) -> H2Point {
        H2Point::from_disk(self.apply_disk(p.disk()))
    }
}

impl Mul<H2Geodesic> for H2Isometry {
    type Output = H2Geodesic;
    fn mul(self, l: H2Geodesic) -> H2Geodesic {
        let (z1, z2) = l.endpoints();
        H2Geodesic::from_endpoints_unchecked(self.apply_disk(z1), self.apply_disk(z2))
    }
}

impl Mul<H2GeodesicArc> for H2Isometry {
    type Output = H2GeodesicArc;
    fn mul(self, arc: H2GeodesicArc) -> H2GeodesicArc {
        let (p1, p2) = arc.endpoints();
        H2GeodesicArc::new(self * p1, self * p2)
    }
}

impl Mul<H2Triangle> for H2Isometry {
    type Output = H2Triangle;
    fn mul(self, t: H2Triangle) -> H2Triangle {
        let [a, b, c] = t.points();
        H2Triangle::new(self * a, self * b, self * c)
    }
}

impl Mul<H2TangentVector> for H2Isometry {
    type Output = H2TangentVector;
    fn mul(self, v: H2TangentVector) -> H2TangentVector {
        let z = v.root().disk();
        H2TangentVector::new(self * v.root(), self.derivative_disk(z) * v.vector())
    }
}

impl Mul<&H2Polygon> for H2Isometry {
    type Output = H2Polygon;
    fn mul(self, poly: &H2Polygon) -> H2Polygon {
        H2Polygon::new(poly.vertices().iter().map(|p| self * *p).collect())
    }
}

impl Mul<H2Polygon> for H2Isometry {
    type Output = H2Polygon;
    fn mul(self, poly: H2Polygon) -> H2Polygon {
        self * &poly
    }
}

impl fmt::Display for H2Isometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            IsometryKind::Hyperbolic => {
                if let Some(axis) = self.axis() {
                    write!(
                        f,
                        "Hyperbolic, axis = {}, translation length = {}",
                        axis,
                        self.translation_length()
                    )?;
                }
            }
            IsometryKind::Parabolic => {
                let (z1, _) = self.fixed_points();
                write!(f, "Parabolic, fixed point = {}", z1)?;
            }
            IsometryKind::Elliptic => {
                let (z1, z2) = self.fixed_points();
                write!(f, "Elliptic, fixed points z1 = {} and z2 = {}", z1, z2)?;
            }
        }
        write!(f, "   {{u = {}, a = {}}}", self.u, self.a)
    }
}

//! Tolerance defaults (internal).
//!
//! Policy
//! - Fixed constants, no tolerance juggling at call sites. Exact comparisons
//!   (parabolic trace, shared ideal endpoints, CP¹ equality) stay exact.

/// `H2Isometry::almost_equal`: bound on |Δu|² + |Δa|².
pub(crate) const ISOMETRY_EQ_EPS: f64 = 1e-9;
/// Allowed trace² mismatch between two boundary curves glued together.
pub(crate) const GLUING_TRACE_EPS: f64 = 1e-8;
/// Membership slack for points on planar circles/lines.
pub(crate) const PLANAR_EPS: f64 = 1e-9;
/// Origin closer than this to the chord line through z1, z2
/// (|Im(z̄1·z2)| / |z2 − z1|): the arc is treated as a diameter.
pub(crate) const NEAR_DIAMETRIC_EPS: f64 = 1e-12;
/// Orientation/crossing slack for straight segments in the Klein model.
pub(crate) const KLEIN_EPS: f64 = 1e-12;
/// Circles whose radius exceeds this many pixels are drawn as segments.
pub(crate) const ALMOST_INFINITE_RADIUS_PIXELS: f64 = 1.0e5;
/// Arcs whose sagitta is below this many pixels are drawn as segments.
pub(crate) const ALMOST_STRAIGHT_PIXELS: f64 = 0.5;
/// Largest lattice `H2Mesh::new` accepts.
pub(crate) const MAX_MESH_POINTS: usize = 1 << 22;

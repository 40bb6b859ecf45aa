//! Hyperbolic plane in the Poincaré disk model.
//!
//! Purpose
//! - Value types for the objects the rest of the crate moves around: points,
//!   complete geodesics, arcs, triangles, polygons, tangent vectors.
//! - `H2Isometry` acts on all of them through `Mul` (`f * x` is `f·x`).
//!
//! Why this design
//! - Objects are stored in disk coordinates only; other models (upper
//!   half-plane, Klein, hyperboloid) are views computed on demand.
//! - Degenerate answers (parallel geodesics, no axis) are `Option`s; only
//!   constructions that cannot produce a value at all return `Result`.
//!
//! References
//! - A. F. Beardon, The Geometry of Discrete Groups, ch. 4 and 7.
//! - S. Katok, Fuchsian Groups, ch. 1–3.

mod arc;
mod geodesic;
mod isometry;
mod point;
mod polygon;
mod tangent;
mod triangle;

pub use arc::H2GeodesicArc;
pub use geodesic::{
    closest_point, closest_points, common_endpoint, common_endpoint_in_disk_model,
    common_perpendicular, distance_geodesics, do_intersect, intersect, H2Geodesic,
};
pub use isometry::{H2Isometry, IsometryKind};
pub use point::H2Point;
pub use polygon::H2Polygon;
pub(crate) use polygon::klein_orientation;
pub use tangent::H2TangentVector;
pub use triangle::H2Triangle;

#[cfg(test)]
mod tests;

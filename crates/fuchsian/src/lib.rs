//! Hyperbolic plane geometry for Fuchsian groups.
//!
//! Everything lives in the Poincaré disk model: points, geodesics, arcs,
//! triangles and polygons; Möbius isometries of the disk; surface-group
//! presentations; the lattice mesh of a fundamental polygon with its
//! side-pairing stitching; polygon triangulation; and the drawing buffers
//! handed to an external renderer.
//!
//! Layout
//! - `planar`: Euclidean helpers in the complex plane (circles, lines, CP¹).
//! - `h2`: hyperbolic objects and the isometry group.
//! - `group`: words and discrete-group presentations.
//! - `representation`: generator images and fundamental polygons.
//! - `mesh`, `triangulate`: discretization of a fundamental polygon.
//! - `buffer`: draw-ready primitive lists.

pub mod buffer;
mod cfg;
pub mod error;
pub mod group;
pub mod h2;
pub mod mesh;
pub mod planar;
pub mod representation;
pub mod sample;
pub mod triangulate;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{GeometryError, Result};

/// Complex numbers in double precision, as used throughout the crate.
pub type Complex = nalgebra::Complex<f64>;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::buffer::{
        make_delegate, CanvasDelegate, Color, DelegateKind, DrawCommand, H2Buffer, Viewport,
    };
    pub use crate::group::{DiscreteGroup, Letter, TopologicalSurface, Word};
    pub use crate::h2::{
        H2Geodesic, H2GeodesicArc, H2Isometry, H2Point, H2Polygon, H2TangentVector, H2Triangle,
        IsometryKind,
    };
    pub use crate::mesh::{H2Mesh, MeshCfg, MeshLink};
    pub use crate::planar::{Circle, PlanarLine, CP1Point};
    pub use crate::representation::IsomH2Representation;
    pub use crate::triangulate::H2PolygonTriangulater;
    pub use crate::{Complex, GeometryError, Result};
}

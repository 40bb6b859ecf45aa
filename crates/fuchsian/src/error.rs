//! Structural failures of geometric constructions and group presentations.
//!
//! Degenerate-but-recoverable outcomes (no intersection, no axis, ...) are
//! `Option`s at the call site and never go through this type.

use thiserror::Error;

/// Fatal construction error; the caller must not keep a partially built value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("different translation lengths for gluing (trace² {first} vs {second})")]
    MismatchedTranslationLengths { first: f64, second: f64 },

    #[error("invalid presentation: {0}")]
    InvalidPresentation(String),
}

pub type Result<T> = std::result::Result<T, GeometryError>;

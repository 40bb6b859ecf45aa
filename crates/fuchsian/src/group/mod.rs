//! Words and finitely presented groups of surfaces.
//!
//! Purpose
//! - `Word` is an element of the free group on indexed generators, kept as a
//!   plain letter list; products concatenate, `contract` freely reduces.
//! - `DiscreteGroup` holds a presentation `⟨ generators | relators ⟩` and the
//!   combinatorics of the standard fundamental polygon of a closed surface:
//!   the partial products of the relator read around one vertex, and the
//!   translates covering the neighborhoods of all vertices.
//!
//! Why this design
//! - Generators are referred to by index everywhere; names only appear when
//!   printing, so renaming or rotating generators never touches words.
//! - Presentation operations (amalgamation, HNN extension) build new groups
//!   and return `Result`, leaving their inputs untouched.
//!
//! References
//! - W. Magnus, A. Karrass, D. Solitar, Combinatorial Group Theory, ch. 1.
//! - Code cross-refs: `representation::IsomH2Representation::evaluate`.

mod discrete;
mod surface;
mod word;

pub use discrete::DiscreteGroup;
pub use surface::TopologicalSurface;
pub use word::{Letter, Word};

#[cfg(test)]
mod tests;

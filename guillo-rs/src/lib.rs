//! Guillotine cut-line consolidation for 2D rectangular cutting problems.
//!
//! Given rectangles packed into fixed-size containers by a [`PackingOracle`](oracle::PackingOracle),
//! this crate rearranges each layout into horizontal slabs that a panel saw can separate with
//! full-span cuts, redistributes the pieces that no longer fit, and derives the recursive
//! sequence of guillotine cuts that isolates every piece.

/// Cut-Line Consolidation Engine
pub mod consolidation;

/// Bin allocation and waste redistribution across containers
pub mod allocation;

/// Guillotine cut-tree generation for finalized layouts
pub mod cut_tree;

/// Entities to model guillotine cutting problems
pub mod entities;

/// Error taxonomy of the crate
pub mod error;

/// Geometric primitives
pub mod geometry;

/// Importing requests into and exporting results out of the library
pub mod io;

/// Packing oracles that assign initial positions to rectangles
pub mod oracle;

/// Helper functions which do not belong to any specific module
pub mod util;

#[doc(inline)]
pub use error::{CutError, Result};

mod candidate;
mod engine;

#[doc(inline)]
pub use candidate::ConflictCandidate;
#[doc(inline)]
pub use engine::CutLineEngine;

use crate::Result;
use crate::entities::{Piece, Rectangle};
use crate::oracle::PackingOracle;
use crate::util::CutConfig;

/// Outcome of consolidating the layout of a single container.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Consolidation {
    /// Final layout, guillotine-cuttable along every position in `cut_log`
    pub rectangles: Vec<Rectangle>,
    /// Pieces that no longer fit in the container
    pub waste: Vec<Piece>,
    /// Committed horizontal cut positions, strictly increasing
    pub cut_log: Vec<u32>,
}

/// Consolidates `rectangles` inside a `width × height` container, using the default
/// configuration apart from `max_gap`.
/// See [`CutLineEngine::consolidate`].
pub fn consolidate(
    rectangles: Vec<Rectangle>,
    width: u32,
    height: u32,
    max_gap: u32,
    oracle: &dyn PackingOracle,
) -> Result<Consolidation> {
    let config = CutConfig {
        max_gap,
        ..CutConfig::default()
    };
    CutLineEngine::new(oracle, config).consolidate(rectangles, width, height)
}

mod allocator;

#[doc(inline)]
pub use allocator::Allocator;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::entities::{Container, Piece};
use crate::oracle::PackingOracle;
use crate::util::CutConfig;

/// Why a piece ended up in the unplaced report
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnplacedReason {
    /// Does not fit an empty container in any allowed orientation
    Infeasible,
    /// The oracle could not seed a fresh container with it
    NoFit,
    /// Still pending when the time limit expired
    Deadline,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unplaced {
    pub piece: Piece,
    pub reason: UnplacedReason,
}

/// Final state of an allocation run: every input piece is either in one of the containers or unplaced.
#[derive(Clone, Debug, Default)]
pub struct Allocation {
    pub containers: Vec<Container>,
    pub unplaced: Vec<Unplaced>,
}

impl Allocation {
    pub fn n_placed(&self) -> usize {
        self.containers.iter().map(|c| c.rectangles.len()).sum()
    }

    pub fn placed_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.containers.iter().flat_map(|c| c.ids())
    }

    pub fn unplaced_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.unplaced.iter().map(|u| u.piece.id)
    }

    /// Fraction of the total container area covered by pieces
    pub fn density(&self) -> f32 {
        let total_area = self.containers.iter().map(|c| c.area()).sum::<u64>();
        let placed_area = self.containers.iter().map(|c| c.placed_area()).sum::<u64>();
        match total_area {
            0 => 0.0,
            _ => placed_area as f32 / total_area as f32,
        }
    }
}

/// Allocates `pieces` over as many `width × height` containers as needed, with the default
/// configuration apart from `max_bins_hint`.
/// See [`Allocator::allocate`].
pub fn allocate(
    pieces: Vec<Piece>,
    width: u32,
    height: u32,
    oracle: &dyn PackingOracle,
    max_bins_hint: usize,
) -> Result<Allocation> {
    let config = CutConfig {
        max_bins_hint,
        ..CutConfig::default()
    };
    Allocator::new(oracle, config).allocate(pieces, width, height)
}

mod maxrects;

#[doc(inline)]
pub use maxrects::MaxRectsOracle;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::entities::{Piece, Rectangle};

/// A piece submitted to a [`PackingOracle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleItem {
    pub id: u64,
    pub w: u32,
    pub h: u32,
    /// Whether the oracle may turn the piece by 90°
    pub rotatable: bool,
}

impl OracleItem {
    pub fn from_piece(piece: &Piece, rotatable: bool) -> Self {
        Self {
            id: piece.id,
            w: piece.w,
            h: piece.h,
            rotatable,
        }
    }
}

/// Size of a bin offered to a [`PackingOracle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinSize {
    pub w: u32,
    pub h: u32,
}

/// Position assigned to an [`OracleItem`] by a [`PackingOracle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OraclePlacement {
    pub id: u64,
    /// Index into the bins passed to [`PackingOracle::place`]
    pub bin_index: usize,
    pub x: u32,
    pub y: u32,
    /// Placed width, swapped with the submitted height if `rotated`
    pub w: u32,
    pub h: u32,
    /// Whether the item was turned with respect to how it was submitted
    pub rotated: bool,
}

impl OraclePlacement {
    /// Applies the placement to the piece it was computed for.
    /// The piece's orientation flag is toggled when the oracle rotated it.
    pub fn apply(&self, piece: Piece) -> Rectangle {
        debug_assert_eq!(self.id, piece.id);
        let piece = match self.rotated {
            true => piece.rotate(),
            false => piece,
        };
        debug_assert_eq!((piece.w, piece.h), (self.w, self.h));
        piece.place_at(self.x, self.y)
    }
}

/// Outcome of a single [`PackingOracle::place`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Packing {
    pub placements: Vec<OraclePlacement>,
    /// Ids of the items that fit in none of the bins
    pub unplaced: Vec<u64>,
}

impl Packing {
    /// Placements assigned to the bin at `bin_index`
    pub fn in_bin(&self, bin_index: usize) -> impl Iterator<Item = &OraclePlacement> {
        self.placements
            .iter()
            .filter(move |p| p.bin_index == bin_index)
    }

    /// One past the highest bin index that received an item, 0 if nothing was placed
    pub fn n_bins_used(&self) -> usize {
        self.placements
            .iter()
            .map(|p| p.bin_index + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Places rectangles into fixed-size bins.
///
/// Treated as a synchronous, possibly expensive, pure function:
/// identical inputs must produce identical outputs.
/// Every submitted item appears exactly once, either in `placements` or in `unplaced`.
pub trait PackingOracle: Send + Sync {
    fn place(&self, items: &[OracleItem], bins: &[BinSize]) -> Result<Packing>;
}

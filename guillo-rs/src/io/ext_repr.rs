use serde::{Deserialize, Serialize};

use crate::allocation::UnplacedReason;
use crate::entities::Cut;

/// External representation of a cutting request: a list of rectangles to cut out of identical bins.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtRequest {
    /// Width of every bin
    pub bin_width: i64,
    /// Height of every bin
    pub bin_height: i64,
    /// The rectangles to produce
    pub rectangles: Vec<ExtRectangle>,
}

/// External representation of a requested [`Piece`](crate::entities::Piece).
/// Dimensions are signed so non-positive values can be rejected with a proper message.
#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct ExtRectangle {
    /// Unique identifier of the rectangle.
    /// Must be a non-negative JSON integer, string identifiers are rejected by the parser.
    pub id: u64,
    pub w: i64,
    pub h: i64,
}

/// External representation of a placed [`Rectangle`](crate::entities::Rectangle).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtPlacedRectangle {
    pub id: u64,
    pub x: u32,
    pub y: u32,
    /// Width as placed, swapped with respect to the request if `rotated`
    pub w: u32,
    pub h: u32,
    pub rotated: bool,
}

/// External representation of a [`Container`](crate::entities::Container).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtBin {
    pub bin_index: usize,
    /// Layout of the container's first packing, before consolidation
    pub original: Vec<ExtPlacedRectangle>,
    /// Layout after cut-line consolidation
    pub optimized: Vec<ExtPlacedRectangle>,
    /// Whether the last packing attempt on this bin rejected rectangles
    pub has_waste: bool,
    /// Committed horizontal cut heights, in commit order
    pub cut_log: Vec<u32>,
    /// Guillotine cuts isolating every rectangle of the optimized layout, in execution order
    pub cuts: Vec<Cut>,
    pub density: f32,
}

/// A rectangle which did not end up in any bin
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtUnplaced {
    pub id: u64,
    pub w: u32,
    pub h: u32,
    pub reason: UnplacedReason,
}

/// External representation of the outcome of a request.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtResponse {
    pub bins: Vec<ExtBin>,
    pub unplaced: Vec<ExtUnplaced>,
    pub unplaced_count: usize,
    /// Fraction of the total bin area covered by rectangles
    pub density: f32,
}

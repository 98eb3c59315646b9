use serde::{Deserialize, Serialize};

/// Configuration of the consolidation engine and the allocation loop
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct CutConfig {
    /// Maximum vertical distance between two consecutive committed cuts
    pub max_gap: u32,
    /// Number of containers offered to the oracle in the initial placement call
    pub max_bins_hint: usize,
    /// Whether pieces may be turned by 90° when (re)packed
    pub allow_rotation: bool,
    /// Configuration of the packing oracle
    #[serde(default)]
    pub oracle: OracleConfig,
    /// Consolidation strategy used by the engine
    #[serde(default)]
    pub strategy: ConsolidationStrategy,
    /// Maximum number of waste redistribution rounds.
    /// If undefined, it is derived from the number of initial containers and pieces
    #[serde(default)]
    pub max_rounds: Option<usize>,
    /// Time budget for the whole allocation in milliseconds. If undefined, runs to completion
    #[serde(default)]
    pub time_limit_ms: Option<u64>,
}

impl Default for CutConfig {
    fn default() -> Self {
        Self {
            max_gap: 250,
            max_bins_hint: 100,
            allow_rotation: true,
            oracle: OracleConfig::default(),
            strategy: ConsolidationStrategy::default(),
            max_rounds: None,
            time_limit_ms: None,
        }
    }
}

///Configuration of the [`MaxRectsOracle`](crate::oracle::MaxRectsOracle)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct OracleConfig {
    ///How a bin is chosen when several could host a piece
    pub bin_selection: BinSelection,
    ///Scoring rule for a position inside a bin
    pub heuristic: MaxRectsHeuristic,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BinSelection {
    /// First bin (in the order given) with any feasible position
    #[default]
    FirstFit,
    /// The first bin whenever it has a feasible position, otherwise the overflow bin with the
    /// best scoring position (earlier bins win ties)
    BestFit,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MaxRectsHeuristic {
    /// Minimize the shorter leftover side of the free rectangle
    #[default]
    BestShortSideFit,
    /// Minimize the longer leftover side of the free rectangle
    BestLongSideFit,
    /// Minimize the leftover area of the free rectangle
    BestAreaFit,
    /// Lowest resulting bottom edge, then leftmost
    BottomLeft,
}

/// Strategy of the Cut-Line Consolidation Engine
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ConsolidationStrategy {
    /// Greedy minimal-displacement cut selection, material above a new cut is left untouched
    #[default]
    Greedy,
    /// Greedy cut selection, additionally repacking the slab between the previous cut and the new one.
    /// The original slab is kept whenever the oracle cannot fit all of its pieces back in.
    GreedyRepackAbove,
}

use serde::{Deserialize, Serialize};

/// Orientation of a full-span cut.
/// Variants are ordered: horizontal cuts win ties against vertical ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Cut along the x-axis, at a fixed y
    Horizontal,
    /// Cut along the y-axis, at a fixed x
    Vertical,
}

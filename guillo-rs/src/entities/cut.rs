use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::geometry::Orientation;

/// A single full-span guillotine cut through the region it is applied to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cut {
    pub orientation: Orientation,
    /// y-coordinate for horizontal cuts, x-coordinate for vertical cuts
    pub position: u32,
}

impl Cut {
    pub fn horizontal(position: u32) -> Self {
        Cut {
            orientation: Orientation::Horizontal,
            position,
        }
    }

    pub fn vertical(position: u32) -> Self {
        Cut {
            orientation: Orientation::Vertical,
            position,
        }
    }
}

impl Display for Cut {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.orientation {
            Orientation::Horizontal => write!(f, "H@{}", self.position),
            Orientation::Vertical => write!(f, "V@{}", self.position),
        }
    }
}

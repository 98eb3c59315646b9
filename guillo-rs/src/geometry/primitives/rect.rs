use serde::{Deserialize, Serialize};

///Axis-aligned rectangle on the integer grid, half-open: `[x_min, x_max) × [y_min, y_max)`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x_min: u32,
    pub y_min: u32,
    pub x_max: u32,
    pub y_max: u32,
}

impl Rect {
    /// Rectangle with its minimum corner at `(x, y)` and the given size.
    /// Degenerate (zero-sized) rectangles are allowed here, they never overlap anything.
    pub fn from_origin_size(x: u32, y: u32, w: u32, h: u32) -> Self {
        Rect {
            x_min: x,
            y_min: y,
            x_max: x + w,
            y_max: y + h,
        }
    }

    pub fn width(&self) -> u32 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> u32 {
        self.y_max - self.y_min
    }

    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.x_min >= self.x_max || self.y_min >= self.y_max
    }

    /// True if the interiors of both rectangles share a non-zero area.
    /// Touching edges do not count as overlap.
    #[inline(always)]
    pub fn overlaps(&self, other: &Rect) -> bool {
        u32::max(self.x_min, other.x_min) < u32::min(self.x_max, other.x_max)
            && u32::max(self.y_min, other.y_min) < u32::min(self.y_max, other.y_max)
    }

    /// True if `other` lies completely inside `self` (edges may coincide).
    #[inline(always)]
    pub fn contains(&self, other: &Rect) -> bool {
        self.x_min <= other.x_min
            && self.y_min <= other.y_min
            && self.x_max >= other.x_max
            && self.y_max >= other.y_max
    }

    /// Whether a rectangle of `w × h` fits inside `self` without rotation.
    pub fn fits(&self, w: u32, h: u32) -> bool {
        w <= self.width() && h <= self.height()
    }

    /// Returns the maximal rectangles of `self` which do not overlap `cut_out`.
    /// At most four are returned (left, right, top, bottom strips). They may overlap each other.
    pub fn maximal_remainders(&self, cut_out: &Rect) -> Vec<Rect> {
        if !self.overlaps(cut_out) {
            return vec![*self];
        }
        let candidates = [
            Rect {
                x_max: cut_out.x_min,
                ..*self
            },
            Rect {
                x_min: cut_out.x_max,
                ..*self
            },
            Rect {
                y_max: cut_out.y_min,
                ..*self
            },
            Rect {
                y_min: cut_out.y_max,
                ..*self
            },
        ];
        candidates.into_iter().filter(|r| !r.is_empty()).collect()
    }
}

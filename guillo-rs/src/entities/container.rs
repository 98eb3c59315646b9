use crate::entities::Rectangle;
use crate::geometry::primitives::Rect;

/// A fixed-size stock sheet ("bin") together with its current layout.
/// Containers are only ever appended, never merged or removed, even when emptied.
#[derive(Clone, Debug)]
pub struct Container {
    /// Ordinal of the container in creation order
    pub index: usize,
    pub width: u32,
    pub height: u32,
    /// Layout of the container's first packing, before consolidation.
    /// Later refills only replace `rectangles`.
    pub original: Vec<Rectangle>,
    /// Layout after consolidation
    pub rectangles: Vec<Rectangle>,
    /// Committed horizontal cut positions, in the order they were committed
    pub cut_log: Vec<u32>,
    /// Set when the last packing attempt on this container rejected pieces
    pub has_waste: bool,
}

impl Container {
    pub fn new(index: usize, width: u32, height: u32) -> Self {
        Self {
            index,
            width,
            height,
            original: vec![],
            rectangles: vec![],
            cut_log: vec![],
            has_waste: false,
        }
    }

    pub fn bbox(&self) -> Rect {
        Rect::from_origin_size(0, 0, self.width, self.height)
    }

    pub fn area(&self) -> u64 {
        self.bbox().area()
    }

    pub fn placed_area(&self) -> u64 {
        self.rectangles.iter().map(|r| r.area()).sum()
    }

    /// Fraction of the container covered by rectangles
    pub fn density(&self) -> f32 {
        self.placed_area() as f32 / self.area() as f32
    }

    pub fn ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.rectangles.iter().map(|r| r.id)
    }
}

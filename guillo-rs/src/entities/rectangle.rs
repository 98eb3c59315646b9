use serde::{Deserialize, Serialize};

use crate::geometry::primitives::Rect;

/// A piece that currently has no position: either still to be packed or rejected by a packing attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Unique identifier within a run
    pub id: u64,
    pub w: u32,
    pub h: u32,
    /// Whether `w` and `h` are swapped with respect to the requested dimensions
    pub rotated: bool,
}

impl Piece {
    pub fn new(id: u64, w: u32, h: u32) -> Self {
        Self {
            id,
            w,
            h,
            rotated: false,
        }
    }

    /// Positions the piece at `(x, y)` in the orientation it currently has.
    pub fn place_at(self, x: u32, y: u32) -> Rectangle {
        Rectangle {
            id: self.id,
            x,
            y,
            w: self.w,
            h: self.h,
            rotated: self.rotated,
        }
    }

    /// Returns the piece turned by 90°.
    pub fn rotate(self) -> Self {
        Self {
            w: self.h,
            h: self.w,
            rotated: !self.rotated,
            ..self
        }
    }

    /// Whether the piece fits an empty `width × height` container, optionally after rotation.
    pub fn fits_in(&self, width: u32, height: u32, allow_rotation: bool) -> bool {
        (self.w <= width && self.h <= height)
            || (allow_rotation && self.h <= width && self.w <= height)
    }
}

/// A piece placed inside a container.
///
/// The y-axis points away from the container's reference edge: y = 0 is where the first slab
/// starts, and the *bottom edge* `y + h` is the side facing the next cut.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rectangle {
    pub id: u64,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    pub rotated: bool,
}

impl Rectangle {
    /// Edge facing the next horizontal cut, `y + h`
    #[inline(always)]
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }

    #[inline(always)]
    pub fn right(&self) -> u32 {
        self.x + self.w
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    pub fn bbox(&self) -> Rect {
        Rect::from_origin_size(self.x, self.y, self.w, self.h)
    }

    /// True if the horizontal line at `line` passes strictly through the interior of `self`.
    #[inline(always)]
    pub fn straddles(&self, line: u32) -> bool {
        self.y < line && line < self.bottom()
    }

    /// Strips the position, keeping the orientation.
    pub fn piece(&self) -> Piece {
        Piece {
            id: self.id,
            w: self.w,
            h: self.h,
            rotated: self.rotated,
        }
    }

    pub fn translated(self, dx: u32, dy: u32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

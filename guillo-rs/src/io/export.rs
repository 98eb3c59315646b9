use itertools::Itertools;

use crate::allocation::Allocation;
use crate::cut_tree;
use crate::entities::{Container, Rectangle};
use crate::io::ext_repr::{ExtBin, ExtPlacedRectangle, ExtResponse, ExtUnplaced};

/// Exports an [`Allocation`] by composing an [`ExtResponse`] from it.
/// The guillotine cuts of every container are generated here.
pub fn export_allocation(allocation: &Allocation) -> ExtResponse {
    let bins = allocation.containers.iter().map(export_container).collect_vec();
    let unplaced = allocation
        .unplaced
        .iter()
        .map(|u| ExtUnplaced {
            id: u.piece.id,
            w: u.piece.w,
            h: u.piece.h,
            reason: u.reason,
        })
        .collect_vec();

    ExtResponse {
        bins,
        unplaced_count: unplaced.len(),
        unplaced,
        density: allocation.density(),
    }
}

pub fn export_container(container: &Container) -> ExtBin {
    ExtBin {
        bin_index: container.index,
        original: export_rectangles(&container.original),
        optimized: export_rectangles(&container.rectangles),
        has_waste: container.has_waste,
        cut_log: container.cut_log.clone(),
        cuts: cut_tree::generate_cuts(&container.rectangles, container.width, container.height),
        density: container.density(),
    }
}

fn export_rectangles(rects: &[Rectangle]) -> Vec<ExtPlacedRectangle> {
    rects
        .iter()
        .map(|r| ExtPlacedRectangle {
            id: r.id,
            x: r.x,
            y: r.y,
            w: r.w,
            h: r.h,
            rotated: r.rotated,
        })
        .collect_vec()
}

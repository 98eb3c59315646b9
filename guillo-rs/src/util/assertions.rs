//Various checks to verify correctness of the state of the system
//Used in debug_assertion!() blocks

use itertools::Itertools;
use log::error;

use crate::entities::{Container, Rectangle};

/// No two rectangles share interior area
pub fn layout_is_non_overlapping(rects: &[Rectangle]) -> bool {
    for (a, b) in rects.iter().tuple_combinations() {
        if a.bbox().overlaps(&b.bbox()) {
            error!("rectangles {} and {} overlap: {a:?}, {b:?}", a.id, b.id);
            return false;
        }
    }
    true
}

pub fn layout_within_bounds(rects: &[Rectangle], width: u32, height: u32) -> bool {
    match rects.iter().find(|r| r.right() > width || r.bottom() > height) {
        Some(r) => {
            error!("rectangle {} exceeds the {width}x{height} container: {r:?}", r.id);
            false
        }
        None => true,
    }
}

/// No rectangle is crossed by any of the committed horizontal cuts
pub fn cut_log_is_guillotine(rects: &[Rectangle], cut_log: &[u32]) -> bool {
    for &cut in cut_log {
        if let Some(r) = rects.iter().find(|r| r.straddles(cut)) {
            error!("rectangle {} is crossed by cut at {cut}: {r:?}", r.id);
            return false;
        }
    }
    true
}

/// Consecutive cuts (starting from the baseline 0) are increasing and at most `max_gap` apart
pub fn cut_log_respects_gap(cut_log: &[u32], max_gap: u32) -> bool {
    std::iter::once(0)
        .chain(cut_log.iter().copied())
        .tuple_windows()
        .all(|(prev, next)| prev < next && next - prev <= max_gap)
}

/// The multiset of ids in `input` equals the multiset of ids in `output`
pub fn ids_conserved(
    input: impl IntoIterator<Item = u64>,
    output: impl IntoIterator<Item = u64>,
) -> bool {
    let input = input.into_iter().sorted().collect_vec();
    let output = output.into_iter().sorted().collect_vec();
    if input != output {
        error!(
            "id multisets differ, {} in, {} out",
            input.len(),
            output.len()
        );
        return false;
    }
    true
}

pub fn container_is_consistent(container: &Container) -> bool {
    layout_within_bounds(&container.rectangles, container.width, container.height)
        && layout_is_non_overlapping(&container.rectangles)
        && cut_log_is_guillotine(&container.rectangles, &container.cut_log)
}

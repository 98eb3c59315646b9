use std::collections::BTreeSet;

use log::{debug, warn};

use crate::entities::{Cut, Rectangle};
use crate::geometry::Orientation;
use crate::geometry::primitives::Rect;

/// Ordered guillotine cuts for a layout, together with the regions that could not be separated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CutPlan {
    /// Cuts in pre-order: a region's cut precedes the cuts of its first and then its second part
    pub cuts: Vec<Cut>,
    /// Region each cut in `cuts` spans, at the same index
    pub regions: Vec<Rect>,
    /// Regions containing multiple rectangles that no full-span cut can separate
    pub inseparable: Vec<Rect>,
}

impl CutPlan {
    pub fn is_complete(&self) -> bool {
        self.inseparable.is_empty()
    }
}

/// Derives the ordered list of full-span cuts isolating every rectangle in a
/// `width × height` region. See [`plan_cuts`].
pub fn generate_cuts(rects: &[Rectangle], width: u32, height: u32) -> Vec<Cut> {
    plan_cuts(rects, width, height).cuts
}

/// Recursively partitions the region with full-span cuts until every part holds at most one rectangle.
///
/// Every region is split by the cut which balances the number of rectangles on both sides best.
/// Ties are broken deterministically: horizontal before vertical, then the lowest position.
/// The recursion is unrolled onto an explicit stack.
pub fn plan_cuts(rects: &[Rectangle], width: u32, height: u32) -> CutPlan {
    let mut plan = CutPlan::default();
    let root = Rect::from_origin_size(0, 0, width, height);
    let mut stack = vec![(root, rects.to_vec())];

    while let Some((region, rects)) = stack.pop() {
        if rects.len() <= 1 {
            continue;
        }
        match best_split(&region, &rects) {
            Some(cut) => {
                let (before, after) = split_rects(rects, cut);
                let (before_region, after_region) = split_region(&region, cut);
                plan.cuts.push(cut);
                plan.regions.push(region);
                //pushed in reverse to visit the first part first
                stack.push((after_region, after));
                stack.push((before_region, before));
            }
            None => {
                warn!(
                    "[CUTS] {} rectangle(s) in region {region:?} cannot be separated by a guillotine cut",
                    rects.len()
                );
                plan.inseparable.push(region);
            }
        }
    }

    debug!(
        "[CUTS] {} cut(s) for {} rectangle(s), {} inseparable region(s)",
        plan.cuts.len(),
        rects.len(),
        plan.inseparable.len()
    );
    plan
}

/// Lower and upper extent of a rectangle along the axis perpendicular to the cut
fn span(rect: &Rectangle, orientation: Orientation) -> (u32, u32) {
    match orientation {
        Orientation::Horizontal => (rect.y, rect.bottom()),
        Orientation::Vertical => (rect.x, rect.right()),
    }
}

fn best_split(region: &Rect, rects: &[Rectangle]) -> Option<Cut> {
    [Orientation::Horizontal, Orientation::Vertical]
        .into_iter()
        .flat_map(|orientation| {
            let (lower, upper) = match orientation {
                Orientation::Horizontal => (region.y_min, region.y_max),
                Orientation::Vertical => (region.x_min, region.x_max),
            };
            rects
                .iter()
                .flat_map(move |r| {
                    let (start, end) = span(r, orientation);
                    [start, end]
                })
                .filter(move |&p| lower < p && p < upper)
                .collect::<BTreeSet<u32>>()
                .into_iter()
                .map(move |position| Cut {
                    orientation,
                    position,
                })
        })
        .filter_map(|cut| balance(rects, cut).map(|score| (score, cut)))
        .min_by_key(|&(score, cut)| (score, cut.orientation, cut.position))
        .map(|(_, cut)| cut)
}

/// |before - after| if `cut` separates the rectangles into two non-empty groups without crossing any
fn balance(rects: &[Rectangle], cut: Cut) -> Option<usize> {
    let mut n_before: usize = 0;
    let mut n_after: usize = 0;
    for r in rects {
        let (start, end) = span(r, cut.orientation);
        if end <= cut.position {
            n_before += 1;
        } else if start >= cut.position {
            n_after += 1;
        } else {
            return None;
        }
    }
    match n_before > 0 && n_after > 0 {
        true => Some(n_before.abs_diff(n_after)),
        false => None,
    }
}

fn split_rects(rects: Vec<Rectangle>, cut: Cut) -> (Vec<Rectangle>, Vec<Rectangle>) {
    rects
        .into_iter()
        .partition(|r| span(r, cut.orientation).1 <= cut.position)
}

fn split_region(region: &Rect, cut: Cut) -> (Rect, Rect) {
    match cut.orientation {
        Orientation::Horizontal => (
            Rect {
                y_max: cut.position,
                ..*region
            },
            Rect {
                y_min: cut.position,
                ..*region
            },
        ),
        Orientation::Vertical => (
            Rect {
                x_max: cut.position,
                ..*region
            },
            Rect {
                x_min: cut.position,
                ..*region
            },
        ),
    }
}

use std::collections::HashMap;

use itertools::Itertools;
use log::debug;

use crate::consolidation::{ConflictCandidate, Consolidation};
use crate::entities::{Piece, Rectangle};
use crate::error::{CutError, Result};
use crate::oracle::{BinSize, OracleItem, PackingOracle};
use crate::util::assertions;
use crate::util::{ConsolidationStrategy, CutConfig};

/// Cut-Line Consolidation Engine.
///
/// Iteratively commits horizontal cut lines at rectangle bottom edges, never more than
/// `max_gap` beyond the previous cut. Lines that cut through no rectangle are committed directly.
/// Otherwise the line with the least displaced area is chosen, and all material below it is
/// repacked by the oracle into the remaining part of the container.
pub struct CutLineEngine<'a> {
    oracle: &'a dyn PackingOracle,
    config: CutConfig,
}

impl<'a> CutLineEngine<'a> {
    pub fn new(oracle: &'a dyn PackingOracle, config: CutConfig) -> Self {
        Self { oracle, config }
    }

    /// Consolidates a non-overlapping layout inside a `width × height` container.
    ///
    /// Returns the revised layout, the committed cut positions and the pieces which could no
    /// longer be accommodated. Fails with [`CutError::InvalidLayout`] if a rectangle does not lie
    /// inside the container.
    pub fn consolidate(
        &self,
        rectangles: Vec<Rectangle>,
        width: u32,
        height: u32,
    ) -> Result<Consolidation> {
        validate_layout(&rectangles, width, height)?;
        debug_assert!(assertions::layout_is_non_overlapping(&rectangles));

        let input_ids = rectangles.iter().map(|r| r.id).collect_vec();
        let max_gap = self.config.max_gap;

        let mut rects = rectangles;
        let mut waste: Vec<Piece> = vec![];
        let mut cut_log = vec![];
        let mut cut_height = 0;

        loop {
            rects.sort_by_key(|r| r.bottom());

            let mut selected: Option<ConflictCandidate> = None;
            for rect in rects.iter() {
                let bottom = rect.bottom();
                if bottom <= cut_height {
                    continue;
                }
                if bottom - cut_height > max_gap {
                    //no line beyond the gap limit is eligible
                    break;
                }
                let candidate = ConflictCandidate::evaluate(rect, &rects);
                if candidate.is_free() {
                    cut_height = bottom;
                    //the container edge itself is not a cut
                    if bottom < height {
                        cut_log.push(bottom);
                    }
                    selected = None;
                } else if selected
                    .as_ref()
                    .is_none_or(|s| candidate.is_better_than(s))
                {
                    selected = Some(candidate);
                }
            }

            let Some(selected) = selected else {
                break;
            };

            let max_bottom = rects.iter().map(|r| r.bottom()).max().unwrap_or(0);
            if max_bottom.saturating_sub(cut_height) < max_gap {
                //remaining material forms a single final slab
                break;
            }

            let line = selected.line;
            let (below, kept): (Vec<Rectangle>, Vec<Rectangle>) =
                rects.into_iter().partition(|r| r.bottom() > line);
            debug_assert!(!below.is_empty());

            debug!(
                "[ENGINE] cut at {line} crosses {:?} (displaced area: {}), repacking {} rectangle(s) below",
                selected.conflicts,
                selected.displaced_area,
                below.len()
            );

            let (repacked, rejected) = self.repack(
                below.iter().map(|r| r.piece()).collect_vec(),
                width,
                height - line,
                line,
                2,
            )?;
            rects = kept;
            rects.extend(repacked);
            waste.extend(rejected);

            if self.config.strategy == ConsolidationStrategy::GreedyRepackAbove {
                rects = self.repack_slab(rects, width, cut_height, line)?;
            }

            cut_height = line;
            cut_log.push(line);
        }

        debug!(
            "[ENGINE] {} rectangle(s) consolidated with cuts {:?}, {} wasted",
            rects.len(),
            cut_log,
            waste.len()
        );

        debug_assert!(assertions::layout_within_bounds(&rects, width, height));
        debug_assert!(assertions::layout_is_non_overlapping(&rects));
        debug_assert!(assertions::cut_log_is_guillotine(&rects, &cut_log));
        debug_assert!(assertions::cut_log_respects_gap(&cut_log, max_gap));
        debug_assert!(assertions::ids_conserved(
            input_ids,
            rects.iter().map(|r| r.id).chain(waste.iter().map(|p| p.id))
        ));

        Ok(Consolidation {
            rectangles: rects,
            waste,
            cut_log,
        })
    }

    /// Repacks `pieces` into `n_bins` regions of `width × region_height` and translates
    /// everything placed in the first one by `offset_y`.
    /// Pieces assigned to any other region, or to none, are returned as rejected.
    fn repack(
        &self,
        pieces: Vec<Piece>,
        width: u32,
        region_height: u32,
        offset_y: u32,
        n_bins: usize,
    ) -> Result<(Vec<Rectangle>, Vec<Piece>)> {
        let items = pieces
            .iter()
            .map(|p| OracleItem::from_piece(p, self.config.allow_rotation))
            .collect_vec();
        let bins = vec![
            BinSize {
                w: width,
                h: region_height
            };
            n_bins
        ];
        let packing = self.oracle.place(&items, &bins)?;

        let pieces: HashMap<u64, Piece> = pieces.into_iter().map(|p| (p.id, p)).collect();
        let lookup = |id: u64| {
            pieces.get(&id).copied().ok_or_else(|| {
                CutError::OracleFailure(format!("oracle returned unknown item id {id}"))
            })
        };

        let mut placed = vec![];
        let mut rejected = vec![];
        for p in &packing.placements {
            let piece = lookup(p.id)?;
            match p.bin_index {
                0 => placed.push(p.apply(piece).translated(0, offset_y)),
                _ => rejected.push(piece),
            }
        }
        for &id in &packing.unplaced {
            rejected.push(lookup(id)?);
        }
        if placed.len() + rejected.len() != pieces.len() {
            return Err(CutError::OracleFailure(format!(
                "{} item(s) submitted, {} returned",
                pieces.len(),
                placed.len() + rejected.len()
            )));
        }

        Ok((placed, rejected))
    }

    /// Repacks the slab between two consecutive cuts, keeping the original arrangement
    /// when the oracle cannot fit every piece back in.
    fn repack_slab(
        &self,
        rects: Vec<Rectangle>,
        width: u32,
        top: u32,
        line: u32,
    ) -> Result<Vec<Rectangle>> {
        let (slab, mut rest): (Vec<Rectangle>, Vec<Rectangle>) = rects
            .into_iter()
            .partition(|r| r.y >= top && r.bottom() <= line);
        if slab.len() < 2 {
            rest.extend(slab);
            return Ok(rest);
        }

        let pieces = slab.iter().map(|r| r.piece()).collect_vec();
        let (repacked, rejected) = self.repack(pieces, width, line - top, top, 1)?;
        match rejected.is_empty() {
            true => rest.extend(repacked),
            false => {
                debug!("[ENGINE] slab [{top}, {line}) could not be repacked, kept as is");
                rest.extend(slab)
            }
        }
        Ok(rest)
    }
}

fn validate_layout(rects: &[Rectangle], width: u32, height: u32) -> Result<()> {
    for r in rects {
        if r.w == 0 || r.h == 0 {
            return Err(CutError::InvalidLayout(format!(
                "rectangle {} is degenerate: {}x{}",
                r.id, r.w, r.h
            )));
        }
        if r.h > height {
            return Err(CutError::InvalidLayout(format!(
                "rectangle {} is taller ({}) than its container ({height})",
                r.id, r.h
            )));
        }
        if r.x as u64 + r.w as u64 > width as u64 || r.y as u64 + r.h as u64 > height as u64 {
            return Err(CutError::InvalidLayout(format!(
                "rectangle {} at ({}, {}) exceeds its {width}x{height} container",
                r.id, r.x, r.y
            )));
        }
    }
    if let Some(id) = rects.iter().map(|r| r.id).duplicates().next() {
        return Err(CutError::InvalidLayout(format!(
            "rectangle id {id} occurs more than once"
        )));
    }
    Ok(())
}

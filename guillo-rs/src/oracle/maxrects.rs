use std::cmp::Reverse;

use itertools::Itertools;
use log::debug;

use crate::error::{CutError, Result};
use crate::geometry::primitives::Rect;
use crate::oracle::{BinSize, OracleItem, OraclePlacement, Packing, PackingOracle};
use crate::util::{BinSelection, MaxRectsHeuristic, OracleConfig};

/// Maximal-rectangles packer.
///
/// Every bin keeps the list of maximal free rectangles. Items are inserted in order of
/// decreasing area, each one at the best scoring position according to the [`MaxRectsHeuristic`].
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxRectsOracle {
    pub config: OracleConfig,
}

impl MaxRectsOracle {
    pub fn new(config: OracleConfig) -> Self {
        Self { config }
    }
}

impl PackingOracle for MaxRectsOracle {
    fn place(&self, items: &[OracleItem], bins: &[BinSize]) -> Result<Packing> {
        if bins.is_empty() {
            return Err(CutError::OracleFailure("no bins provided".into()));
        }
        if let Some(b) = bins.iter().find(|b| b.w == 0 || b.h == 0) {
            return Err(CutError::OracleFailure(format!(
                "degenerate bin of {}x{}",
                b.w, b.h
            )));
        }
        if let Some(id) = items.iter().map(|i| i.id).duplicates().next() {
            return Err(CutError::OracleFailure(format!("duplicate item id {id}")));
        }

        let mut spaces = bins.iter().map(|b| FreeSpace::new(*b)).collect_vec();
        let heuristic = self.config.heuristic;

        //largest items first, input order breaks ties
        let order = (0..items.len())
            .sorted_by_key(|&i| {
                let it = &items[i];
                (
                    Reverse(it.w as u64 * it.h as u64),
                    Reverse(u32::max(it.w, it.h)),
                    i,
                )
            })
            .collect_vec();

        let mut placements = Vec::with_capacity(items.len());
        let mut unplaced_idx = vec![];

        for i in order {
            let item = &items[i];
            let best = match self.config.bin_selection {
                BinSelection::FirstFit => spaces.iter().enumerate().find_map(|(bi, s)| {
                    s.best_position(item.w, item.h, item.rotatable, heuristic)
                        .map(|c| (bi, c))
                }),
                //the first bin absorbs everything that fits, the others are overflow
                BinSelection::BestFit => spaces[0]
                    .best_position(item.w, item.h, item.rotatable, heuristic)
                    .map(|c| (0, c))
                    .or_else(|| {
                        spaces
                            .iter()
                            .enumerate()
                            .skip(1)
                            .filter_map(|(bi, s)| {
                                s.best_position(item.w, item.h, item.rotatable, heuristic)
                                    .map(|c| (bi, c))
                            })
                            .min_by_key(|(bi, c)| (c.score, *bi))
                    }),
            };

            match best {
                Some((bin_index, c)) => {
                    spaces[bin_index].occupy(c.rect());
                    placements.push(OraclePlacement {
                        id: item.id,
                        bin_index,
                        x: c.x,
                        y: c.y,
                        w: c.w,
                        h: c.h,
                        rotated: c.rotated,
                    });
                }
                None => unplaced_idx.push(i),
            }
        }

        unplaced_idx.sort();
        let unplaced = unplaced_idx.into_iter().map(|i| items[i].id).collect_vec();

        debug!(
            "[ORACLE] placed {}/{} items over {} bin(s), {} unplaced",
            placements.len(),
            items.len(),
            bins.len(),
            unplaced.len()
        );

        Ok(Packing {
            placements,
            unplaced,
        })
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
    rotated: bool,
    score: (u64, u64),
}

impl Candidate {
    fn rect(&self) -> Rect {
        Rect::from_origin_size(self.x, self.y, self.w, self.h)
    }
}

/// Free space of a single bin, as a list of maximal free rectangles
#[derive(Clone, Debug)]
struct FreeSpace {
    free: Vec<Rect>,
}

impl FreeSpace {
    fn new(size: BinSize) -> Self {
        Self {
            free: vec![Rect::from_origin_size(0, 0, size.w, size.h)],
        }
    }

    fn best_position(
        &self,
        w: u32,
        h: u32,
        rotatable: bool,
        heuristic: MaxRectsHeuristic,
    ) -> Option<Candidate> {
        let orientations: &[bool] = match rotatable && w != h {
            true => &[false, true],
            false => &[false],
        };

        let mut best: Option<Candidate> = None;
        for f in &self.free {
            for &rotated in orientations {
                let (w, h) = if rotated { (h, w) } else { (w, h) };
                if !f.fits(w, h) {
                    continue;
                }
                let score = score(f, w, h, heuristic);
                if best.is_none_or(|b| score < b.score) {
                    best = Some(Candidate {
                        x: f.x_min,
                        y: f.y_min,
                        w,
                        h,
                        rotated,
                        score,
                    });
                }
            }
        }
        best
    }

    fn occupy(&mut self, placed: Rect) {
        let split = self
            .free
            .iter()
            .flat_map(|f| f.maximal_remainders(&placed))
            .collect_vec();

        //prune free rectangles enclosed by another one (keep the first of identical ones)
        self.free = split
            .iter()
            .enumerate()
            .filter(|&(i, r)| {
                !split
                    .iter()
                    .enumerate()
                    .any(|(j, o)| i != j && o.contains(r) && (o != r || j < i))
            })
            .map(|(_, r)| *r)
            .collect_vec();
    }
}

fn score(free: &Rect, w: u32, h: u32, heuristic: MaxRectsHeuristic) -> (u64, u64) {
    let leftover_w = (free.width() - w) as u64;
    let leftover_h = (free.height() - h) as u64;
    let short = u64::min(leftover_w, leftover_h);
    let long = u64::max(leftover_w, leftover_h);
    match heuristic {
        MaxRectsHeuristic::BestShortSideFit => (short, long),
        MaxRectsHeuristic::BestLongSideFit => (long, short),
        MaxRectsHeuristic::BestAreaFit => (free.area() - w as u64 * h as u64, short),
        MaxRectsHeuristic::BottomLeft => ((free.y_min + h) as u64, free.x_min as u64),
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::util::assertions;

    fn items(dims: &[(u32, u32)], rotatable: bool) -> Vec<OracleItem> {
        dims.iter()
            .enumerate()
            .map(|(i, &(w, h))| OracleItem {
                id: i as u64,
                w,
                h,
                rotatable,
            })
            .collect()
    }

    fn bins(n: usize, w: u32, h: u32) -> Vec<BinSize> {
        vec![BinSize { w, h }; n]
    }

    #[test]
    fn four_quadrants_fill_a_bin() {
        let oracle = MaxRectsOracle::default();
        let packing = oracle
            .place(&items(&[(50, 50); 4], false), &bins(1, 100, 100))
            .unwrap();
        assert!(packing.unplaced.is_empty());
        assert_eq!(packing.placements.len(), 4);
        let rects = packing
            .placements
            .iter()
            .map(|p| Rect::from_origin_size(p.x, p.y, p.w, p.h))
            .collect_vec();
        assert!(rects.iter().tuple_combinations().all(|(a, b)| !a.overlaps(b)));
    }

    #[test]
    fn rotation_makes_item_fit() {
        let oracle = MaxRectsOracle::default();
        let packing = oracle
            .place(&items(&[(50, 100)], true), &bins(1, 100, 50))
            .unwrap();
        let p = packing.placements[0];
        assert!(p.rotated);
        assert_eq!((p.w, p.h), (100, 50));

        let packing = oracle
            .place(&items(&[(50, 100)], false), &bins(1, 100, 50))
            .unwrap();
        assert_eq!(packing.unplaced, vec![0]);
    }

    #[test]
    fn first_fit_overflows_into_second_bin() {
        let oracle = MaxRectsOracle::default();
        let packing = oracle
            .place(&items(&[(60, 60); 3], false), &bins(2, 100, 100))
            .unwrap();
        assert_eq!(packing.in_bin(0).count(), 1);
        assert_eq!(packing.in_bin(1).count(), 1);
        assert_eq!(packing.unplaced.len(), 1);
        assert_eq!(packing.n_bins_used(), 2);
    }

    #[test]
    fn best_fit_never_overflows_what_fits_the_first_bin() {
        let oracle = MaxRectsOracle::new(OracleConfig {
            bin_selection: BinSelection::BestFit,
            heuristic: MaxRectsHeuristic::BottomLeft,
        });
        //once the large item is placed, an empty second bin scores better for the small one
        let packing = oracle
            .place(&items(&[(50, 60), (20, 20)], true), &bins(2, 100, 60))
            .unwrap();
        assert_eq!(packing.in_bin(0).count(), 2);
        assert_eq!(packing.n_bins_used(), 1);
        assert!(packing.unplaced.is_empty());

        //overflow bins are still chosen by score
        let packing = oracle
            .place(&items(&[(100, 60), (100, 30), (30, 30)], false), &bins(3, 100, 60))
            .unwrap();
        assert_eq!(packing.in_bin(0).map(|p| p.id).collect_vec(), vec![0]);
        assert_eq!(packing.in_bin(1).map(|p| p.id).collect_vec(), vec![1]);
        assert_eq!(packing.in_bin(2).map(|p| p.id).collect_vec(), vec![2]);
    }

    #[test]
    fn unplaced_keep_input_order() {
        let oracle = MaxRectsOracle::default();
        let packing = oracle
            .place(&items(&[(200, 10), (10, 10), (300, 10)], false), &bins(1, 100, 100))
            .unwrap();
        assert_eq!(packing.unplaced, vec![0, 2]);
    }

    #[test]
    fn rejects_invalid_calls() {
        let oracle = MaxRectsOracle::default();
        assert!(oracle.place(&items(&[(1, 1)], false), &[]).is_err());
        assert!(oracle.place(&items(&[(1, 1)], false), &bins(1, 0, 10)).is_err());
        let mut dup = items(&[(1, 1), (2, 2)], false);
        dup[1].id = 0;
        assert!(oracle.place(&dup, &bins(1, 10, 10)).is_err());
    }

    #[test_case(MaxRectsHeuristic::BestShortSideFit; "bssf")]
    #[test_case(MaxRectsHeuristic::BestLongSideFit; "blsf")]
    #[test_case(MaxRectsHeuristic::BestAreaFit; "baf")]
    #[test_case(MaxRectsHeuristic::BottomLeft; "bl")]
    fn heuristics_produce_valid_packings(heuristic: MaxRectsHeuristic) {
        let oracle = MaxRectsOracle::new(OracleConfig {
            bin_selection: BinSelection::BestFit,
            heuristic,
        });
        let dims = [
            (40, 30),
            (25, 70),
            (60, 20),
            (35, 35),
            (10, 90),
            (80, 15),
            (20, 20),
            (45, 55),
        ];
        let items = items(&dims, true);
        let packing = oracle.place(&items, &bins(2, 100, 100)).unwrap();

        assert!(assertions::ids_conserved(
            items.iter().map(|i| i.id),
            packing
                .placements
                .iter()
                .map(|p| p.id)
                .chain(packing.unplaced.iter().copied()),
        ));
        for bin_index in 0..2 {
            let rects = packing
                .in_bin(bin_index)
                .map(|p| Rect::from_origin_size(p.x, p.y, p.w, p.h))
                .collect_vec();
            assert!(rects.iter().all(|r| r.x_max <= 100 && r.y_max <= 100));
            assert!(rects.iter().tuple_combinations().all(|(a, b)| !a.overlaps(b)));
        }
    }
}

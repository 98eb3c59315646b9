use std::collections::HashMap;
use std::time::Instant;

use itertools::Itertools;
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::allocation::{Allocation, Unplaced, UnplacedReason};
use crate::consolidation::{Consolidation, CutLineEngine};
use crate::entities::{Container, Piece, Rectangle};
use crate::error::{CutError, Result};
use crate::oracle::{BinSize, OracleItem, Packing, PackingOracle};
use crate::util::CutConfig;
use crate::util::assertions;

/// Bin allocation and waste redistribution loop.
///
/// Packs all pieces with the oracle, consolidates every resulting container, and then keeps
/// offering the leftover pieces to the most recent container without waste, opening new
/// containers only when no such container is left.
pub struct Allocator<'a> {
    oracle: &'a dyn PackingOracle,
    config: CutConfig,
}

impl<'a> Allocator<'a> {
    pub fn new(oracle: &'a dyn PackingOracle, config: CutConfig) -> Self {
        Self { oracle, config }
    }

    fn engine(&self) -> CutLineEngine<'a> {
        CutLineEngine::new(self.oracle, self.config)
    }

    fn items(&self, pieces: &[Piece]) -> Vec<OracleItem> {
        pieces
            .iter()
            .map(|p| OracleItem::from_piece(p, self.config.allow_rotation))
            .collect_vec()
    }

    pub fn allocate(&self, pieces: Vec<Piece>, width: u32, height: u32) -> Result<Allocation> {
        let start = Instant::now();
        validate_pieces(&pieces, width, height)?;
        let input_ids = pieces.iter().map(|p| p.id).collect_vec();
        let n_input = pieces.len();

        let mut unplaced = vec![];
        let (feasible, infeasible): (Vec<Piece>, Vec<Piece>) = pieces
            .into_iter()
            .partition(|p| p.fits_in(width, height, self.config.allow_rotation));
        for piece in infeasible {
            warn!(
                "[ALLOC] piece {} ({}x{}) can never fit a {width}x{height} container",
                piece.id, piece.w, piece.h
            );
            unplaced.push(Unplaced {
                piece,
                reason: UnplacedReason::Infeasible,
            });
        }

        let (mut containers, mut pending) = self.initial_containers(feasible, width, height)?;
        debug!(
            "[ALLOC] {} initial container(s), {} piece(s) pending",
            containers.len(),
            pending.len()
        );

        let round_limit = self
            .config
            .max_rounds
            .unwrap_or(containers.len() + n_input + 1);
        let mut rounds = 0;

        while !pending.is_empty() {
            if let Some(limit_ms) = self.config.time_limit_ms {
                let elapsed_ms = start.elapsed().as_millis() as u64;
                if elapsed_ms > limit_ms {
                    warn!(
                        "[ALLOC] time limit of {limit_ms}ms exceeded, {} piece(s) still pending",
                        pending.len()
                    );
                    unplaced.extend(pending.into_iter().map(|piece| Unplaced {
                        piece,
                        reason: UnplacedReason::Deadline,
                    }));
                    return Err(CutError::DeadlineExceeded {
                        elapsed_ms,
                        partial: Box::new(Allocation {
                            containers,
                            unplaced,
                        }),
                    });
                }
            }

            rounds += 1;
            if rounds > round_limit {
                return Err(CutError::NonTermination {
                    rounds,
                    limit: round_limit,
                });
            }

            pending = match containers.iter().rposition(|c| !c.has_waste) {
                Some(target) => {
                    self.refill_container(&mut containers[target], pending, width, height)?
                }
                None => self.open_container(&mut containers, pending, &mut unplaced, width, height)?,
            };
            debug!(
                "[ALLOC] round {rounds}: {} container(s), {} piece(s) pending",
                containers.len(),
                pending.len()
            );
        }

        let allocation = Allocation {
            containers,
            unplaced,
        };

        debug_assert!(
            allocation
                .containers
                .iter()
                .all(assertions::container_is_consistent)
        );
        debug_assert!(assertions::ids_conserved(
            input_ids,
            allocation.placed_ids().chain(allocation.unplaced_ids())
        ));

        info!(
            "[ALLOC] {}/{} piece(s) placed over {} container(s) in {rounds} round(s) ({:.3}ms), density {:.3}%",
            allocation.n_placed(),
            n_input,
            allocation.containers.len(),
            start.elapsed().as_secs_f64() * 1000.0,
            allocation.density() * 100.0
        );

        Ok(allocation)
    }

    /// Packs all pieces in one oracle call and consolidates every container that received pieces.
    /// Returns the containers and the queue of pieces left over, engine waste first.
    fn initial_containers(
        &self,
        pieces: Vec<Piece>,
        width: u32,
        height: u32,
    ) -> Result<(Vec<Container>, Vec<Piece>)> {
        if pieces.is_empty() {
            return Ok((vec![], vec![]));
        }
        let bins = vec![
            BinSize {
                w: width,
                h: height
            };
            self.config.max_bins_hint.max(1)
        ];
        let packing = self.oracle.place(&self.items(&pieces), &bins)?;
        let (by_bin, unplaced) = split_packing(&packing, &pieces)?;

        let mut containers = by_bin
            .into_iter()
            .filter(|rects| !rects.is_empty())
            .enumerate()
            .map(|(index, rects)| {
                let mut container = Container::new(index, width, height);
                container.original = rects;
                container
            })
            .collect_vec();

        //containers are independent, consolidate them in parallel
        let engine = self.engine();
        let wastes = containers
            .par_iter_mut()
            .map(|c| {
                let consolidation = engine.consolidate(c.original.clone(), width, height)?;
                Ok(apply_consolidation(c, consolidation))
            })
            .collect::<Result<Vec<Vec<Piece>>>>()?;

        let pending = wastes.into_iter().flatten().chain(unplaced).collect_vec();
        Ok((containers, pending))
    }

    /// Repacks the target's rectangles together with the pending pieces into the target.
    /// Returns the new pending queue: overflow first, then engine waste.
    fn refill_container(
        &self,
        target: &mut Container,
        pending: Vec<Piece>,
        width: u32,
        height: u32,
    ) -> Result<Vec<Piece>> {
        let pieces = target
            .rectangles
            .iter()
            .map(|r| r.piece())
            .chain(pending)
            .collect_vec();
        let bins = vec![
            BinSize {
                w: width,
                h: height
            };
            2
        ];
        let packing = self.oracle.place(&self.items(&pieces), &bins)?;
        let (by_bin, unplaced) = split_packing(&packing, &pieces)?;
        let mut by_bin = by_bin.into_iter();
        let layout = by_bin.next().unwrap_or_default();
        let overflow = by_bin
            .flatten()
            .map(|r| r.piece())
            .chain(unplaced)
            .collect_vec();

        //`original` keeps the container's first packing
        let consolidation = self.engine().consolidate(layout, width, height)?;
        let waste = apply_consolidation(target, consolidation);

        let pending = overflow.into_iter().chain(waste).collect_vec();
        target.has_waste = !pending.is_empty();
        debug!(
            "[ALLOC] refilled container {}: {} rectangle(s), {} piece(s) returned",
            target.index,
            target.rectangles.len(),
            pending.len()
        );
        Ok(pending)
    }

    /// Seeds a new container with the pending pieces.
    /// If not a single piece can be seeded, the first one is rejected instead and no container is created.
    fn open_container(
        &self,
        containers: &mut Vec<Container>,
        mut pending: Vec<Piece>,
        unplaced: &mut Vec<Unplaced>,
        width: u32,
        height: u32,
    ) -> Result<Vec<Piece>> {
        let bins = [BinSize {
            w: width,
            h: height,
        }];
        let packing = self.oracle.place(&self.items(&pending), &bins)?;
        if packing.placements.is_empty() {
            let piece = pending.remove(0);
            warn!(
                "[ALLOC] piece {} ({}x{}) cannot seed an empty container",
                piece.id, piece.w, piece.h
            );
            unplaced.push(Unplaced {
                piece,
                reason: UnplacedReason::NoFit,
            });
            return Ok(pending);
        }

        let (by_bin, leftover) = split_packing(&packing, &pending)?;
        let layout = by_bin.into_iter().next().unwrap_or_default();

        let mut container = Container::new(containers.len(), width, height);
        container.original = layout.clone();
        let consolidation = self.engine().consolidate(layout, width, height)?;
        let waste = apply_consolidation(&mut container, consolidation);

        let pending = leftover.into_iter().chain(waste).collect_vec();
        container.has_waste = !pending.is_empty();
        debug!(
            "[ALLOC] opened container {} with {} rectangle(s)",
            container.index,
            container.rectangles.len()
        );
        containers.push(container);
        Ok(pending)
    }
}

/// Stores the engine's result in the container and returns the engine's waste.
fn apply_consolidation(container: &mut Container, consolidation: Consolidation) -> Vec<Piece> {
    let Consolidation {
        rectangles,
        waste,
        cut_log,
    } = consolidation;
    container.rectangles = rectangles;
    container.cut_log = cut_log;
    container.has_waste = !waste.is_empty();
    waste
}

/// Resolves an oracle [`Packing`] against the submitted pieces.
/// Returns the placed rectangles per bin (up to the highest used bin) and the unplaced pieces.
fn split_packing(packing: &Packing, pieces: &[Piece]) -> Result<(Vec<Vec<Rectangle>>, Vec<Piece>)> {
    let lookup: HashMap<u64, Piece> = pieces.iter().map(|p| (p.id, *p)).collect();
    let get = |id: u64| {
        lookup.get(&id).copied().ok_or_else(|| {
            CutError::OracleFailure(format!("oracle returned unknown item id {id}"))
        })
    };

    let mut by_bin = vec![vec![]; packing.n_bins_used()];
    for p in &packing.placements {
        by_bin[p.bin_index].push(p.apply(get(p.id)?));
    }
    let unplaced = packing
        .unplaced
        .iter()
        .map(|&id| get(id))
        .collect::<Result<Vec<Piece>>>()?;

    let n_returned = packing.placements.len() + unplaced.len();
    if n_returned != pieces.len() {
        return Err(CutError::OracleFailure(format!(
            "{} item(s) submitted, {n_returned} returned",
            pieces.len()
        )));
    }
    Ok((by_bin, unplaced))
}

fn validate_pieces(pieces: &[Piece], width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(CutError::InvalidInput(format!(
            "container dimensions must be positive, got {width}x{height}"
        )));
    }
    if let Some(p) = pieces.iter().find(|p| p.w == 0 || p.h == 0) {
        return Err(CutError::InvalidInput(format!(
            "piece {} has non-positive dimensions {}x{}",
            p.id, p.w, p.h
        )));
    }
    if let Some(id) = pieces.iter().map(|p| p.id).duplicates().next() {
        return Err(CutError::InvalidInput(format!("duplicate piece id {id}")));
    }
    Ok(())
}

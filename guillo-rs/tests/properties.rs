use std::collections::HashMap;

use itertools::Itertools;
use rand::prelude::SmallRng;
use rand::{Rng, SeedableRng};
use test_case::test_case;

use guillo_rs::allocation::{Allocator, UnplacedReason};
use guillo_rs::consolidation::CutLineEngine;
use guillo_rs::cut_tree;
use guillo_rs::entities::{Piece, Rectangle};
use guillo_rs::oracle::{BinSize, MaxRectsOracle, OracleItem, PackingOracle};
use guillo_rs::util::assertions;
use guillo_rs::util::{BinSelection, ConsolidationStrategy, CutConfig, MaxRectsHeuristic};

const BIN_WIDTH: u32 = 1000;
const BIN_HEIGHT: u32 = 800;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_pieces(rng: &mut SmallRng, n: usize) -> Vec<Piece> {
    (0..n as u64)
        .map(|id| Piece::new(id, rng.random_range(20..=400), rng.random_range(20..=300)))
        .collect_vec()
}

/// Checks every property an allocation must satisfy, regardless of the configuration
fn check_allocation(pieces: &[Piece], config: CutConfig) {
    let oracle = MaxRectsOracle::new(config.oracle);
    let allocation = Allocator::new(&oracle, config)
        .allocate(pieces.to_vec(), BIN_WIDTH, BIN_HEIGHT)
        .unwrap();

    //conservation
    assert!(assertions::ids_conserved(
        pieces.iter().map(|p| p.id),
        allocation.placed_ids().chain(allocation.unplaced_ids())
    ));

    //termination bound: never more than one container per piece
    assert!(allocation.containers.len() <= pieces.len().max(1));

    let requested: HashMap<u64, &Piece> = pieces.iter().map(|p| (p.id, p)).collect();
    for container in &allocation.containers {
        assert!(assertions::container_is_consistent(container));
        assert!(assertions::cut_log_respects_gap(&container.cut_log, config.max_gap));

        //dimensions are preserved up to a tracked rotation
        for r in &container.rectangles {
            let p = requested[&r.id];
            match r.rotated {
                false => assert_eq!((r.w, r.h), (p.w, p.h)),
                true => assert_eq!((r.w, r.h), (p.h, p.w)),
            }
            if !config.allow_rotation {
                assert!(!r.rotated);
            }
        }

        //cut tree generation is deterministic
        let first = cut_tree::plan_cuts(&container.rectangles, container.width, container.height);
        let second = cut_tree::plan_cuts(&container.rectangles, container.width, container.height);
        assert_eq!(first, second);
        assert!(first.cuts.len() < container.rectangles.len().max(1));
    }

    //only infeasible pieces are left out when no deadline is set
    assert!(
        allocation
            .unplaced
            .iter()
            .all(|u| u.reason != UnplacedReason::Deadline)
    );
}

#[test_case(0; "seed 0")]
#[test_case(1; "seed 1")]
#[test_case(2; "seed 2")]
#[test_case(3; "seed 3")]
#[test_case(4; "seed 4")]
fn allocation_properties_hold(seed: u64) {
    init_logger();
    let mut rng = SmallRng::seed_from_u64(seed);
    let pieces = random_pieces(&mut rng, 60);
    check_allocation(&pieces, CutConfig::default());
}

#[test_case(MaxRectsHeuristic::BestShortSideFit, BinSelection::FirstFit)]
#[test_case(MaxRectsHeuristic::BestLongSideFit, BinSelection::BestFit)]
#[test_case(MaxRectsHeuristic::BestAreaFit, BinSelection::FirstFit)]
#[test_case(MaxRectsHeuristic::BottomLeft, BinSelection::BestFit)]
fn allocation_properties_hold_for_every_oracle_config(
    heuristic: MaxRectsHeuristic,
    bin_selection: BinSelection,
) {
    let mut rng = SmallRng::seed_from_u64(42);
    let pieces = random_pieces(&mut rng, 40);
    let mut config = CutConfig::default();
    config.oracle.heuristic = heuristic;
    config.oracle.bin_selection = bin_selection;
    check_allocation(&pieces, config);
}

#[test]
fn allocation_properties_hold_without_rotation() {
    let mut rng = SmallRng::seed_from_u64(7);
    let pieces = random_pieces(&mut rng, 40);
    let config = CutConfig {
        allow_rotation: false,
        max_gap: 120,
        ..CutConfig::default()
    };
    check_allocation(&pieces, config);
}

#[test]
fn allocation_properties_hold_when_repacking_above() {
    let mut rng = SmallRng::seed_from_u64(11);
    let pieces = random_pieces(&mut rng, 40);
    let config = CutConfig {
        strategy: ConsolidationStrategy::GreedyRepackAbove,
        ..CutConfig::default()
    };
    check_allocation(&pieces, config);
}

#[test]
fn infeasible_pieces_are_reported() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut pieces = random_pieces(&mut rng, 10);
    pieces.push(Piece::new(100, 1200, 900));
    pieces.push(Piece::new(101, 900, 1200));

    let oracle = MaxRectsOracle::default();
    let allocation = Allocator::new(&oracle, CutConfig::default())
        .allocate(pieces, BIN_WIDTH, BIN_HEIGHT)
        .unwrap();

    let infeasible = allocation
        .unplaced
        .iter()
        .filter(|u| u.reason == UnplacedReason::Infeasible)
        .map(|u| u.piece.id)
        .sorted()
        .collect_vec();
    assert_eq!(infeasible, vec![100, 101]);
    assert_eq!(allocation.n_placed(), 10);
}

/// Random single-bin layout as the oracle would produce it
fn random_layout(rng: &mut SmallRng, oracle: &MaxRectsOracle) -> Vec<Rectangle> {
    let pieces = random_pieces(rng, 30);
    let items = pieces
        .iter()
        .map(|p| OracleItem::from_piece(p, true))
        .collect_vec();
    let bins = [BinSize {
        w: BIN_WIDTH,
        h: BIN_HEIGHT,
    }];
    let packing = oracle.place(&items, &bins).unwrap();
    packing
        .placements
        .iter()
        .map(|pl| {
            let piece = pieces.iter().find(|p| p.id == pl.id).unwrap();
            pl.apply(*piece)
        })
        .collect_vec()
}

#[test_case(250; "gap 250")]
#[test_case(100; "gap 100")]
#[test_case(40; "gap 40")]
fn consolidation_properties_hold(max_gap: u32) {
    init_logger();
    let mut rng = SmallRng::seed_from_u64(max_gap as u64);
    let oracle = MaxRectsOracle::default();
    let config = CutConfig {
        max_gap,
        ..CutConfig::default()
    };
    let engine = CutLineEngine::new(&oracle, config);

    for _ in 0..5 {
        let layout = random_layout(&mut rng, &oracle);
        let input_ids = layout.iter().map(|r| r.id).collect_vec();

        let consolidation = engine
            .consolidate(layout, BIN_WIDTH, BIN_HEIGHT)
            .unwrap();

        assert!(assertions::layout_is_non_overlapping(&consolidation.rectangles));
        assert!(assertions::layout_within_bounds(
            &consolidation.rectangles,
            BIN_WIDTH,
            BIN_HEIGHT
        ));
        assert!(assertions::cut_log_is_guillotine(
            &consolidation.rectangles,
            &consolidation.cut_log
        ));
        assert!(assertions::cut_log_respects_gap(&consolidation.cut_log, max_gap));
        assert!(assertions::ids_conserved(
            input_ids,
            consolidation
                .rectangles
                .iter()
                .map(|r| r.id)
                .chain(consolidation.waste.iter().map(|p| p.id))
        ));
    }
}

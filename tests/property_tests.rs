//! Property tests for the match engine invariants.
//!
//! Each case builds a seeded session and replays an arbitrary sequence of
//! player actions, checking the invariants after every step.

use proptest::prelude::*;

use memory_maze::core::{GameMode, ManualClock, SessionConfig};
use memory_maze::engine::{ItemKind, MatchOutcome, Session};
use memory_maze::{AdjacencyGraph, ItemInventory, PatternId, SessionError};

#[derive(Clone, Debug)]
enum Step {
    Select(usize, usize),
    Hide,
    Tick(u64),
    Item(ItemKind, u64),
}

fn step_strategy(rows: usize, cols: usize) -> impl Strategy<Value = Step> {
    prop_oneof![
        6 => (0..rows, 0..cols).prop_map(|(r, c)| Step::Select(r, c)),
        2 => Just(Step::Hide),
        1 => (0u64..5_000).prop_map(Step::Tick),
        1 => (
            prop_oneof![
                Just(ItemKind::ExtendTime),
                Just(ItemKind::SuppressShuffle),
                Just(ItemKind::ForceReveal),
            ],
            0u64..10,
        )
            .prop_map(|(k, m)| Step::Item(k, m)),
    ]
}

fn mode_strategy() -> impl Strategy<Value = GameMode> {
    prop_oneof![Just(GameMode::Simple), Just(GameMode::Hard)]
}

fn build(mode: GameMode, seed: u64, budget_ms: u64) -> (Session, ManualClock) {
    let clock = ManualClock::new();
    let config = SessionConfig::for_mode(mode)
        .with_seed(seed)
        .with_shuffle_threshold(2)
        .with_time_budget_ms(budget_ms);
    let session = Session::builder(mode)
        .dimensions(4, 5)
        .config(config)
        .clock(clock.clone())
        .build()
        .unwrap();
    (session, clock)
}

fn unmatched_ids(session: &Session) -> Vec<PatternId> {
    let mut ids: Vec<_> = session
        .grid_state()
        .into_iter()
        .filter(|v| !v.is_matched)
        .map(|v| v.id)
        .collect();
    ids.sort();
    ids
}

proptest! {
    /// Score never decreases, and only grows on a match by both weights.
    #[test]
    fn prop_score_monotonic(
        mode in mode_strategy(),
        seed in any::<u64>(),
        steps in prop::collection::vec(step_strategy(4, 5), 1..120),
    ) {
        let (mut session, clock) = build(mode, seed, 60_000);

        for step in steps {
            let before = session.score();
            match step {
                Step::Select(r, c) => {
                    let outcome = session.select_card(r, c).unwrap();
                    match outcome {
                        MatchOutcome::Matched => prop_assert_eq!(session.score(), before + 20),
                        MatchOutcome::NotMatched => prop_assert_eq!(session.score(), before),
                    }
                }
                Step::Hide => session.hide_all_flipped(),
                Step::Tick(ms) => clock.advance(ms),
                Step::Item(kind, m) => {
                    let _ = session.apply_item(kind, m);
                }
            }
            prop_assert!(session.score() >= before);
        }
    }

    /// Selecting an already face-up or matched card changes nothing.
    #[test]
    fn prop_face_up_selection_is_noop(
        mode in mode_strategy(),
        seed in any::<u64>(),
        steps in prop::collection::vec(step_strategy(4, 5), 1..80),
    ) {
        let (mut session, clock) = build(mode, seed, 600_000);

        for step in steps {
            match step {
                Step::Select(r, c) => { session.select_card(r, c).unwrap(); }
                Step::Hide => session.hide_all_flipped(),
                Step::Tick(ms) => clock.advance(ms),
                Step::Item(kind, m) => { let _ = session.apply_item(kind, m); }
            }

            let state = session.grid_state();
            if let Some(index) = state.iter().position(|v| v.is_flipped) {
                let (r, c) = (index / 5, index % 5);
                let selection = session.selection();
                let streak = session.fail_streak();
                let score = session.score();
                let moves = session.move_count();

                prop_assert_eq!(session.select_card(r, c).unwrap(), MatchOutcome::NotMatched);
                prop_assert_eq!(session.grid_state(), state);
                prop_assert_eq!(session.selection(), selection);
                prop_assert_eq!(session.fail_streak(), streak);
                prop_assert_eq!(session.score(), score);
                prop_assert_eq!(session.move_count(), moves);
            }
        }
    }

    /// Hard mode: a non-neighbour second card never changes streak, score or flips.
    #[test]
    fn prop_non_neighbor_never_mutates(
        seed in any::<u64>(),
        first in (0usize..4, 0usize..5),
        second in (0usize..4, 0usize..5),
    ) {
        let (mut session, _) = build(GameMode::Hard, seed, 600_000);
        let distance = first.0.abs_diff(second.0) + first.1.abs_diff(second.1);
        prop_assume!(distance > 1);

        session.select_card(first.0, first.1).unwrap();
        let state = session.grid_state();
        let streak = session.fail_streak();

        prop_assert_eq!(session.select_card(second.0, second.1).unwrap(), MatchOutcome::NotMatched);
        prop_assert_eq!(session.grid_state(), state);
        prop_assert_eq!(session.fail_streak(), streak);
        prop_assert_eq!(session.score(), 0);
    }

    /// Hiding never changes the multiset of unmatched ids or any matched card.
    #[test]
    fn prop_hide_preserves_unmatched_multiset(
        mode in mode_strategy(),
        seed in any::<u64>(),
        steps in prop::collection::vec(step_strategy(4, 5), 1..150),
    ) {
        let (mut session, clock) = build(mode, seed, 600_000);

        for step in steps {
            match step {
                Step::Select(r, c) => { session.select_card(r, c).unwrap(); }
                Step::Tick(ms) => clock.advance(ms),
                Step::Item(kind, m) => { let _ = session.apply_item(kind, m); }
                Step::Hide => {
                    let before = session.grid_state();
                    let ids_before = unmatched_ids(&session);

                    session.hide_all_flipped();

                    let after = session.grid_state();
                    prop_assert_eq!(unmatched_ids(&session), ids_before);
                    for (b, a) in before.iter().zip(&after) {
                        if b.is_matched {
                            prop_assert_eq!(b, a);
                        } else {
                            prop_assert!(!a.is_flipped);
                        }
                    }
                }
            }
        }
    }

    /// BFS distance is zero on the diagonal, symmetric, and one for neighbours.
    #[test]
    fn prop_bfs_distance(
        rows in 1usize..9,
        cols in 1usize..9,
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let graph = AdjacencyGraph::grid(rows, cols);
        let n = rows * cols;
        let (a, b) = (a.index(n), b.index(n));

        prop_assert_eq!(graph.bfs_distance(a, a), Some(0));
        prop_assert_eq!(graph.bfs_distance(a, b), graph.bfs_distance(b, a));

        let manhattan = (a / cols).abs_diff(b / cols) + (a % cols).abs_diff(b % cols);
        prop_assert_eq!(graph.bfs_distance(a, b), Some(manhattan));

        for &v in graph.neighbors(a) {
            prop_assert_eq!(graph.bfs_distance(a, v), Some(1));
        }
    }

    /// Using an item with a zero count fails and changes nothing.
    #[test]
    fn prop_empty_item_is_noop(
        mode in mode_strategy(),
        seed in any::<u64>(),
        magnitude in 0u64..100,
    ) {
        let clock = ManualClock::new();
        let mut session = Session::builder(mode)
            .dimensions(4, 4)
            .config(SessionConfig::for_mode(mode).with_seed(seed).with_items(ItemInventory::empty()))
            .clock(clock)
            .build()
            .unwrap();
        session.select_card(0, 0).unwrap();

        for kind in ItemKind::ALL {
            let state = session.grid_state();
            let remaining = session.remaining_time_ms();
            let stall = session.anti_stall().clone();

            prop_assert_eq!(session.apply_item(kind, magnitude), Err(SessionError::ItemUnavailable(kind)));
            prop_assert_eq!(session.grid_state(), state);
            prop_assert_eq!(session.remaining_time_ms(), remaining);
            prop_assert_eq!(session.anti_stall(), &stall);
            prop_assert_eq!(session.items().count(kind), 0);
        }
    }

    /// After expiry, selections never touch score, flips, or selection.
    #[test]
    fn prop_expired_selection_is_noop(
        mode in mode_strategy(),
        seed in any::<u64>(),
        early in prop::collection::vec((0usize..4, 0usize..5), 0..10),
        late in prop::collection::vec((0usize..4, 0usize..5), 1..20),
    ) {
        let (mut session, clock) = build(mode, seed, 1_000);
        for (r, c) in early {
            session.select_card(r, c).unwrap();
        }
        clock.advance(1_000);
        prop_assert!(session.is_time_expired());

        let state = session.grid_state();
        let selection = session.selection();
        let score = session.score();

        for (r, c) in late {
            prop_assert_eq!(session.select_card(r, c).unwrap(), MatchOutcome::NotMatched);
            prop_assert_eq!(session.grid_state(), state.clone());
            prop_assert_eq!(session.selection(), selection);
            prop_assert_eq!(session.score(), score);
        }
    }
}

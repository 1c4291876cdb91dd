use std::sync::atomic::AtomicBool;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;
use crate::background::{backgrounds, Background};
use crate::error::GibbsError;
use crate::seq::SequenceSet;

const PC: f64 = 0.125;

// TGACGC implanted at offsets 4, 19 and 11.
const IMPLANTED: [&str; 3] = [
    "AAGCTGACGCCCAATAAACCACTCTGACTG",
    "GCCGAATAGGGATATAGGCTGACGCAACGA",
    "CATGTGCGGCGTGACGCACCCTTGCGACAG",
];
const IMPLANTED_AT: [usize; 3] = [4, 19, 11];

// No symbol in common, so every leave-one-out window scores below zero.
const DISJOINT: [&str; 2] = [
    "CCACAAAACCACAAAACCACAAACAAAAAAAACCAAAACC",
    "GTTGGTGTTGTGTTTTTGTTGGTGTTGTTTGTGGGGGTTT",
];

fn set_of(seqs: &[&str]) -> SequenceSet {
    SequenceSet::from_pairs(seqs.iter().enumerate().map(|(i, s)| (format!("seq{i}"), *s))).unwrap()
}

/// `n` independent uniform DNA sequences of length `len`.
fn random_set(n: usize, len: usize, seed: u64) -> SequenceSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let seqs: Vec<String> = (0..n)
        .map(|_| {
            (0..len)
                .map(|_| b"ACGT"[rng.gen_range(0..4)] as char)
                .collect()
        })
        .collect();
    set_of(&seqs.iter().map(String::as_str).collect::<Vec<_>>())
}

fn quick_config() -> SearchConfig {
    SearchConfig::default().with_restarts(50).with_seed(2024)
}

fn dna(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![Just(b'A'), Just(b'C'), Just(b'G'), Just(b'T')],
        len,
    )
}

// ─── state ──────────────────────────────────────────────────

#[test]
fn state_total_is_sum_of_leave_one_out_scores() {
    let set = set_of(&IMPLANTED);
    let bgs = backgrounds(&set, PC);
    let model = Model::new(&set, &bgs, PC);
    let state = MotifState::new(&model, IMPLANTED_AT.to_vec(), 6);
    let expected: f64 = (0..3)
        .map(|i| model.score(&IMPLANTED_AT, 6, i))
        .sum();
    assert!((state.total() - expected).abs() < 1e-12);
    assert!(state.total() > 30.0);
    assert!(state.is_legal(&set));
}

#[test]
fn best_tracker_keeps_strict_improvements_only() {
    let set = set_of(&IMPLANTED);
    let bgs = backgrounds(&set, PC);
    let model = Model::new(&set, &bgs, PC);
    let good = MotifState::new(&model, IMPLANTED_AT.to_vec(), 6);
    let poor = MotifState::new(&model, vec![0, 0, 0], 6);

    let mut tracker = BestTracker::default();
    assert!(tracker.observe(&poor));
    assert!(tracker.observe(&good));
    assert!(!tracker.observe(&good));
    assert!(!tracker.observe(&poor));
    let best = tracker.into_best().unwrap();
    assert_eq!(best.positions, IMPLANTED_AT.to_vec());
    assert_eq!(best.motif_len, 6);
}

// ─── gibbs sweep ────────────────────────────────────────────

#[test]
fn sweep_counts_moved_windows() {
    let set = set_of(&IMPLANTED);
    let bgs = backgrounds(&set, PC);
    let model = Model::new(&set, &bgs, PC);
    let mut rng = StdRng::seed_from_u64(9);
    let mut state = MotifState::random(&model, 6, &mut rng);
    for _ in 0..20 {
        let before = state.positions().to_vec();
        let changed = gibbs::sweep(&model, &mut state, &mut rng);
        let moved = before
            .iter()
            .zip(state.positions())
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(changed, moved);
        assert_eq!(state.scores(), model.score_all(state.positions(), 6).as_slice());
    }
}

#[test]
fn sweep_survives_all_negative_scores() {
    let set = set_of(&DISJOINT);
    let bgs = backgrounds(&set, PC);
    let model = Model::new(&set, &bgs, PC);
    let mut rng = StdRng::seed_from_u64(1);
    let mut state = MotifState::random(&model, 5, &mut rng);
    for _ in 0..50 {
        gibbs::sweep(&model, &mut state, &mut rng);
        assert!(state.is_legal(&set));
        assert!(state.total() < 0.0);
    }
}

// ─── local moves ────────────────────────────────────────────

#[test]
fn shift_pass_recovers_off_by_one_window() {
    let set = set_of(&IMPLANTED);
    let bgs = backgrounds(&set, PC);
    let model = Model::new(&set, &bgs, PC);
    let mut state = MotifState::new(&model, vec![4, 20, 11], 6);
    let moved = moves::shift_pass(&model, &mut state);
    assert_eq!(moved, 1);
    assert_eq!(state.positions(), &IMPLANTED_AT);
}

#[test]
fn length_moves_respect_boundaries() {
    let set = SequenceSet::from_pairs([("a", "ACGTACGT"), ("b", "ACGTAC")]).unwrap();
    // window of b already touches its right end
    let positions = [1, 2];
    assert_eq!(
        LengthMove::GrowLeft.apply(&set, &positions, 4),
        Some((vec![0, 1], 5))
    );
    assert_eq!(LengthMove::GrowRight.apply(&set, &positions, 4), None);
    assert_eq!(LengthMove::GrowBoth.apply(&set, &positions, 4), None);
    assert_eq!(
        LengthMove::ShrinkBoth.apply(&set, &positions, 4),
        Some((vec![2, 3], 2))
    );
    assert_eq!(LengthMove::GrowLeft.apply(&set, &[0, 2], 4), None);
    assert_eq!(LengthMove::ShrinkBoth.apply(&set, &positions, 2), None);
    assert_eq!(LengthMove::ShrinkRight.apply(&set, &positions, 1), None);
}

#[test]
fn grow_both_adds_two_columns() {
    let set = SequenceSet::from_pairs([("a", "ACGTACGTAA"), ("b", "ACGTACGTCC")]).unwrap();
    assert_eq!(
        LengthMove::GrowBoth.apply(&set, &[2, 3], 3),
        Some((vec![1, 2], 5))
    );
    assert_eq!(
        LengthMove::GrowBoth.apply(&set, &[1, 1], 7),
        Some((vec![0, 0], 9))
    );
    // room on both sides, but length 10 would not stay below the shortest sequence
    assert_eq!(LengthMove::GrowBoth.apply(&set, &[1, 1], 8), None);
    assert_eq!(LengthMove::GrowRight.apply(&set, &[0, 0], 9), None);
}

#[test]
fn length_adjustment_trims_a_padded_motif() {
    let set = set_of(&IMPLANTED);
    let bgs = backgrounds(&set, PC);
    let model = Model::new(&set, &bgs, PC);
    let padded: Vec<usize> = IMPLANTED_AT.iter().map(|p| p - 1).collect();
    let mut state = MotifState::new(&model, padded, 8);
    let before = state.total();
    let mv = moves::adjust_length(&model, &mut state);
    assert!(mv.is_some());
    assert!(state.total() > before);
    assert!(state.motif_len() < 8);
}

#[test]
fn length_adjustment_keeps_optimum() {
    let set = set_of(&IMPLANTED);
    let bgs = backgrounds(&set, PC);
    let model = Model::new(&set, &bgs, PC);
    let mut state = MotifState::new(&model, IMPLANTED_AT.to_vec(), 6);
    let before = state.clone();
    assert_eq!(moves::adjust_length(&model, &mut state), None);
    assert_eq!(state, before);
}

// ─── refinement ─────────────────────────────────────────────

#[test]
fn snap_prefers_lowest_offset_on_ties() {
    let set = SequenceSet::from_pairs([("a", "AAAA"), ("b", "AAAA")]).unwrap();
    let bgs = vec![Background::uniform(); 2];
    let model = Model::new(&set, &bgs, PC);
    let mut state = MotifState::new(&model, vec![2, 0], 1);
    assert_eq!(refine::snap_pass(&model, &mut state), 1);
    assert_eq!(state.positions(), &[0, 0]);
}

#[test]
fn refinement_is_idempotent() {
    let set = set_of(&IMPLANTED);
    let bgs = backgrounds(&set, PC);
    let model = Model::new(&set, &bgs, PC);
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = MotifState::random(&model, 6, &mut rng);
        let rounds = refine::refine(&model, &mut state, 64);
        assert!(rounds < 64);
        let once = state.clone();
        assert_eq!(refine::refine(&model, &mut state, 64), 1);
        assert_eq!(state, once);
    }
}

// ─── restarts ───────────────────────────────────────────────

#[test]
fn restart_stops_at_iteration_cap() {
    let set = set_of(&IMPLANTED);
    let bgs = backgrounds(&set, PC);
    let model = Model::new(&set, &bgs, PC);
    let config = SearchConfig::default()
        .with_max_iterations(3)
        .with_plateau_threshold(100);
    let mut rng = StdRng::seed_from_u64(5);
    let outcome = run_restart(&model, &config, 6, &mut rng, &AtomicBool::new(false)).unwrap();
    assert_eq!(outcome.termination, Termination::IterationCap);
    assert_eq!(outcome.iterations, 3);
}

#[test]
fn restart_stops_on_plateau() {
    let set = set_of(&IMPLANTED);
    let bgs = backgrounds(&set, PC);
    let model = Model::new(&set, &bgs, PC);
    let config = SearchConfig::default().with_plateau_threshold(10);
    let mut rng = StdRng::seed_from_u64(5);
    let outcome = run_restart(&model, &config, 6, &mut rng, &AtomicBool::new(false)).unwrap();
    assert_eq!(outcome.termination, Termination::Plateau);
    assert!(outcome.iterations >= 10);
    assert!(outcome.iterations < config.max_iterations);
}

#[test]
fn cancelled_restart_reports_nothing() {
    let set = set_of(&IMPLANTED);
    let bgs = backgrounds(&set, PC);
    let model = Model::new(&set, &bgs, PC);
    let mut rng = StdRng::seed_from_u64(5);
    let cancel = AtomicBool::new(true);
    assert!(run_restart(&model, &SearchConfig::default(), 6, &mut rng, &cancel).is_none());
}

#[test]
fn starting_length_is_strict_unless_halving() {
    let set = set_of(&IMPLANTED);
    assert_eq!(starting_motif_len(&set, 6, false).unwrap(), 6);
    assert!(matches!(
        starting_motif_len(&set, 30, false),
        Err(GibbsError::MotifTooLong {
            guess: 30,
            shortest: 30
        })
    ));
    assert_eq!(starting_motif_len(&set, 100, true).unwrap(), 25);
    assert!(matches!(
        starting_motif_len(&set, 0, true),
        Err(GibbsError::InvalidMotifLength { len: 0 })
    ));
}

// ─── end to end ─────────────────────────────────────────────

#[test]
fn recovers_implanted_motif() {
    let set = set_of(&IMPLANTED);
    let hit = find_motif(&set, 6, &quick_config()).unwrap();
    assert_eq!(hit.motif_len, 6);
    assert_eq!(hit.positions, IMPLANTED_AT.to_vec());
    assert_eq!(hit.windows(&set), vec!["TGACGC"; 3]);
    assert_eq!(hit.consensus, "TGACGC");
    assert!(hit.score > 30.0);
}

#[test]
fn random_sequences_report_no_motif() {
    let set = random_set(5, 60, 99);
    let config = quick_config().with_seed(1);
    match find_motif(&set, 6, &config).unwrap_err() {
        GibbsError::NoMotifFound {
            restarts,
            best_score,
            threshold,
        } => {
            assert_eq!(restarts, 50);
            assert!(best_score > 0.0);
            assert!(best_score <= threshold);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn random_sequences_score_above_zero_without_controls() {
    let set = random_set(5, 60, 99);
    let config = quick_config().with_restarts(10).with_null_control(0, 1.0);
    let hit = find_motif(&set, 6, &config).unwrap();
    assert!(hit.score > 0.0);
}

#[test]
fn shuffled_controls_sit_below_implanted_score() {
    let set = set_of(&IMPLANTED);
    let config = quick_config();
    let cancel = AtomicBool::new(false);
    let threshold = null_threshold(&set, 6, &config, 7, &cancel).unwrap();
    assert!(threshold > 0.0);
    assert!(threshold < 32.0);
    assert_eq!(null_threshold(&set, 6, &config, 7, &cancel).unwrap(), threshold);

    let off = config.with_null_control(0, 1.0).with_min_total_score(2.5);
    assert_eq!(null_threshold(&set, 6, &off, 7, &cancel).unwrap(), 2.5);
}

#[test]
fn all_negative_totals_report_no_motif() {
    let set = set_of(&DISJOINT);
    let config = SearchConfig::default().with_restarts(20).with_seed(3);
    match find_motif(&set, 6, &config).unwrap_err() {
        GibbsError::NoMotifFound {
            restarts,
            best_score,
            threshold,
        } => {
            assert_eq!(restarts, 20);
            assert!(best_score <= 0.0);
            assert_eq!(threshold, 0.0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn oversized_guess_fails_before_searching() {
    let set = set_of(&IMPLANTED);
    let err = find_motif(&set, 31, &quick_config()).unwrap_err();
    assert!(matches!(err, GibbsError::MotifTooLong { guess: 31, .. }));
}

#[test]
fn halving_rescues_oversized_guess() {
    let set = set_of(&IMPLANTED);
    let hit = find_motif(&set, 48, &quick_config().with_halving(true)).unwrap();
    assert_eq!(hit.start_len, 24);
    assert!(set.is_legal_motif_len(hit.motif_len));
}

#[test]
fn invalid_config_fails_before_searching() {
    let set = set_of(&IMPLANTED);
    let config = quick_config().with_move_probabilities(0.05, -0.1);
    assert!(matches!(
        find_motif(&set, 6, &config),
        Err(GibbsError::InvalidConfig { .. })
    ));
}

#[test]
fn same_seed_same_hit() {
    let set = set_of(&IMPLANTED);
    let config = quick_config().with_restarts(8);
    let a = find_motif(&set, 5, &config).unwrap();
    let b = find_motif(&set, 5, &config).unwrap();
    assert_eq!(a, b);
}

#[test]
fn jitter_varies_start_length_within_bounds() {
    let set = set_of(&IMPLANTED);
    let config = quick_config().with_restarts(10).with_length_jitter(3);
    let hit = find_motif(&set, 6, &config).unwrap();
    assert!((3..=9).contains(&hit.start_len));
}

#[test]
fn cancelled_search_reports_cancellation() {
    let set = set_of(&IMPLANTED);
    let cancel = AtomicBool::new(true);
    assert!(matches!(
        find_motif_with_cancel(&set, 6, &quick_config(), &cancel),
        Err(GibbsError::Cancelled)
    ));
}

// ─── invariants ─────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn windows_stay_in_bounds(
        raw in prop::collection::vec(dna(8..24), 2..5),
        start_len in 1usize..7,
        seed in any::<u64>(),
    ) {
        let set = SequenceSet::from_pairs(
            raw.iter().enumerate().map(|(i, s)| (format!("s{i}"), s.clone())),
        ).unwrap();
        let bgs = backgrounds(&set, PC);
        let model = Model::new(&set, &bgs, PC);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = MotifState::random(&model, start_len, &mut rng);
        prop_assert!(state.is_legal(&set));
        for _ in 0..6 {
            gibbs::sweep(&model, &mut state, &mut rng);
            prop_assert!(state.is_legal(&set));
            moves::shift_pass(&model, &mut state);
            prop_assert!(state.is_legal(&set));
            moves::adjust_length(&model, &mut state);
            prop_assert!(state.is_legal(&set));
        }
        refine::snap_pass(&model, &mut state);
        prop_assert!(state.is_legal(&set));
    }

    #[test]
    fn length_adjustment_never_lowers_total(
        raw in prop::collection::vec(dna(8..24), 2..5),
        start_len in 1usize..7,
        seed in any::<u64>(),
    ) {
        let set = SequenceSet::from_pairs(
            raw.iter().enumerate().map(|(i, s)| (format!("s{i}"), s.clone())),
        ).unwrap();
        let bgs = backgrounds(&set, PC);
        let model = Model::new(&set, &bgs, PC);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = MotifState::random(&model, start_len, &mut rng);
        for _ in 0..4 {
            let before = state.clone();
            match moves::adjust_length(&model, &mut state) {
                Some(_) => prop_assert!(state.total() > before.total()),
                None => prop_assert_eq!(&state, &before),
            }
        }
    }
}

use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::SearchConfig;
use super::convergence::{Convergence, Termination};
use super::gibbs::sweep;
use super::moves::{adjust_length, shift_pass};
use super::refine::refine;
use super::state::{BestSolution, BestTracker, Model, MotifState};
use crate::background::{backgrounds, Background};
use crate::error::{GibbsError, GibbsResult};
use crate::pssm::Pssm;
use crate::seq::SequenceSet;

/// What one restart reports back to the orchestrator.
#[derive(Clone, Debug, PartialEq)]
pub struct RestartOutcome {
    pub best: BestSolution,
    pub start_len: usize,
    pub termination: Termination,
    pub iterations: usize,
    /// Window moves made by Gibbs sweeps over the whole restart.
    pub sweep_changes: usize,
}

/// The winning motif of a search.
#[derive(Clone, Debug, PartialEq)]
pub struct MotifHit {
    /// Window start of the motif in each sequence, in set order.
    pub positions: Vec<usize>,
    pub motif_len: usize,
    /// Sum of the per-sequence leave-one-out log-odds scores.
    pub score: f64,
    /// Majority symbol of each motif column over all windows.
    pub consensus: String,
    /// Index of the restart that produced this hit.
    pub restart: usize,
    pub start_len: usize,
    pub termination: Termination,
    pub iterations: usize,
}

impl MotifHit {
    /// Motif text of each sequence, in set order.
    pub fn windows(&self, set: &SequenceSet) -> Vec<String> {
        set.iter()
            .zip(&self.positions)
            .map(|(seq, &pos)| seq.window_text(pos, self.motif_len))
            .collect()
    }
}

/// Resolve the caller's length guess into the starting motif length.
pub fn starting_motif_len(set: &SequenceSet, guess: usize, halve: bool) -> GibbsResult<usize> {
    if guess == 0 {
        return Err(GibbsError::InvalidMotifLength { len: 0 });
    }
    let mut len = guess;
    if halve {
        while len >= set.min_len() {
            len /= 2;
        }
    }
    if !set.is_legal_motif_len(len) {
        return Err(GibbsError::MotifTooLong {
            guess,
            shortest: set.min_len(),
        });
    }
    Ok(len)
}

/// One independent restart: random start, sampling loop, refinement.
///
/// Returns `None` if `cancel` was raised before the restart finished.
pub fn run_restart<R: Rng + ?Sized>(
    model: &Model<'_>,
    config: &SearchConfig,
    start_len: usize,
    rng: &mut R,
    cancel: &AtomicBool,
) -> Option<RestartOutcome> {
    let mut state = MotifState::random(model, start_len, rng);
    let mut tracker = BestTracker::default();
    tracker.observe(&state);

    let mut convergence = Convergence::new(config.max_iterations, config.plateau_threshold);
    let mut sweep_changes = 0usize;
    let termination = loop {
        if cancel.load(Ordering::Relaxed) {
            return None;
        }

        let changes = sweep(model, &mut state, rng);
        sweep_changes += changes;
        let mut improved = tracker.observe(&state);

        if rng.gen_bool(config.shift_probability) {
            shift_pass(model, &mut state);
            improved |= tracker.observe(&state);
        }
        if rng.gen_bool(config.length_probability) {
            adjust_length(model, &mut state);
            improved |= tracker.observe(&state);
        }

        trace!(
            "iteration {}: {} windows moved, length {}, total {:.4}",
            convergence.iteration() + 1,
            changes,
            state.motif_len(),
            state.total()
        );
        if let Some(reason) = convergence.record(improved) {
            break reason;
        }
    };

    refine(model, &mut state, config.max_refine_rounds);
    tracker.observe(&state);

    let best = tracker.into_best()?;
    Some(RestartOutcome {
        best,
        start_len,
        termination,
        iterations: convergence.iteration(),
        sweep_changes,
    })
}

/// Run the configured number of restarts and return the best motif.
pub fn find_motif(
    set: &SequenceSet,
    guess: usize,
    config: &SearchConfig,
) -> GibbsResult<MotifHit> {
    find_motif_with_cancel(set, guess, config, &AtomicBool::new(false))
}

/// As [`find_motif`], abandoning unfinished restarts once `cancel` is raised.
pub fn find_motif_with_cancel(
    set: &SequenceSet,
    guess: usize,
    config: &SearchConfig,
    cancel: &AtomicBool,
) -> GibbsResult<MotifHit> {
    config.validate()?;
    let start_len = starting_motif_len(set, guess, config.halve_oversized_guess)?;
    let base_seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());

    info!(
        "searching {} sequences: {} restarts, start length {}, seed {}",
        set.len(),
        config.restarts,
        start_len,
        base_seed
    );

    let outcomes = run_restarts(set, start_len, config, base_seed, cancel);
    let (restart, completed, outcome) = select_best(outcomes)?;
    info!(
        "restart {restart} of {completed} wins: length {}, score {:.4}",
        outcome.best.motif_len, outcome.best.score
    );

    let threshold = if outcome.best.score > config.min_total_score {
        null_threshold(set, start_len, config, base_seed, cancel)?
    } else {
        config.min_total_score
    };
    if outcome.best.score <= threshold {
        return Err(GibbsError::NoMotifFound {
            restarts: completed,
            best_score: outcome.best.score,
            threshold,
        });
    }

    let consensus = Pssm::profile(
        set,
        &outcome.best.positions,
        outcome.best.motif_len,
        &Background::uniform(),
        config.pseudocount,
    )
    .consensus();
    Ok(MotifHit {
        positions: outcome.best.positions,
        motif_len: outcome.best.motif_len,
        score: outcome.best.score,
        consensus,
        restart,
        start_len: outcome.start_len,
        termination: outcome.termination,
        iterations: outcome.iterations,
    })
}

/// Every restart of one search over `set`, in restart order. `None` marks a restart
/// cut short by `cancel`.
fn run_restarts(
    set: &SequenceSet,
    start_len: usize,
    config: &SearchConfig,
    base_seed: u64,
    cancel: &AtomicBool,
) -> Vec<Option<RestartOutcome>> {
    let bgs = backgrounds(set, config.pseudocount);
    let model = Model::new(set, &bgs, config.pseudocount);
    par_map_indices!(config.restarts, |k: usize| {
        let mut rng = StdRng::seed_from_u64(restart_seed(base_seed, k));
        let len = jittered_len(set, start_len, config.length_jitter, &mut rng);
        let outcome = run_restart(&model, config, len, &mut rng, cancel);
        if let Some(o) = &outcome {
            debug!(
                "restart {k}: {:?} after {} iterations, length {}, score {:.4}",
                o.termination, o.iterations, o.best.motif_len, o.best.score
            );
        }
        outcome
    })
}

/// Highest score wins; the lowest restart index wins ties. Returns the winning
/// index, the number of completed restarts and the winner.
fn select_best(
    outcomes: Vec<Option<RestartOutcome>>,
) -> GibbsResult<(usize, usize, RestartOutcome)> {
    let mut completed = 0usize;
    let mut winner: Option<(usize, RestartOutcome)> = None;
    for (k, outcome) in outcomes.into_iter().enumerate() {
        let Some(outcome) = outcome else {
            continue;
        };
        completed += 1;
        let better = match &winner {
            Some((_, w)) => outcome.best.score > w.best.score,
            None => true,
        };
        if better {
            winner = Some((k, outcome));
        }
    }
    let (restart, outcome) = winner.ok_or(GibbsError::Cancelled)?;
    Ok((restart, completed, outcome))
}

/// Total the winner has to beat: `min_total_score`, raised to `null_margin` times the
/// median best total of the same search run over shuffled copies of the set.
///
/// Shuffling keeps each sequence's composition, so the controls show how far the
/// sampler climbs on chance alignments alone.
pub fn null_threshold(
    set: &SequenceSet,
    start_len: usize,
    config: &SearchConfig,
    base_seed: u64,
    cancel: &AtomicBool,
) -> GibbsResult<f64> {
    if config.null_shuffles == 0 {
        return Ok(config.min_total_score);
    }
    let null_seed = base_seed ^ NULL_SEED_SALT;
    let mut shuffle_rng = StdRng::seed_from_u64(null_seed);
    let mut bests = Vec::with_capacity(config.null_shuffles);
    for j in 0..config.null_shuffles {
        let shuffled = set.shuffled(&mut shuffle_rng);
        let outcomes = run_restarts(
            &shuffled,
            start_len,
            config,
            restart_seed(null_seed, j),
            cancel,
        );
        let (_, _, best) = select_best(outcomes)?;
        debug!("shuffled control {j}: score {:.4}", best.best.score);
        bests.push(best.best.score);
    }

    let median = median(&mut bests);
    let threshold = config.min_total_score.max(config.null_margin * median);
    info!("shuffled controls: median {median:.4}, threshold {threshold:.4}");
    Ok(threshold)
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

const NULL_SEED_SALT: u64 = 0xD1B5_4A32_D192_ED03;

fn restart_seed(base: u64, restart: usize) -> u64 {
    base ^ (restart as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn jittered_len<R: Rng + ?Sized>(
    set: &SequenceSet,
    start_len: usize,
    jitter: usize,
    rng: &mut R,
) -> usize {
    if jitter == 0 {
        return start_len;
    }
    let lo = start_len.saturating_sub(jitter).max(1);
    let hi = (start_len + jitter).min(set.min_len() - 1);
    rng.gen_range(lo..=hi)
}

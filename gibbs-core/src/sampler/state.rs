use rand::Rng;

use crate::background::Background;
use crate::pssm::Pssm;
use crate::seq::SequenceSet;

/// Read-only inputs shared by every restart of one search.
#[derive(Clone, Copy, Debug)]
pub struct Model<'a> {
    set: &'a SequenceSet,
    backgrounds: &'a [Background],
    pseudocount: f64,
}

impl<'a> Model<'a> {
    pub fn new(set: &'a SequenceSet, backgrounds: &'a [Background], pseudocount: f64) -> Self {
        assert_eq!(
            set.len(),
            backgrounds.len(),
            "one background per sequence is required"
        );
        Self {
            set,
            backgrounds,
            pseudocount,
        }
    }

    pub fn set(&self) -> &'a SequenceSet {
        self.set
    }

    pub fn num_seqs(&self) -> usize {
        self.set.len()
    }

    /// Leave-one-out matrix for sequence `held_out`.
    pub fn pssm(&self, positions: &[usize], motif_len: usize, held_out: usize) -> Pssm {
        Pssm::build(
            self.set,
            positions,
            motif_len,
            held_out,
            &self.backgrounds[held_out],
            self.pseudocount,
        )
    }

    /// Score of sequence `i`'s current window under its leave-one-out matrix.
    pub fn score(&self, positions: &[usize], motif_len: usize, i: usize) -> f64 {
        self.pssm(positions, motif_len, i)
            .score_window(self.set.get(i).codes(), positions[i])
    }

    pub fn score_all(&self, positions: &[usize], motif_len: usize) -> Vec<f64> {
        (0..self.set.len())
            .map(|i| self.score(positions, motif_len, i))
            .collect()
    }
}

/// Mutable search state of one restart: a window per sequence sharing one length,
/// plus the cached per-sequence scores.
#[derive(Clone, Debug, PartialEq)]
pub struct MotifState {
    pub(crate) positions: Vec<usize>,
    pub(crate) motif_len: usize,
    pub(crate) scores: Vec<f64>,
}

impl MotifState {
    pub fn new(model: &Model<'_>, positions: Vec<usize>, motif_len: usize) -> Self {
        let scores = model.score_all(&positions, motif_len);
        let state = Self {
            positions,
            motif_len,
            scores,
        };
        debug_assert!(state.is_legal(model.set()));
        state
    }

    /// Uniformly random window in every sequence.
    pub fn random<R: Rng + ?Sized>(model: &Model<'_>, motif_len: usize, rng: &mut R) -> Self {
        let positions = model
            .set()
            .iter()
            .map(|seq| rng.gen_range(0..seq.num_windows(motif_len)))
            .collect();
        Self::new(model, positions, motif_len)
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn motif_len(&self) -> usize {
        self.motif_len
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn total(&self) -> f64 {
        self.scores.iter().sum()
    }

    /// Recompute every cached score against the current windows.
    pub fn rescore(&mut self, model: &Model<'_>) {
        self.scores = model.score_all(&self.positions, self.motif_len);
    }

    /// Every window lies inside its sequence and the length is legal for the set.
    pub fn is_legal(&self, set: &SequenceSet) -> bool {
        set.is_legal_motif_len(self.motif_len)
            && self.positions.len() == set.len()
            && set
                .iter()
                .zip(&self.positions)
                .all(|(seq, &pos)| pos + self.motif_len <= seq.len())
    }
}

/// The highest-scoring configuration seen by one restart.
#[derive(Clone, Debug, PartialEq)]
pub struct BestSolution {
    pub positions: Vec<usize>,
    pub motif_len: usize,
    pub score: f64,
}

#[derive(Clone, Debug, Default)]
pub struct BestTracker {
    best: Option<BestSolution>,
}

impl BestTracker {
    /// Keep `state` if its total beats the best so far. Returns whether it did.
    pub fn observe(&mut self, state: &MotifState) -> bool {
        let total = state.total();
        let improves = match &self.best {
            Some(best) => total > best.score,
            None => true,
        };
        if improves {
            self.best = Some(BestSolution {
                positions: state.positions.clone(),
                motif_len: state.motif_len,
                score: total,
            });
        }
        improves
    }

    pub fn best(&self) -> Option<&BestSolution> {
        self.best.as_ref()
    }

    pub fn into_best(self) -> Option<BestSolution> {
        self.best
    }
}

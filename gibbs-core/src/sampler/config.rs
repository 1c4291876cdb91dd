use crate::error::{GibbsError, GibbsResult};

pub const DEFAULT_RESTARTS: usize = 200;
pub const DEFAULT_MAX_ITERATIONS: usize = 2000;
pub const DEFAULT_PLATEAU: usize = 150;
pub const DEFAULT_SHIFT_PROBABILITY: f64 = 0.05;
pub const DEFAULT_LENGTH_PROBABILITY: f64 = 0.10;
pub const DEFAULT_PSEUDOCOUNT: f64 = 0.125;
pub const DEFAULT_MAX_REFINE_ROUNDS: usize = 64;
pub const DEFAULT_NULL_SHUFFLES: usize = 4;
pub const DEFAULT_NULL_MARGIN: f64 = 1.3;

/// Knobs of a motif search. Move probabilities are drawn once per outer iteration.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Independent restarts; the best one wins.
    pub restarts: usize,
    /// Base seed for the per-restart random streams. `None` draws one per search.
    pub seed: Option<u64>,
    pub max_iterations: usize,
    /// Iterations without a better total before a restart stops.
    pub plateau_threshold: usize,
    pub shift_probability: f64,
    pub length_probability: f64,
    pub pseudocount: f64,
    /// Halve a motif length guess that does not fit instead of failing.
    pub halve_oversized_guess: bool,
    /// Each restart starts from a length drawn in `guess ± length_jitter`.
    pub length_jitter: usize,
    /// A winning total at or below this is reported as no motif found.
    pub min_total_score: f64,
    /// Shuffled copies of the set searched as a null; 0 turns the control off.
    pub null_shuffles: usize,
    /// The winner must exceed `null_margin` times the median shuffled best.
    pub null_margin: f64,
    pub max_refine_rounds: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            restarts: DEFAULT_RESTARTS,
            seed: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            plateau_threshold: DEFAULT_PLATEAU,
            shift_probability: DEFAULT_SHIFT_PROBABILITY,
            length_probability: DEFAULT_LENGTH_PROBABILITY,
            pseudocount: DEFAULT_PSEUDOCOUNT,
            halve_oversized_guess: false,
            length_jitter: 0,
            min_total_score: 0.0,
            null_shuffles: DEFAULT_NULL_SHUFFLES,
            null_margin: DEFAULT_NULL_MARGIN,
            max_refine_rounds: DEFAULT_MAX_REFINE_ROUNDS,
        }
    }
}

impl SearchConfig {
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_plateau_threshold(mut self, plateau_threshold: usize) -> Self {
        self.plateau_threshold = plateau_threshold;
        self
    }

    pub fn with_move_probabilities(mut self, shift: f64, length: f64) -> Self {
        self.shift_probability = shift;
        self.length_probability = length;
        self
    }

    pub fn with_pseudocount(mut self, pseudocount: f64) -> Self {
        self.pseudocount = pseudocount;
        self
    }

    pub fn with_halving(mut self, halve: bool) -> Self {
        self.halve_oversized_guess = halve;
        self
    }

    pub fn with_length_jitter(mut self, jitter: usize) -> Self {
        self.length_jitter = jitter;
        self
    }

    pub fn with_min_total_score(mut self, min_total_score: f64) -> Self {
        self.min_total_score = min_total_score;
        self
    }

    pub fn with_null_control(mut self, shuffles: usize, margin: f64) -> Self {
        self.null_shuffles = shuffles;
        self.null_margin = margin;
        self
    }

    pub fn validate(&self) -> GibbsResult<()> {
        if self.restarts == 0 {
            return Err(invalid("restarts must be > 0"));
        }
        if self.max_iterations == 0 {
            return Err(invalid("max_iterations must be > 0"));
        }
        if self.plateau_threshold == 0 {
            return Err(invalid("plateau_threshold must be > 0"));
        }
        if self.max_refine_rounds == 0 {
            return Err(invalid("max_refine_rounds must be > 0"));
        }
        for (name, p) in [
            ("shift_probability", self.shift_probability),
            ("length_probability", self.length_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(&format!("{name} must be within [0, 1] (got {p})")));
            }
        }
        if !self.pseudocount.is_finite() || self.pseudocount <= 0.0 {
            return Err(invalid("pseudocount must be a finite value > 0"));
        }
        if self.min_total_score.is_nan() {
            return Err(invalid("min_total_score must not be NaN"));
        }
        if !self.null_margin.is_finite() || self.null_margin < 1.0 {
            return Err(invalid("null_margin must be a finite value >= 1"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> GibbsError {
    GibbsError::InvalidConfig {
        msg: msg.to_string(),
    }
}

/// Why a restart's sampling loop stopped. Both are normal outcomes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The best total did not improve for `plateau_threshold` iterations.
    Plateau,
    /// `max_iterations` iterations ran.
    IterationCap,
}

#[derive(Clone, Debug)]
pub struct Convergence {
    max_iterations: usize,
    plateau_threshold: usize,
    iteration: usize,
    plateau: usize,
}

impl Convergence {
    pub fn new(max_iterations: usize, plateau_threshold: usize) -> Self {
        Self {
            max_iterations,
            plateau_threshold,
            iteration: 0,
            plateau: 0,
        }
    }

    /// Record one finished iteration. Returns the reason to stop, if any.
    /// A plateau wins when both limits are reached on the same iteration.
    pub fn record(&mut self, improved: bool) -> Option<Termination> {
        self.iteration += 1;
        if improved {
            self.plateau = 0;
        } else {
            self.plateau += 1;
        }

        if self.plateau >= self.plateau_threshold {
            Some(Termination::Plateau)
        } else if self.iteration >= self.max_iterations {
            Some(Termination::IterationCap)
        } else {
            None
        }
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn plateau(&self) -> usize {
        self.plateau
    }
}

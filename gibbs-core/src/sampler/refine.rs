use log::trace;

use super::moves::adjust_length;
use super::state::{Model, MotifState};

/// Move every window, in sequence order, to the best-scoring offset under its
/// leave-one-out matrix. Ties keep the lowest offset. Returns the number of moves.
pub fn snap_pass(model: &Model<'_>, state: &mut MotifState) -> usize {
    let mut moved = 0usize;
    for i in 0..model.num_seqs() {
        let pssm = model.pssm(&state.positions, state.motif_len, i);
        let scores = pssm.scan(model.set().get(i).codes());

        let mut best = 0usize;
        for (offset, &s) in scores.iter().enumerate().skip(1) {
            if s > scores[best] {
                best = offset;
            }
        }
        if best != state.positions[i] {
            state.positions[i] = best;
            moved += 1;
        }
        state.scores[i] = scores[best];
    }
    state.rescore(model);
    moved
}

/// Alternate snap passes with length adjustment until a full round changes nothing
/// or `max_rounds` rounds ran. Returns the number of rounds used.
pub fn refine(model: &Model<'_>, state: &mut MotifState, max_rounds: usize) -> usize {
    for round in 1..=max_rounds {
        let mut changed = snap_pass(model, state) > 0;
        while let Some(mv) = adjust_length(model, state) {
            trace!("refine round {round}: {mv:?} -> length {}", state.motif_len);
            changed = true;
        }
        if !changed {
            return round;
        }
    }
    max_rounds
}

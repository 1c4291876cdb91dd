use super::state::{Model, MotifState};
use crate::seq::SequenceSet;

/// Try moving each window one step left, then one step right, keeping a step only
/// when it raises that sequence's own leave-one-out score. Returns the number of
/// windows that moved.
pub fn shift_pass(model: &Model<'_>, state: &mut MotifState) -> usize {
    let len = state.motif_len;
    let mut moved = 0usize;
    for i in 0..model.num_seqs() {
        // the held-out matrix does not depend on window i itself
        let pssm = model.pssm(&state.positions, len, i);
        let codes = model.set().get(i).codes();

        let start = state.positions[i];
        let mut pos = start;
        let mut score = pssm.score_window(codes, pos);

        if pos > 0 {
            let left = pssm.score_window(codes, pos - 1);
            if left > score {
                pos -= 1;
                score = left;
            }
        }
        if pos + 1 + len <= codes.len() {
            let right = pssm.score_window(codes, pos + 1);
            if right > score {
                pos += 1;
                score = right;
            }
        }

        if pos != start {
            state.positions[i] = pos;
            state.scores[i] = score;
            moved += 1;
        }
    }
    state.rescore(model);
    moved
}

/// Whole-motif length changes, tried in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthMove {
    ShrinkRight,
    ShrinkLeft,
    ShrinkBoth,
    GrowLeft,
    GrowRight,
    GrowBoth,
}

impl LengthMove {
    pub const ALL: [LengthMove; 6] = [
        LengthMove::ShrinkRight,
        LengthMove::ShrinkLeft,
        LengthMove::ShrinkBoth,
        LengthMove::GrowLeft,
        LengthMove::GrowRight,
        LengthMove::GrowBoth,
    ];

    /// Positions and length after the move, or `None` when some window would leave
    /// its sequence or the length would become illegal for the set.
    pub fn apply(
        self,
        set: &SequenceSet,
        positions: &[usize],
        motif_len: usize,
    ) -> Option<(Vec<usize>, usize)> {
        let left_room = positions.iter().all(|&p| p > 0);
        let right_room = set
            .iter()
            .zip(positions)
            .all(|(seq, &p)| p + motif_len < seq.len());
        let shifted = || positions.iter().map(|&p| p + 1).collect::<Vec<_>>();
        let unshifted = || positions.iter().map(|&p| p - 1).collect::<Vec<_>>();

        let (new_positions, new_len) = match self {
            LengthMove::ShrinkRight if motif_len > 1 => (positions.to_vec(), motif_len - 1),
            LengthMove::ShrinkLeft if motif_len > 1 => (shifted(), motif_len - 1),
            LengthMove::ShrinkBoth if motif_len > 2 => (shifted(), motif_len - 2),
            LengthMove::GrowLeft if left_room => (unshifted(), motif_len + 1),
            LengthMove::GrowRight if right_room => (positions.to_vec(), motif_len + 1),
            LengthMove::GrowBoth if left_room && right_room => (unshifted(), motif_len + 2),
            _ => return None,
        };
        if !set.is_legal_motif_len(new_len) {
            return None;
        }
        Some((new_positions, new_len))
    }
}

/// Evaluate every legal [`LengthMove`] and adopt the best one if its total beats the
/// current total. Returns the adopted move; on `None` the state is untouched.
pub fn adjust_length(model: &Model<'_>, state: &mut MotifState) -> Option<LengthMove> {
    let current = state.total();
    let mut best: Option<(LengthMove, MotifState)> = None;

    for mv in LengthMove::ALL {
        let Some((positions, len)) = mv.apply(model.set(), &state.positions, state.motif_len)
        else {
            continue;
        };
        let candidate = MotifState::new(model, positions, len);
        let beats = match &best {
            Some((_, b)) => candidate.total() > b.total(),
            None => true,
        };
        if beats {
            best = Some((mv, candidate));
        }
    }

    match best {
        Some((mv, candidate)) if candidate.total() > current => {
            *state = candidate;
            Some(mv)
        }
        _ => None,
    }
}

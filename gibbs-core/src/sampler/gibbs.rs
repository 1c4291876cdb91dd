use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use super::state::{Model, MotifState};

/// One Gibbs sweep: resample every sequence's window in index order.
///
/// Sequence `i` is scored against the matrix built from all other windows, negative
/// scores are clipped to zero and the new start is drawn in proportion to the
/// remaining weight. Returns the number of sequences whose window moved.
pub fn sweep<R: Rng + ?Sized>(model: &Model<'_>, state: &mut MotifState, rng: &mut R) -> usize {
    let mut changed = 0usize;
    for i in 0..model.num_seqs() {
        let pssm = model.pssm(&state.positions, state.motif_len, i);
        let codes = model.set().get(i).codes();
        let weights: Vec<f64> = pssm.scan(codes).into_iter().map(|s| s.max(0.0)).collect();

        let pos = draw_offset(&weights, rng);
        if pos != state.positions[i] {
            state.positions[i] = pos;
            state.scores[i] = pssm.score_window(codes, pos);
            changed += 1;
        }
    }
    // later draws changed the matrices the earlier scores were taken against
    state.rescore(model);
    changed
}

/// Weighted draw over offsets; uniform when no offset carries positive weight.
pub(crate) fn draw_offset<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    debug_assert!(!weights.is_empty());
    if weights.iter().any(|&w| w > 0.0) {
        if let Ok(dist) = WeightedIndex::new(weights) {
            return dist.sample(rng);
        }
    }
    rng.gen_range(0..weights.len())
}

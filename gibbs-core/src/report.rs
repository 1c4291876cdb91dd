use std::fmt;

use crate::sampler::MotifHit;
use crate::seq::SequenceSet;

/// Plain-text summary of a search result: parameters, score, and one line per
/// sequence with the motif text, its 1-based inclusive location and the sequence id.
pub struct MotifReport<'a> {
    pub source: &'a str,
    pub guess: usize,
    pub set: &'a SequenceSet,
    pub hit: &'a MotifHit,
}

impl fmt::Display for MotifReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Gibbs motif sampler output:")?;
        writeln!(f)?;
        writeln!(f, "\tInput file          : {}", self.source)?;
        writeln!(f, "\tInitial motif length: {}", self.guess)?;
        writeln!(f, "\tFinal motif length  : {}", self.hit.motif_len)?;
        writeln!(f, "\tFinal score         : {:.6}", self.hit.score)?;
        writeln!(f, "\tConsensus           : {}", self.hit.consensus)?;
        writeln!(f)?;
        writeln!(f, "Motif sequences and locations:")?;
        writeln!(f)?;
        for (seq, &pos) in self.set.iter().zip(&self.hit.positions) {
            writeln!(
                f,
                "{}\t{}-{}\t{}",
                seq.window_text(pos, self.hit.motif_len),
                pos + 1,
                pos + self.hit.motif_len,
                seq.id()
            )?;
        }
        Ok(())
    }
}

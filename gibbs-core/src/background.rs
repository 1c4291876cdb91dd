use crate::alphabet::ALPHABET_SIZE;
use crate::seq::{Sequence, SequenceSet};

/// Symbol frequencies of one sequence, used as the null model for log-odds scoring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Background {
    freqs: [f64; ALPHABET_SIZE],
}

impl Background {
    /// `f[c] = (count[c] + pc) / (len + 4 * pc)`.
    pub fn from_codes(codes: &[u8], pseudocount: f64) -> Self {
        let mut freqs = [pseudocount; ALPHABET_SIZE];
        for &c in codes {
            freqs[c as usize] += 1.0;
        }
        let total: f64 = freqs.iter().sum();
        for f in freqs.iter_mut() {
            *f /= total;
        }
        Self { freqs }
    }

    pub fn of(seq: &Sequence, pseudocount: f64) -> Self {
        Self::from_codes(seq.codes(), pseudocount)
    }

    pub fn uniform() -> Self {
        Self {
            freqs: [1.0 / ALPHABET_SIZE as f64; ALPHABET_SIZE],
        }
    }

    #[inline]
    pub fn freq(&self, code: u8) -> f64 {
        self.freqs[code as usize]
    }

    pub fn freqs(&self) -> &[f64; ALPHABET_SIZE] {
        &self.freqs
    }
}

/// One background per sequence, in set order.
pub fn backgrounds(set: &SequenceSet, pseudocount: f64) -> Vec<Background> {
    set.iter().map(|s| Background::of(s, pseudocount)).collect()
}

pub mod record;

pub use record::SeqRecord;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::alphabet;
use crate::error::{GibbsError, GibbsResult};


/// An encoded nucleotide sequence. Codes are always in `0..4`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sequence {
    id: Box<str>,
    codes: Vec<u8>,
}

impl Sequence {
    pub fn new(id: impl Into<Box<str>>, bytes: &[u8]) -> GibbsResult<Self> {
        let id = id.into();
        if bytes.is_empty() {
            return Err(GibbsError::EmptySequence { id: id.into() });
        }
        let codes = alphabet::encode(bytes).map_err(|(b, pos)| GibbsError::InvalidChar {
            id: id.to_string(),
            ch: b as char,
            pos,
        })?;
        Ok(Self { id, codes })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn codes(&self) -> &[u8] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Number of window start offsets for a motif of length `motif_len`.
    pub fn num_windows(&self, motif_len: usize) -> usize {
        self.codes.len().saturating_sub(motif_len) + 1
    }

    /// Nucleotide text of the window `[start, start + motif_len)`.
    pub fn window_text(&self, start: usize, motif_len: usize) -> String {
        let bytes = alphabet::decode(&self.codes[start..start + motif_len]);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Same id and symbol composition, symbols in random order.
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut codes = self.codes.clone();
        codes.shuffle(rng);
        Self {
            id: self.id.clone(),
            codes,
        }
    }
}

/// Ordered sequences searched together. Index `i` addresses the same sequence for the
/// whole lifetime of a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceSet {
    seqs: Vec<Sequence>,
    min_len: usize,
}

impl SequenceSet {
    pub fn new(seqs: Vec<Sequence>) -> GibbsResult<Self> {
        if seqs.len() < 2 {
            return Err(GibbsError::TooFewSequences { n: seqs.len() });
        }
        if let Some(short) = seqs.iter().find(|s| s.len() < 2) {
            return Err(GibbsError::SequenceTooShort {
                id: short.id().to_string(),
                len: short.len(),
            });
        }
        let min_len = seqs.iter().map(Sequence::len).min().unwrap_or(0);
        Ok(Self { seqs, min_len })
    }

    pub fn from_records(records: &[SeqRecord]) -> GibbsResult<Self> {
        let seqs = records
            .iter()
            .map(|r| Sequence::new(r.id.clone(), &r.seq))
            .collect::<GibbsResult<Vec<_>>>()?;
        Self::new(seqs)
    }

    /// Build a set from `(id, sequence)` pairs.
    pub fn from_pairs<I, S, B>(pairs: I) -> GibbsResult<Self>
    where
        I: IntoIterator<Item = (S, B)>,
        S: Into<Box<str>>,
        B: AsRef<[u8]>,
    {
        let seqs = pairs
            .into_iter()
            .map(|(id, seq)| Sequence::new(id, seq.as_ref()))
            .collect::<GibbsResult<Vec<_>>>()?;
        Self::new(seqs)
    }

    pub fn len(&self) -> usize {
        self.seqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seqs.is_empty()
    }

    pub fn get(&self, i: usize) -> &Sequence {
        &self.seqs[i]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sequence> {
        self.seqs.iter()
    }

    pub fn as_slice(&self) -> &[Sequence] {
        &self.seqs
    }

    /// Length of the shortest sequence; every motif length must stay strictly below it.
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    pub fn is_legal_motif_len(&self, motif_len: usize) -> bool {
        motif_len >= 1 && motif_len < self.min_len
    }

    /// Shuffle every sequence independently. Lengths and per-sequence composition are
    /// kept, so any shared motif is destroyed while the background stays the same.
    pub fn shuffled<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        Self {
            seqs: self.seqs.iter().map(|s| s.shuffled(rng)).collect(),
            min_len: self.min_len,
        }
    }
}

impl<'a> IntoIterator for &'a SequenceSet {
    type Item = &'a Sequence;
    type IntoIter = std::slice::Iter<'a, Sequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.seqs.iter()
    }
}

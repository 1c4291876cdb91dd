use crate::alphabet::{ALPHABET_SIZE, SYMBOLS};
use crate::background::Background;
use crate::seq::SequenceSet;


/// Position-specific scoring matrix: one row of `log2` odds per motif column.
#[derive(Clone, Debug, PartialEq)]
pub struct Pssm {
    rows: Vec<[f64; ALPHABET_SIZE]>,
}

impl Pssm {
    #[cfg(test)]
    pub(crate) fn from_rows(rows: Vec<[f64; ALPHABET_SIZE]>) -> Self {
        Self { rows }
    }

    /// Build the leave-one-out matrix for sequence `held_out`.
    ///
    /// Every other sequence contributes its window `[positions[i], positions[i] + motif_len)`.
    /// `positions[held_out]` is never read, so it may be stale. Counts start at
    /// `pseudocount`, rows are normalised and then scored against `background`,
    /// which should be the held-out sequence's own background.
    pub fn build(
        set: &SequenceSet,
        positions: &[usize],
        motif_len: usize,
        held_out: usize,
        background: &Background,
        pseudocount: f64,
    ) -> Self {
        Self::from_windows(
            set,
            positions,
            motif_len,
            Some(held_out),
            background,
            pseudocount,
        )
    }

    /// Matrix over the windows of every sequence, none held out.
    pub fn profile(
        set: &SequenceSet,
        positions: &[usize],
        motif_len: usize,
        background: &Background,
        pseudocount: f64,
    ) -> Self {
        Self::from_windows(set, positions, motif_len, None, background, pseudocount)
    }

    fn from_windows(
        set: &SequenceSet,
        positions: &[usize],
        motif_len: usize,
        skip: Option<usize>,
        background: &Background,
        pseudocount: f64,
    ) -> Self {
        debug_assert_eq!(positions.len(), set.len());
        debug_assert!(motif_len >= 1);

        let mut rows = vec![[pseudocount; ALPHABET_SIZE]; motif_len];
        for (i, seq) in set.iter().enumerate() {
            if skip == Some(i) {
                continue;
            }
            let start = positions[i];
            let window = &seq.codes()[start..start + motif_len];
            for (row, &code) in rows.iter_mut().zip(window) {
                row[code as usize] += 1.0;
            }
        }

        for row in rows.iter_mut() {
            let total: f64 = row.iter().sum();
            for (code, cell) in row.iter_mut().enumerate() {
                *cell = (*cell / (total * background.freq(code as u8))).log2();
            }
        }

        Self { rows }
    }

    pub fn motif_len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[[f64; ALPHABET_SIZE]] {
        &self.rows
    }

    #[inline]
    pub fn get(&self, pos: usize, code: u8) -> f64 {
        self.rows[pos][code as usize]
    }

    /// Score of the window of `codes` starting at `offset`.
    #[inline]
    pub fn score_window(&self, codes: &[u8], offset: usize) -> f64 {
        self.rows
            .iter()
            .zip(&codes[offset..offset + self.rows.len()])
            .map(|(row, &code)| row[code as usize])
            .sum()
    }

    /// Scores of every valid window start, `0..=codes.len() - motif_len`.
    pub fn scan(&self, codes: &[u8]) -> Vec<f64> {
        let len = self.rows.len();
        if codes.len() < len {
            return Vec::new();
        }
        (0..=codes.len() - len)
            .map(|offset| self.score_window(codes, offset))
            .collect()
    }

    /// Highest-scoring symbol per column; ties keep the first symbol in `ACGT` order.
    pub fn consensus(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                let mut best = 0usize;
                for code in 1..ALPHABET_SIZE {
                    if row[code] > row[best] {
                        best = code;
                    }
                }
                SYMBOLS[best] as char
            })
            .collect()
    }
}

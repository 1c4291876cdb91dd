use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GibbsError {
    #[error("invalid character '{ch}' at position {pos} in sequence '{id}'")]
    InvalidChar { id: String, ch: char, pos: usize },

    #[error("sequence '{id}' is empty")]
    EmptySequence { id: String },

    #[error("need at least 2 sequences to find a shared motif (got {n})")]
    TooFewSequences { n: usize },

    #[error("sequence '{id}' has length {len}; at least 2 symbols are required")]
    SequenceTooShort { id: String, len: usize },

    #[error("motif length guess {guess} does not fit the shortest sequence (length {shortest})")]
    MotifTooLong { guess: usize, shortest: usize },

    #[error("invalid motif length: {len}")]
    InvalidMotifLength { len: usize },

    #[error("invalid search configuration: {msg}")]
    InvalidConfig { msg: String },

    #[error("no motif found ({restarts} restarts, best {best_score:.4}, needed > {threshold:.4})")]
    NoMotifFound {
        restarts: usize,
        best_score: f64,
        threshold: f64,
    },

    #[error("search was cancelled before any restart completed")]
    Cancelled,

    #[error("fasta format error at line {line}: {msg}")]
    FastaFormat { msg: &'static str, line: usize },

    #[error("fasta io error: {0}")]
    FastaIo(#[from] io::Error),
}

pub type GibbsResult<T> = Result<T, GibbsError>;

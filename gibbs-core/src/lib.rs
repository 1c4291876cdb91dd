#[macro_use]
mod par;

pub mod alphabet;
pub mod background;
pub mod error;
pub mod io;
pub mod pssm;
pub mod report;
pub mod sampler;
pub mod seq;

pub use error::{GibbsError, GibbsResult};
pub use sampler::{find_motif, MotifHit, SearchConfig, Termination};
pub use seq::{Sequence, SequenceSet};

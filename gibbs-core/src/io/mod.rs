pub mod fasta;

pub use fasta::{read_fasta_from_path, read_fasta_from_reader, read_sequence_set, FastaReader};

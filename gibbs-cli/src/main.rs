use std::process::ExitCode;

use clap::Parser;
use log::{info, warn};

use gibbs_core::io::read_sequence_set;
use gibbs_core::report::MotifReport;
use gibbs_core::sampler::config::{
    DEFAULT_LENGTH_PROBABILITY, DEFAULT_MAX_ITERATIONS, DEFAULT_NULL_MARGIN,
    DEFAULT_NULL_SHUFFLES, DEFAULT_PLATEAU, DEFAULT_PSEUDOCOUNT, DEFAULT_RESTARTS,
    DEFAULT_SHIFT_PROBABILITY,
};
use gibbs_core::{find_motif, GibbsResult, SearchConfig};

#[derive(Debug, Parser)]
#[command(version, about = "Gibbs sampling motif finder", long_about = None)]
struct Cli {
    /// FastA file with the sequences to search
    fasta: String,

    /// Initial guess of the motif length
    motif_len: usize,

    /// Number of independent restarts
    #[arg(short, long, default_value_t = DEFAULT_RESTARTS)]
    restarts: usize,

    /// Base seed; omit for a random run
    #[arg(short, long)]
    seed: Option<u64>,

    /// Iteration cap per restart
    #[arg(short = 'i', long = "max-iterations", default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Iterations without improvement before a restart stops
    #[arg(short, long, default_value_t = DEFAULT_PLATEAU)]
    plateau: usize,

    /// Per-iteration probability of a shift pass
    #[arg(long = "shift-prob", default_value_t = DEFAULT_SHIFT_PROBABILITY)]
    shift_prob: f64,

    /// Per-iteration probability of a length move
    #[arg(long = "length-prob", default_value_t = DEFAULT_LENGTH_PROBABILITY)]
    length_prob: f64,

    /// Pseudocount added to every PSSM and background cell
    #[arg(long, default_value_t = DEFAULT_PSEUDOCOUNT)]
    pseudocount: f64,

    /// Halve an oversized motif length guess until it fits the shortest sequence
    /// (default: reject the guess with an error)
    #[arg(long)]
    halve: bool,

    /// Randomly vary each restart's starting length by up to this much
    #[arg(short = 'j', long, default_value_t = 0)]
    jitter: usize,

    /// Report no motif when the best total is at or below this
    #[arg(long = "min-score", default_value_t = 0.0)]
    min_score: f64,

    /// Shuffled copies of the input searched as a null (0 disables)
    #[arg(long = "null-shuffles", default_value_t = DEFAULT_NULL_SHUFFLES)]
    null_shuffles: usize,

    /// Factor by which the best total must exceed the median shuffled total
    #[arg(long = "null-margin", default_value_t = DEFAULT_NULL_MARGIN)]
    null_margin: f64,

    /// Worker threads (default: one per core)
    #[arg(short = 't', long)]
    threads: Option<usize>,
}

impl Cli {
    fn search_config(&self) -> SearchConfig {
        let config = SearchConfig::default()
            .with_restarts(self.restarts)
            .with_max_iterations(self.max_iterations)
            .with_plateau_threshold(self.plateau)
            .with_move_probabilities(self.shift_prob, self.length_prob)
            .with_pseudocount(self.pseudocount)
            .with_halving(self.halve)
            .with_length_jitter(self.jitter)
            .with_min_total_score(self.min_score)
            .with_null_control(self.null_shuffles, self.null_margin);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn run(cli: &Cli) -> GibbsResult<()> {
    let set = read_sequence_set(&cli.fasta)?;
    info!("read {} sequences from {}", set.len(), cli.fasta);

    let hit = find_motif(&set, cli.motif_len, &cli.search_config())?;
    let report = MotifReport {
        source: &cli.fasta,
        guess: cli.motif_len,
        set: &set,
        hit: &hit,
    };
    print!("{report}");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(threads) = cli.threads {
        if let Err(err) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            warn!("could not size thread pool: {err}");
        }
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("gibbs: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_core_config() {
        let cli = Cli::try_parse_from(["gibbs", "sites.fasta", "8"]).unwrap();
        assert_eq!(cli.motif_len, 8);
        let config = cli.search_config();
        let default = SearchConfig::default();
        assert_eq!(config.restarts, default.restarts);
        assert_eq!(config.plateau_threshold, default.plateau_threshold);
        assert_eq!(config.seed, None);
        assert!(!config.halve_oversized_guess);
        assert_eq!(config, default);
    }

    #[test]
    fn flags_reach_the_config() {
        let cli = Cli::try_parse_from([
            "gibbs",
            "sites.fasta",
            "12",
            "-r",
            "10",
            "-s",
            "7",
            "--shift-prob",
            "0.5",
            "--halve",
            "-j",
            "2",
            "--min-score",
            "4.5",
            "--null-shuffles",
            "0",
        ])
        .unwrap();
        let config = cli.search_config();
        assert_eq!(config.restarts, 10);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.shift_probability, 0.5);
        assert_eq!(config.length_jitter, 2);
        assert!(config.halve_oversized_guess);
        assert_eq!(config.min_total_score, 4.5);
        assert_eq!(config.null_shuffles, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_motif_length_is_rejected() {
        assert!(Cli::try_parse_from(["gibbs", "sites.fasta"]).is_err());
    }
}

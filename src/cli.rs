use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "stoke",
    about = "Fire up single-node training runs, probe the GPUs, size the embeddings.",
    version,
    author
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Training script to launch; anything after it is passed to the script
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub script: Vec<String>,

    /// Worker processes on this node
    #[arg(long, default_value_t = crate::config::NPROC)]
    pub nproc: usize,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show GPU status
    Gpu,

    /// Monte Carlo estimate of embedding distinctness
    Sim(SimArgs),

    /// Required embedding width for a distinctness target
    Dims(DimsArgs),
}

#[derive(Args)]
pub struct SimArgs {
    /// Number of random sign vectors
    #[arg(long, default_value_t = 50_000)]
    pub vectors: usize,

    /// Embedding widths to sweep
    #[arg(long, value_delimiter = ',', default_values_t = [40, 50, 60])]
    pub dims: Vec<u32>,

    /// Minimum pairwise Hamming distance
    #[arg(long, default_value_t = 1)]
    pub min_dist: u32,

    /// Trials per width
    #[arg(long, default_value_t = 20)]
    pub trials: usize,

    /// Seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct DimsArgs {
    /// Vector counts to tabulate
    #[arg(long, value_delimiter = ',', default_values_t = [10_000, 50_000, 100_000])]
    pub vectors: Vec<u64>,

    /// Minimum pairwise Hamming distances
    #[arg(long, value_delimiter = ',', default_values_t = [1, 2, 4, 8, 16, 32])]
    pub min_dist: Vec<u32>,

    /// Target probabilities that every pair stays far enough apart
    #[arg(long, value_delimiter = ',', default_values_t = [0.5, 0.9, 0.99, 0.999, 0.99999])]
    pub targets: Vec<f64>,
}

impl Cli {
    /// First trailing argument is the script, the rest belong to it.
    pub fn script_parts(&self) -> Option<(&str, &[String])> {
        let (first, rest) = self.script.split_first()?;
        Some((first.as_str(), rest))
    }
}

/// Files written by the launcher
pub const RUN_LEDGER: &str = "runs.log";

/// Behavior constants
pub const LAUNCHER: &str = "torchrun";
pub const NPROC: usize = 8;
pub const EXAMPLE_SCRIPT: &str = "train_gpt_02_convolve_embed.py";

/// Upper bound for the embedding-width search
pub const DIMS_CEILING: u32 = 1000;

/// Launcher configuration resolved from environment
pub struct LauncherConfig {
    pub program: String,
    pub nproc: usize,
}

impl LauncherConfig {
    pub fn from_env(nproc: usize) -> Self {
        let program =
            std::env::var("STOKE_LAUNCHER").unwrap_or_else(|_| LAUNCHER.to_string());
        Self { program, nproc }
    }
}

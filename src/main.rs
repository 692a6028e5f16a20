#![allow(dead_code)]

mod cli;
mod config;
mod embed;
mod error;
mod gpu;
mod launcher;
mod ledger;
mod tui;

use clap::Parser;

use cli::{Cli, Command};
use config::LauncherConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Command::Gpu) => gpu::report().await,
        Some(Command::Sim(args)) => embed::simulate::report(&args),
        Some(Command::Dims(args)) => embed::dims_report(&args),
        None => match cli.script_parts() {
            Some((script, extra)) => {
                let config = LauncherConfig::from_env(cli.nproc);
                match launcher::run(script, extra, &config).await {
                    // The launcher's exit code is ours, whatever it was.
                    Ok(code) => std::process::exit(code),
                    Err(e) => {
                        eprintln!("\n  \x1b[31m✗\x1b[0m {e}\n");
                        std::process::exit(1);
                    }
                }
            }
            None => {
                print_usage();
                std::process::exit(1);
            }
        },
    };

    if let Err(e) = result {
        eprintln!("\n  \x1b[31m✗\x1b[0m {e}\n");
        std::process::exit(1);
    }
}

/// Bare invocation: two lines on stdout, exit 1.
fn print_usage() {
    let bin = std::env::args().next().unwrap_or_else(|| "stoke".to_string());
    println!("Usage: {bin} <python_script>");
    println!("Example: {bin} {}", config::EXAMPLE_SCRIPT);
}

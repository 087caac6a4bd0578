//! Command-line interface for regen
//!
//! # Usage Examples
//!
//! ```bash
//! # One string from the default pattern `[01]{5}`
//! regen
//!
//! # Ten reproducible strings
//! regen --regex '[a-zA-Z]{10}' --seed 1234 -n 10
//!
//! # Force minimum repetition counts
//! regen --regex 'a*b+c{2,}' --limit 0
//!
//! # Record the effective seed alongside the output
//! regen --regex '\d{3}-\d{4}' -n 3 --format json
//! ```
//!
//! Every flag can also be set through the environment (`REGEN_REGEX`,
//! `REGEN_SEED`, `REGEN_LIMIT`, `REGEN_COUNT`, `REGEN_FORMAT`). Logs go to
//! stderr and are controlled by `RUST_LOG`.

use clap::Parser;
use regen::GenerateOpts;

#[derive(Parser)]
#[command(name = "regen")]
#[command(about = "Generate random strings matching a regular expression")]
#[command(long_about = None)]
struct Cli {
    #[command(flatten)]
    opts: GenerateOpts,
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let report = regen::generate(&cli.opts)?;
    let stdout = std::io::stdout();
    regen::write_report(&report, cli.opts.format, stdout.lock())
}

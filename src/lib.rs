//! Regen Library
//!
//! Command-line options and output rendering for the `regen` binary. The
//! generation itself lives in the `regen_core` crate.
//!
//! # CLI Usage
//!
//! ```bash
//! # Five binary strings of length 5, reproducibly
//! regen --regex '[01]{5}' --seed 42 -n 5
//!
//! # Bound open-ended repetitions to 3 and emit JSON
//! regen --regex '[a-z]+@example\.com' --limit 3 -n 10 --format json
//! ```

use anyhow::Context;
use clap::{Parser, ValueEnum};
use regen_core::{default_seed, Generator};
use serde::Serialize;
use std::io::Write;

pub use regen_core;

#[derive(Parser, Clone, Debug)]
pub struct GenerateOpts {
    /// Regular expression used to generate strings
    #[arg(long, default_value = "[01]{5}", env = "REGEN_REGEX")]
    pub regex: String,

    /// Seed for the random source (default: derived from the current time)
    #[arg(long, env = "REGEN_SEED", allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// The amount of iterations of *, + and repetitions (negative values are ignored)
    #[arg(
        long,
        default_value = "10",
        env = "REGEN_LIMIT",
        allow_negative_numbers = true
    )]
    pub limit: i64,

    /// Number of strings to generate
    #[arg(short = 'n', long = "count", default_value = "1", env = "REGEN_COUNT")]
    pub count: u64,

    /// Output format
    #[arg(long, value_enum, default_value = "text", env = "REGEN_FORMAT")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One string per line
    #[value(name = "text")]
    Text,
    /// A single JSON document including the effective seed and limit
    #[value(name = "json")]
    Json,
}

/// Result of one `regen` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub pattern: String,
    pub seed: i64,
    pub limit: u32,
    pub strings: Vec<String>,
}

impl GenerateOpts {
    /// The seed to use, falling back to the clock.
    pub fn effective_seed(&self) -> i64 {
        self.seed.unwrap_or_else(default_seed)
    }
}

/// Generate the strings requested by `opts`.
pub fn generate(opts: &GenerateOpts) -> anyhow::Result<GenerationReport> {
    let seed = opts.effective_seed();
    let mut generator = Generator::new(&opts.regex)
        .with_context(|| format!("Failed to parse pattern {:?}", opts.regex))?
        .with_seed(seed)
        .with_limit(opts.limit);

    tracing::info!("Pattern: {}", opts.regex);
    tracing::info!("Seed: {seed}");
    tracing::info!("Limit: {}", generator.limit());

    let strings: Vec<String> = generator.strings(opts.count).collect();
    tracing::debug!("Generated {} strings", strings.len());

    Ok(GenerationReport {
        pattern: opts.regex.clone(),
        seed,
        limit: generator.limit(),
        strings,
    })
}

/// Write `report` to `out` in the given format.
pub fn write_report<W: Write>(
    report: &GenerationReport,
    format: OutputFormat,
    mut out: W,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for s in &report.strings {
                writeln!(out, "{s}").context("Failed to write output")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut out, report).context("Failed to serialize output")?;
            writeln!(out).context("Failed to write output")?;
        }
    }
    out.flush().context("Failed to flush output")?;
    Ok(())
}

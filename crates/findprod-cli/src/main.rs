// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! findprod
//!
//! Generates a seeded integer array, computes its product modulo 9973
//! sequentially, then once per coordination strategy with one scoped worker
//! per segment, and reports the timing of every trial.

mod config;
mod report;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use findprod_core::{run, RunConfig, Strategy, DEFAULT_MAX_RANDOM, DEFAULT_SEED};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{FileConfig, OutputFormat};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None, allow_negative_numbers = true)]
struct Args {
    /// Number of array elements
    array_size: usize,

    /// Number of worker threads (one segment each)
    thread_count: usize,

    /// Index forced to 0, or -1 for none
    zero_index: i64,

    /// Input generator seed
    #[clap(long)]
    seed: Option<u64>,

    /// Inclusive upper bound for generated elements
    #[clap(long)]
    max_random: Option<i32>,

    /// Strategy to run (repeatable: join, poll, counted). Defaults to all.
    #[clap(long = "strategy", value_parser = parse_strategy)]
    strategies: Vec<Strategy>,

    /// Report format
    #[clap(long, value_enum)]
    format: Option<OutputFormat>,

    /// JSON config file supplying defaults for the flags above
    #[clap(long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[clap(long, default_value = "info")]
    log_level: String,
}

fn parse_strategy(s: &str) -> Result<Strategy, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("invalid log filter {level:?}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };

    let mut cfg = RunConfig::new(args.array_size, args.thread_count);
    cfg.zero_index = RunConfig::parse_zero_index(args.zero_index)?;
    cfg.seed = args.seed.or(file.seed).unwrap_or(DEFAULT_SEED);
    cfg.max_random = args
        .max_random
        .or(file.max_random)
        .unwrap_or(DEFAULT_MAX_RANDOM);

    let strategies = if args.strategies.is_empty() {
        file.strategies.unwrap_or_else(|| Strategy::ALL.to_vec())
    } else {
        args.strategies
    };
    let format = args.format.or(file.format).unwrap_or_default();
    debug!(?cfg, ?strategies, ?format, "resolved configuration");

    let report = run(&cfg, &strategies).context("run failed")?;
    if !report.all_agree() {
        warn!("threaded products disagree with the sequential baseline");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::render(&mut out, &report, format)?;
    out.flush()?;
    Ok(())
}

//! apocalypse — does every digit pattern eventually appear in p^n?
//!
//! Scans consecutive powers (or seeded uniform random draws) for every
//! length-L pattern in base B simultaneously, counting per-pattern
//! misses.  Verbosity is controlled through `RUST_LOG`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use log::{error, info};

use apocalypse_search::{
    CheckpointStore, LogProgress, PeriodicCheckpoint, PowerSearch, RandomSearch, SearchError,
    SearchOutcome, SearchParams,
};
use pattern_scan::{StopRule, Summary};

// ════════════════════════════════════════════════════════════════════════════
// Command line
// ════════════════════════════════════════════════════════════════════════════

#[derive(Parser)]
#[command(name = "apocalypse", version, about = "Pattern-absence search over digit streams")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan consecutive powers p^n.
    Powers(PowerArgs),
    /// Scan seeded uniform random draws.
    Random(RandomArgs),
}

#[derive(Args)]
struct PowerArgs {
    /// Power p to raise.
    #[arg(long, default_value_t = 2)]
    power: u64,

    /// Numeral base B (2-36).
    #[arg(long, default_value_t = 10)]
    base: u8,

    /// Pattern length L.
    #[arg(long, default_value_t = 3)]
    seq_len: u32,

    /// First exponent.
    #[arg(long, default_value_t = 1)]
    start: u64,

    /// Stop before this exponent.
    #[arg(long)]
    stop: Option<u64>,

    /// Stop once this many samples pass without any absent pattern.
    #[arg(long)]
    safety: Option<u64>,

    /// Minutes between periodic checkpoint saves (0 disables them).
    #[arg(long, default_value_t = 0)]
    save_interval: u64,

    /// Checkpoint file (a name derived from the parameters by default).
    #[arg(long)]
    checkpoint: Option<PathBuf>,

    /// Resume from this checkpoint instead of starting fresh.
    #[arg(long)]
    resume: Option<PathBuf>,

    /// Write the run summary as JSON.
    #[arg(long)]
    summary_out: Option<PathBuf>,

    /// Log progress every N samples.
    #[arg(long, default_value_t = 1000)]
    progress_every: u64,
}

#[derive(Args)]
struct RandomArgs {
    /// Numeral base B (2-36).
    #[arg(long, default_value_t = 10)]
    base: u8,

    /// Pattern length L.
    #[arg(long, default_value_t = 3)]
    seq_len: u32,

    /// Digits per draw.
    #[arg(long)]
    digit_len: u32,

    /// Number of draws.
    #[arg(long)]
    samples: u64,

    /// RNG seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Write the run summary as JSON.
    #[arg(long)]
    summary_out: Option<PathBuf>,

    /// Log progress every N samples.
    #[arg(long, default_value_t = 1000)]
    progress_every: u64,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Powers(args) => run_powers(args),
        Command::Random(args) => run_random(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Subcommands
// ════════════════════════════════════════════════════════════════════════════

fn run_powers(args: PowerArgs) -> Result<(), SearchError> {
    let rule = StopRule::resolve(args.stop, args.safety).ok_or(SearchError::MissingStopRule)?;
    let interval = (args.save_interval > 0).then(|| Duration::from_secs(args.save_interval * 60));

    let search = match args.resume {
        Some(resume_path) => {
            let checkpoint = CheckpointStore::new(&resume_path).load()?;
            info!(
                "resuming p={} base={} L={} at n={} ({} samples already done)",
                checkpoint.power,
                checkpoint.base,
                checkpoint.seq_len,
                checkpoint.stop,
                checkpoint.stop - checkpoint.start
            );
            let store = CheckpointStore::new(args.checkpoint.unwrap_or(resume_path));
            PowerSearch::resume(checkpoint, rule, PeriodicCheckpoint::new(store, interval))?
        }
        None => {
            let params = SearchParams {
                power:   args.power,
                base:    args.base,
                seq_len: args.seq_len,
                start:   args.start,
                rule,
            };
            let path = args.checkpoint.unwrap_or_else(|| default_checkpoint_path(&params));
            info!(
                "searching powers of {} in base {} for every {}-digit pattern, from n={}",
                params.power, params.base, params.seq_len, params.start
            );
            info!("checkpoint file: {}", path.display());
            PowerSearch::new(params, PeriodicCheckpoint::new(CheckpointStore::new(path), interval))?
        }
    };

    let params = *search.params();
    let mut progress = LogProgress::new(args.progress_every);
    let outcome = search.run(&mut progress)?;
    let summary = outcome.summary();
    print_summary(&outcome, &summary);

    if let Some(path) = args.summary_out {
        let report = serde_json::json!({
            "mode": "powers",
            "power": params.power,
            "base": params.base,
            "seq_len": params.seq_len,
            "start": outcome.start,
            "stop": outcome.stop,
            "samples": summary.total_samples,
            "mean": summary.mean,
            "std_dev": summary.std_dev,
            "outliers": summary.outliers,
        });
        write_json(&path, &report)?;
        info!("summary written to {}", path.display());
    }
    Ok(())
}

fn run_random(args: RandomArgs) -> Result<(), SearchError> {
    info!(
        "scanning {} random {}-digit draws in base {} for every {}-digit pattern (seed {})",
        args.samples, args.digit_len, args.base, args.seq_len, args.seed
    );
    let search = RandomSearch::new(args.base, args.seq_len, args.digit_len, args.samples, args.seed)?;
    let mut progress = LogProgress::new(args.progress_every);
    let outcome = search.run(&mut progress)?;
    let summary = outcome.summary();
    print_summary(&outcome, &summary);

    if let Some(path) = args.summary_out {
        let report = serde_json::json!({
            "mode": "random",
            "base": args.base,
            "seq_len": args.seq_len,
            "digit_len": args.digit_len,
            "seed": args.seed,
            "samples": summary.total_samples,
            "mean": summary.mean,
            "std_dev": summary.std_dev,
            "outliers": summary.outliers,
        });
        write_json(&path, &report)?;
        info!("summary written to {}", path.display());
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Reporting
// ════════════════════════════════════════════════════════════════════════════

fn print_summary(outcome: &SearchOutcome, summary: &Summary) {
    println!("╔══════════════════════════════════════╗");
    println!("║    Pattern Absence Search Results    ║");
    println!("╚══════════════════════════════════════╝");
    println!(
        "patterns:      {} ({}^{})",
        outcome.universe.len(),
        outcome.universe.base(),
        outcome.universe.seq_len()
    );
    println!(
        "samples:       {} (n = {}..{})",
        summary.total_samples, outcome.start, outcome.stop
    );
    println!("mean misses:   {:.3}", summary.mean);
    println!("std deviation: {:.3}", summary.std_dev);
    if summary.outliers.is_empty() {
        println!("outliers:      none beyond 3σ");
    } else {
        println!("outliers ({} beyond 3σ):", summary.outliers.len());
        for o in &summary.outliers {
            println!("  {}  count={}  {:+.2}σ", o.pattern, o.count, o.sigma);
        }
    }
}

fn write_json(path: &Path, report: &serde_json::Value) -> Result<(), SearchError> {
    let text = serde_json::to_string_pretty(report)
        .map_err(|e| SearchError::SummaryWrite { path: path.to_path_buf(), source: e.into() })?;
    fs::write(path, text)
        .map_err(|e| SearchError::SummaryWrite { path: path.to_path_buf(), source: e })
}

fn default_checkpoint_path(params: &SearchParams) -> PathBuf {
    PathBuf::from(format!(
        "apocalypse_p{}_b{}_l{}.json",
        params.power, params.base, params.seq_len
    ))
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

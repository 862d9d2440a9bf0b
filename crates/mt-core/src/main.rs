//! Mismatch Triage - fuzzy mental-model discrepancy engine
//!
//! The main entry point for mt-core, handling:
//! - Ground-truth simulation of the automation's state machine
//! - Fuzzy belief evolution of the operator's mental model
//! - Discrepancy checking between the two trajectories
//! - Monte Carlo batches over randomized action schedules
//! - Batch analysis and summaries

use clap::{Args, Parser, Subcommand};
use mt_config::{validate_pair, ModelConfig, SystemConfig};
use mt_core::checks::{run_checks, Thresholds};
use mt_core::engine::{evolve, Evolution};
use mt_core::exit_codes::{exit_code_for, ExitCode};
use mt_core::experiment::{
    collect_reports, run_experiment, run_once, ExperimentOptions, RunError,
};
use mt_core::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use mt_core::sim::{simulate, Trajectory};
use mt_report::{render_text, summarize, Report};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Mismatch Triage - human-automation state mismatch detection
#[derive(Parser)]
#[command(name = "mt-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Minimum log level
    #[arg(long, global = true, env = "MT_LOG_LEVEL", default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log output format (human or jsonl)
    #[arg(long, global = true, env = "MT_LOG_FORMAT", default_value_t = LogFormat::Human)]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the ground-truth state machine over its schedule
    Simulate(SimulateArgs),

    /// Evolve the fuzzy mental model over its schedule
    Evolve(EvolveArgs),

    /// Run the discrepancy checks on computed histories
    Check(CheckArgs),

    /// Golden path: simulate + evolve + check one model/system pair
    Run(RunArgs),

    /// Monte Carlo batch over randomized schedules
    Batch(BatchArgs),

    /// Summarize the reports of a finished experiment
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// Path to the system JSON document
    #[arg(long)]
    system: PathBuf,

    /// Output path for the trajectory JSON (stdout when omitted)
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct EvolveArgs {
    /// Path to the model JSON document
    #[arg(long)]
    model: PathBuf,

    /// Output path for the evolution JSON (stdout when omitted)
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Path to a computed evolution JSON
    #[arg(long)]
    evolution: PathBuf,

    /// Path to a computed trajectory JSON
    #[arg(long)]
    trajectory: PathBuf,

    /// Output path for the report JSON (stdout when omitted)
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    thresholds: ThresholdOpts,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Path to the model JSON document
    #[arg(long)]
    model: PathBuf,

    /// Path to the system JSON document
    #[arg(long)]
    system: PathBuf,

    /// Output directory (defaults to output/<timestamp>)
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    thresholds: ThresholdOpts,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Path to the model JSON document
    #[arg(long)]
    model: PathBuf,

    /// Path to the system JSON document
    #[arg(long)]
    system: PathBuf,

    /// Number of randomized runs
    #[arg(long, default_value = "100")]
    iterations: u32,

    /// Steps per generated schedule
    #[arg(long, default_value = "20")]
    steps: u32,

    /// RNG seed for reproducible batches
    #[arg(long)]
    seed: Option<u64>,

    /// Also write reports truncated after the first dominant blocking step
    #[arg(long)]
    post_process: bool,

    /// Output directory (defaults to output/<timestamp>)
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    thresholds: ThresholdOpts,
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Experiment directory (as produced by `batch`)
    experiment: PathBuf,

    /// Analyze the post-processed (truncated) reports
    #[arg(long)]
    truncated: bool,

    /// Save the rendered summary next to the experiment data
    #[arg(long)]
    save: bool,
}

/// Membership cutoffs for the threshold check variants
#[derive(Args, Debug)]
struct ThresholdOpts {
    /// Cutoff for threshold error checks
    #[arg(long, default_value_t = 0.7)]
    error_threshold: f64,

    /// Cutoff for threshold nondeterministic confusion
    #[arg(long, default_value_t = 0.7)]
    confusion_threshold: f64,

    /// Cutoff for threshold vacuous confusion
    #[arg(long, default_value_t = 0.3)]
    vacuous_threshold: f64,

    /// Cutoff for threshold blocking checks
    #[arg(long, default_value_t = 0.7)]
    blocking_threshold: f64,
}

impl From<&ThresholdOpts> for Thresholds {
    fn from(opts: &ThresholdOpts) -> Self {
        Thresholds {
            error: opts.error_threshold,
            confusion: opts.confusion_threshold,
            vacuous: opts.vacuous_threshold,
            blocking: opts.blocking_threshold,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&LogConfig {
        level: cli.global.log_level,
        format: cli.global.log_format,
    });

    let code = match dispatch(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            exit_code_for(&err)
        }
    };
    std::process::exit(code.code());
}

fn dispatch(command: Commands) -> Result<ExitCode, RunError> {
    match command {
        Commands::Simulate(args) => {
            let system = SystemConfig::load(&args.system)?;
            let trajectory = simulate(&system)?;
            emit(&trajectory, args.out.as_deref())?;
            Ok(ExitCode::Clean)
        }
        Commands::Evolve(args) => {
            let model = ModelConfig::load(&args.model)?;
            let evolution = evolve(&model)?;
            emit(&evolution, args.out.as_deref())?;
            Ok(ExitCode::Clean)
        }
        Commands::Check(args) => {
            let evolution: Evolution = read_json(&args.evolution)?;
            let trajectory: Trajectory = read_json(&args.trajectory)?;
            let report = run_checks(&evolution, &trajectory, &(&args.thresholds).into())?;
            emit(&report, args.out.as_deref())?;
            Ok(outcome(&report))
        }
        Commands::Run(args) => {
            let model = ModelConfig::load(&args.model)?;
            let system = SystemConfig::load(&args.system)?;
            validate_pair(&model, &system)?;

            let out_dir = args
                .out
                .unwrap_or_else(|| timestamped_dir().join("run"));
            let report = run_once(&model, &system, &out_dir, &(&args.thresholds).into())?;
            info!(
                out = %out_dir.display(),
                findings = report.total_events(),
                "run complete"
            );
            emit(&report, None)?;
            Ok(outcome(&report))
        }
        Commands::Batch(args) => {
            let model = ModelConfig::load(&args.model)?;
            let system = SystemConfig::load(&args.system)?;
            validate_pair(&model, &system)?;

            let root = args.out.unwrap_or_else(timestamped_dir);
            let options = ExperimentOptions {
                iterations: args.iterations,
                steps: args.steps,
                seed: args.seed,
                post_process: args.post_process,
                thresholds: (&args.thresholds).into(),
            };
            let summary = run_experiment(&model, &system, &root, &options)?;
            write_json(&root.join("summary.json"), &summary)?;
            print!("{}", render_text(&summary));
            info!(root = %root.display(), runs = summary.total_runs, "batch complete");
            Ok(if summary.checks.is_empty() {
                ExitCode::Clean
            } else {
                ExitCode::Findings
            })
        }
        Commands::Analyze(args) => {
            let reports = collect_reports(&args.experiment, args.truncated)?;
            let summary = summarize(reports.iter());
            let text = render_text(&summary);
            print!("{text}");
            if args.save {
                let filename = if args.truncated {
                    "analyze_truncated.txt"
                } else {
                    "analyze.txt"
                };
                let path = args.experiment.join(filename);
                std::fs::write(&path, &text)?;
                info!(path = %path.display(), "summary saved");
            }
            Ok(if summary.checks.is_empty() {
                ExitCode::Clean
            } else {
                ExitCode::Findings
            })
        }
    }
}

fn outcome(report: &Report) -> ExitCode {
    if report.is_clean() {
        ExitCode::Clean
    } else {
        ExitCode::Findings
    }
}

fn timestamped_dir() -> PathBuf {
    PathBuf::from("output").join(chrono::Local::now().format("%Y%m%d%H%M%S").to_string())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, RunError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| std::io::Error::new(e.kind(), format!("{}: {e}", path.display())))?;
    Ok(serde_json::from_str(&content)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), RunError> {
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Write a payload to `path`, or pretty-print it on stdout when no path is
/// given. stdout carries payloads only; logs go to stderr.
fn emit<T: Serialize>(value: &T, path: Option<&Path>) -> Result<(), RunError> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            write_json(path, value)
        }
        None => {
            println!("{}", serde_json::to_string_pretty(value)?);
            Ok(())
        }
    }
}

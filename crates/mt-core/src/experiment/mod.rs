//! Monte Carlo experiment driver.
//!
//! Runs many randomized schedules through the simulator, the fuzzy engine,
//! and the checkers, persisting every artifact under a per-experiment
//! directory. Iterations share no in-memory state; the output namespace is
//! partitioned per iteration (`config/model_NNNN.json`,
//! `computed/run_NNNN/…`), so a batch can be re-analyzed file by file.

use crate::checks::{run_checks, CheckError, Thresholds};
use crate::engine::{evolve, EngineError};
use crate::sim::{simulate, SimError};
use mt_config::{validate_pair, ModelConfig, ScheduleEntry, SystemConfig, ValidationError};
use mt_report::{summarize, CheckKind, Report, ReportError, Summary};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Errors from a single run or a batch.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("configuration error: {0}")]
    Config(#[from] ValidationError),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("simulation error: {0}")]
    Sim(#[from] SimError),

    #[error("check error: {0}")]
    Check(#[from] CheckError),

    #[error("report error: {0}")]
    Report(#[from] ReportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for run operations.
pub type Result<T> = std::result::Result<T, RunError>;

/// Options for a Monte Carlo batch.
#[derive(Debug, Clone)]
pub struct ExperimentOptions {
    /// Number of randomized runs.
    pub iterations: u32,
    /// Steps per generated schedule.
    pub steps: u32,
    /// RNG seed; random otherwise.
    pub seed: Option<u64>,
    /// Also write reports truncated after the first dominant blocking step.
    pub post_process: bool,
    /// Cutoffs for the threshold check variants.
    pub thresholds: Thresholds,
}

impl Default for ExperimentOptions {
    fn default() -> Self {
        Self {
            iterations: 100,
            steps: 20,
            seed: None,
            post_process: false,
            thresholds: Thresholds::default(),
        }
    }
}

/// Generate a random schedule totalling `total_steps` steps: uniform event
/// choice, run lengths of 1..=5 capped by the remaining budget.
///
/// `events` must be non-empty (guaranteed by model validation).
pub fn random_schedule(
    events: &[String],
    total_steps: u32,
    rng: &mut StdRng,
) -> Vec<ScheduleEntry> {
    let mut schedule = Vec::new();
    let mut remaining = total_steps;
    while remaining > 0 {
        let event = events[rng.random_range(0..events.len())].clone();
        let steps = rng.random_range(1..=remaining.min(5));
        schedule.push(ScheduleEntry::new(event, steps));
        remaining -= steps;
    }
    schedule
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    debug!(path = %path.display(), "wrote artifact");
    Ok(())
}

/// Run one model/system pair end to end and persist the artifacts.
///
/// Writes `trajectory.json`, `evolution.json`, and `result/report.json`
/// under `out_dir`, and returns the report.
pub fn run_once(
    model: &ModelConfig,
    system: &SystemConfig,
    out_dir: &Path,
    thresholds: &Thresholds,
) -> Result<Report> {
    validate_pair(model, system)?;

    let trajectory = simulate(system)?;
    let evolution = evolve(model)?;
    let report = run_checks(&evolution, &trajectory, thresholds)?;

    std::fs::create_dir_all(out_dir)?;
    write_json(&out_dir.join("trajectory.json"), &trajectory)?;
    write_json(&out_dir.join("evolution.json"), &evolution)?;
    let result_dir = out_dir.join("result");
    std::fs::create_dir_all(&result_dir)?;
    report.save(&result_dir.join("report.json"))?;

    Ok(report)
}

/// Run a Monte Carlo batch and return the aggregated summary.
pub fn run_experiment(
    model: &ModelConfig,
    system: &SystemConfig,
    root: &Path,
    options: &ExperimentOptions,
) -> Result<Summary> {
    let events: Vec<String> = model.events().map(str::to_string).collect();
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let config_dir = root.join("config");
    std::fs::create_dir_all(&config_dir)?;

    let mut reports = Vec::with_capacity(options.iterations as usize);
    for iteration in 0..options.iterations {
        let schedule = random_schedule(&events, options.steps, &mut rng);

        let mut model_run = model.clone();
        model_run.schedule.clone_from(&schedule);
        let mut system_run = system.clone();
        system_run.schedule = schedule;

        model_run.save(&config_dir.join(format!("model_{iteration:04}.json")))?;
        system_run.save(&config_dir.join(format!("system_{iteration:04}.json")))?;

        let run_dir = root.join("computed").join(format!("run_{iteration:04}"));
        let report = run_once(&model_run, &system_run, &run_dir, &options.thresholds)?;

        if options.post_process {
            let truncated = match report.first_step(CheckKind::DominantStateBlocking) {
                Some(step) => report.truncated_at(step),
                None => report.clone(),
            };
            truncated.save(&run_dir.join("result").join("report_truncated.json"))?;
        }

        info!(
            iteration,
            findings = report.total_events(),
            "run complete"
        );
        reports.push(report);
    }

    Ok(summarize(reports.iter()))
}

/// Collect the per-run reports of a finished experiment, in run order.
///
/// Reads `report_truncated.json` when `truncated` is set, `report.json`
/// otherwise. Runs missing the requested file are skipped (e.g. a batch
/// analyzed with `truncated` that ran without post-processing).
pub fn collect_reports(root: &Path, truncated: bool) -> Result<Vec<Report>> {
    let filename = if truncated {
        "report_truncated.json"
    } else {
        "report.json"
    };

    let computed = root.join("computed");
    let mut run_dirs: Vec<PathBuf> = std::fs::read_dir(&computed)
        .map_err(|e| std::io::Error::new(e.kind(), format!("{}: {e}", computed.display())))?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    run_dirs.sort();

    let mut reports = Vec::with_capacity(run_dirs.len());
    for run_dir in run_dirs {
        let path = run_dir.join("result").join(filename);
        if path.is_file() {
            reports.push(Report::load(&path)?);
        }
    }
    Ok(reports)
}

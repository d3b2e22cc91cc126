//! Reach Metrics CLI
//!
//! Batch analysis of target-tracking session logs.

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use reach_metrics::{
    analysis::{compute_trial_metrics, summarize_by_condition, TrialMetrics},
    config::Config,
    report::{write_summary_csv, write_trials_csv},
    session::{group_trials, load_session},
    simulate::{generate_session, write_session_csv, PointerModel},
    VERSION,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reach-metrics")]
#[command(version = VERSION)]
#[command(about = "Trial metrics for target-tracking experiments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a session log and write metrics tables
    Analyze(AnalyzeOpts),

    /// Generate a synthetic session log
    Simulate(SimulateOpts),

    /// Show configuration
    Config,
}

#[derive(Args)]
struct AnalyzeOpts {
    /// Session CSV with columns participant, condition, trial, tau, t, y_t, x_p, y_p
    csv: PathBuf,

    /// Target travel distance in pixels
    #[arg(long)]
    travel_px: Option<f64>,

    /// Variance window half-width in milliseconds
    #[arg(long)]
    poswin_ms: Option<f64>,

    /// Onset position margin in pixels
    #[arg(long)]
    start_margin_px: Option<f64>,

    /// Offset position margin in pixels
    #[arg(long)]
    end_margin_px: Option<f64>,

    /// Ideal motion duration in seconds
    #[arg(long)]
    motion_duration: Option<f64>,

    /// Onset velocity threshold in px/s
    #[arg(long)]
    v_start: Option<f64>,

    /// Offset velocity threshold in px/s
    #[arg(long)]
    v_stop: Option<f64>,

    /// Onset hold duration in milliseconds
    #[arg(long)]
    hold_start_ms: Option<f64>,

    /// Offset hold duration in milliseconds
    #[arg(long)]
    hold_stop_ms: Option<f64>,

    /// Detect onset/offset from velocity (the default)
    #[arg(long, conflicts_with = "no_use_velocity")]
    use_velocity: bool,

    /// Detect onset/offset from position thresholds instead
    #[arg(long)]
    no_use_velocity: bool,

    /// Output directory for the metrics tables
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct SimulateOpts {
    /// Output CSV path (defaults to data/session_<timestamp>.csv)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Participant id for the generated log
    #[arg(long, default_value = "P01")]
    participant: String,

    /// Trials per condition
    #[arg(long)]
    trials: Option<u32>,

    /// RNG seed
    #[arg(long, default_value = "7")]
    seed: u64,

    /// Pointer tracking noise in pixels
    #[arg(long, default_value = "0.0")]
    noise_px: f64,

    /// Pointer reaction lag in milliseconds
    #[arg(long, default_value = "0.0")]
    lag_ms: f64,
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(opts) => cmd_analyze(opts),
        Commands::Simulate(opts) => cmd_simulate(opts),
        Commands::Config => cmd_config(),
    }
}

fn cmd_analyze(opts: AnalyzeOpts) {
    println!("Reach Metrics v{VERSION}");
    println!();

    let mut config = Config::load().unwrap_or_default();
    apply_overrides(&mut config, &opts);

    let loaded = match load_session(&opts.csv) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error loading session: {e}");
            std::process::exit(1);
        }
    };
    if loaded.dropped_rows > 0 {
        eprintln!("Warning: dropped {} malformed row(s)", loaded.dropped_rows);
    }

    let sample_count = loaded.records.len();
    let trials = group_trials(loaded.records);

    println!("  Samples: {sample_count}");
    println!("  Trials: {}", trials.len());
    println!(
        "  Detection: {}",
        if config.analysis.use_velocity {
            "velocity"
        } else {
            "position"
        }
    );

    let metrics: Vec<TrialMetrics> = trials
        .iter()
        .map(|trial| compute_trial_metrics(trial, &config.analysis))
        .collect();
    let summaries = summarize_by_condition(&metrics);

    if let Err(e) = std::fs::create_dir_all(&config.output_dir) {
        eprintln!("Error creating output directory: {e}");
        std::process::exit(1);
    }

    let stem = opts
        .csv
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("session");
    let trials_path = config.output_dir.join(format!("{stem}_trials.csv"));
    let summary_path = config.output_dir.join(format!("{stem}_by_condition.csv"));

    if let Err(e) = write_trials_csv(&trials_path, &metrics) {
        eprintln!("Error writing per-trial metrics: {e}");
        std::process::exit(1);
    }
    if let Err(e) = write_summary_csv(&summary_path, &summaries) {
        eprintln!("Error writing summary: {e}");
        std::process::exit(1);
    }

    println!();
    println!("Per-trial metrics saved: {trials_path:?}");
    println!("By-condition summary saved: {summary_path:?}");
}

fn apply_overrides(config: &mut Config, opts: &AnalyzeOpts) {
    let analysis = &mut config.analysis;
    if let Some(v) = opts.travel_px {
        analysis.travel_px = v;
    }
    if let Some(v) = opts.poswin_ms {
        analysis.poswin_ms = v;
    }
    if let Some(v) = opts.start_margin_px {
        analysis.start_margin_px = v;
    }
    if let Some(v) = opts.end_margin_px {
        analysis.end_margin_px = v;
    }
    if let Some(v) = opts.motion_duration {
        analysis.motion_duration_s = v;
    }
    if let Some(v) = opts.v_start {
        analysis.v_start = v;
    }
    if let Some(v) = opts.v_stop {
        analysis.v_stop = v;
    }
    if let Some(v) = opts.hold_start_ms {
        analysis.hold_start_ms = v;
    }
    if let Some(v) = opts.hold_stop_ms {
        analysis.hold_stop_ms = v;
    }
    if opts.use_velocity {
        analysis.use_velocity = true;
    }
    if opts.no_use_velocity {
        analysis.use_velocity = false;
    }
    if let Some(dir) = &opts.output {
        config.output_dir = dir.clone();
    }
}

fn cmd_simulate(opts: SimulateOpts) {
    let mut config = Config::load().unwrap_or_default();
    if let Some(n) = opts.trials {
        config.simulation.trials_per_condition = n;
    }

    let pointer = PointerModel {
        lag_s: opts.lag_ms / 1000.0,
        noise_px: opts.noise_px,
    };
    let records = generate_session(
        &opts.participant,
        &config.analysis,
        &config.simulation,
        pointer,
        opts.seed,
    );

    let path = opts.output.unwrap_or_else(|| {
        PathBuf::from("data").join(format!("session_{}.csv", Utc::now().format("%Y%m%d_%H%M%S")))
    });
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    match write_session_csv(&path, &records) {
        Ok(()) => println!(
            "Synthetic session saved: {:?} ({} samples, {} trials)",
            path,
            records.len(),
            config.simulation.trials_per_condition * 2
        ),
        Err(e) => {
            eprintln!("Error writing session: {e}");
            std::process::exit(1);
        }
    }
}

fn cmd_config() {
    let config = Config::load().unwrap_or_default();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}

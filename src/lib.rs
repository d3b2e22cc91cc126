//! Reach Metrics - trial analysis for target-tracking experiments.
//!
//! A visual target moves along a minimum-jerk trajectory after a randomized
//! per-trial delay, a participant tracks it with a pointing device, and the
//! presentation front-end records one sample row per frame. This library
//! turns those session logs into per-trial timing and accuracy metrics and
//! aggregates them per participant and condition.
//!
//! # Pipeline
//!
//! ```text
//! session CSV
//!     │
//!     ▼
//! ┌─────────────┐    ┌──────────────────────────┐    ┌─────────────┐
//! │   session   │───▶│         analysis         │───▶│   report    │
//! │ load, group │    │ velocity → events →      │    │ trials +    │
//! │ into trials │    │ metrics → summary        │    │ summary CSV │
//! └─────────────┘    └──────────────────────────┘    └─────────────┘
//! ```
//!
//! All analysis is batch and deterministic: one pass over an
//! already-collected dataset, each trial processed independently against a
//! shared read-only configuration, outputs emitted in
//! `(participant, condition, trial)` order.
//!
//! # Example
//!
//! ```no_run
//! use reach_metrics::{analysis, config::Config, session};
//!
//! let config = Config::default();
//! let loaded = session::load_session(std::path::Path::new("data/session.csv")).unwrap();
//! let trials = session::group_trials(loaded.records);
//! let metrics: Vec<_> = trials
//!     .iter()
//!     .map(|trial| analysis::compute_trial_metrics(trial, &config.analysis))
//!     .collect();
//! let summary = analysis::summarize_by_condition(&metrics);
//! ```

pub mod analysis;
pub mod config;
pub mod report;
pub mod session;
pub mod simulate;
pub mod stimulus;

// Re-export key types at crate root for convenience
pub use analysis::{
    compute_trial_metrics, compute_velocity, first_cross_time, first_sustain_time,
    summarize_by_condition, ConditionSummary, Direction, SummaryStats, TrialMetrics,
};
pub use config::{AnalysisConfig, Config, SimulationConfig};
pub use report::{write_summary_csv, write_trials_csv, ReportError};
pub use session::{
    group_trials, load_session, LoadedSession, SessionError, SessionRecord, Trial, TrialKey,
};
pub use stimulus::{bell_shape, target_position};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

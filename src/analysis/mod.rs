//! Trial metrics extraction.
//!
//! This module contains:
//! - Velocity estimation from sampled pointer positions
//! - Event detection (sustained-condition and first-crossing)
//! - Per-trial metric computation
//! - Aggregation by participant and condition

pub mod events;
pub mod metrics;
pub mod summary;
pub mod velocity;

// Re-export commonly used types
pub use events::{first_cross_time, first_sustain_time, Direction};
pub use metrics::{compute_trial_metrics, TrialMetrics};
pub use summary::{summarize_by_condition, ConditionSummary, SummaryStats};
pub use velocity::compute_velocity;

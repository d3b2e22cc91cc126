//! Metrics table emission.
//!
//! Two CSV artifacts per run: the per-trial metrics table and the
//! by-condition summary. Undefined metrics become empty cells, matching the
//! way the upstream tooling reads missing values.

use crate::analysis::{ConditionSummary, TrialMetrics};
use std::path::Path;

/// Write the per-trial metrics table.
///
/// Rows are written in the order given; the pipeline hands them over already
/// sorted by `(participant, condition, trial)`.
pub fn write_trials_csv(path: &Path, metrics: &[TrialMetrics]) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| ReportError::Csv(e.to_string()))?;

    writer
        .write_record([
            "trial",
            "tau",
            "t_start",
            "t_end",
            "pos_var_start",
            "pos_var_end",
            "y_end_mean",
            "mse_truth",
            "participant",
            "condition",
        ])
        .map_err(|e| ReportError::Csv(e.to_string()))?;

    for m in metrics {
        writer
            .write_record(&[
                m.trial.to_string(),
                m.tau.to_string(),
                opt_cell(m.t_start),
                opt_cell(m.t_end),
                opt_cell(m.pos_var_start),
                opt_cell(m.pos_var_end),
                opt_cell(m.y_end_mean),
                opt_cell(m.mse_truth),
                m.participant.clone(),
                m.condition.clone(),
            ])
            .map_err(|e| ReportError::Csv(e.to_string()))?;
    }

    writer.flush().map_err(|e| ReportError::Io(e.to_string()))?;
    Ok(())
}

/// Write the by-condition summary table.
pub fn write_summary_csv(path: &Path, summaries: &[ConditionSummary]) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| ReportError::Csv(e.to_string()))?;

    writer
        .write_record([
            "participant",
            "condition",
            "n_trials",
            "t_start_mean",
            "t_start_std",
            "t_end_mean",
            "t_end_std",
            "pos_var_start_mean",
            "pos_var_start_std",
            "pos_var_end_mean",
            "pos_var_end_std",
            "y_end_mean_mean",
            "y_end_mean_std",
            "mse_truth_mean",
            "mse_truth_std",
        ])
        .map_err(|e| ReportError::Csv(e.to_string()))?;

    for s in summaries {
        let mut row = vec![
            s.participant.clone(),
            s.condition.clone(),
            s.n_trials.to_string(),
        ];
        for stats in [
            &s.t_start,
            &s.t_end,
            &s.pos_var_start,
            &s.pos_var_end,
            &s.y_end_mean,
            &s.mse_truth,
        ] {
            row.push(opt_cell(stats.mean));
            row.push(opt_cell(stats.std_dev));
        }
        writer
            .write_record(&row)
            .map_err(|e| ReportError::Csv(e.to_string()))?;
    }

    writer.flush().map_err(|e| ReportError::Io(e.to_string()))?;
    Ok(())
}

/// Undefined values become empty cells.
fn opt_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Report writing errors.
#[derive(Debug)]
pub enum ReportError {
    Io(String),
    Csv(String),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io(e) => write!(f, "IO error: {e}"),
            ReportError::Csv(e) => write!(f, "CSV error: {e}"),
        }
    }
}

impl std::error::Error for ReportError {}

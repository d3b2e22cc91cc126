//! Aggregation of trial metrics by participant and condition.

use crate::analysis::metrics::TrialMetrics;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// Mean and sample standard deviation over the defined values of one metric.
///
/// Mean needs at least one defined value, standard deviation (N-1
/// convention) at least two.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
}

impl SummaryStats {
    fn from_values(values: &[f64]) -> Self {
        Self {
            mean: if values.is_empty() {
                None
            } else {
                Some(values.mean())
            },
            std_dev: if values.len() < 2 {
                None
            } else {
                Some(values.std_dev())
            },
        }
    }
}

/// Aggregated metrics for one participant and condition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionSummary {
    pub participant: String,
    pub condition: String,
    /// Total trials in the group, whether or not their metrics are defined
    pub n_trials: usize,
    pub t_start: SummaryStats,
    pub t_end: SummaryStats,
    pub pos_var_start: SummaryStats,
    pub pos_var_end: SummaryStats,
    pub y_end_mean: SummaryStats,
    pub mse_truth: SummaryStats,
}

/// Group trial metrics by `(participant, condition)` and aggregate each
/// metric field over its defined values. Groups come back in key order.
pub fn summarize_by_condition(metrics: &[TrialMetrics]) -> Vec<ConditionSummary> {
    let mut groups: BTreeMap<(String, String), Vec<&TrialMetrics>> = BTreeMap::new();
    for m in metrics {
        groups
            .entry((m.participant.clone(), m.condition.clone()))
            .or_default()
            .push(m);
    }

    groups
        .into_iter()
        .map(|((participant, condition), trials)| {
            let defined = |field: fn(&TrialMetrics) -> Option<f64>| -> Vec<f64> {
                trials.iter().filter_map(|m| field(m)).collect()
            };

            ConditionSummary {
                n_trials: trials.len(),
                t_start: SummaryStats::from_values(&defined(|m| m.t_start)),
                t_end: SummaryStats::from_values(&defined(|m| m.t_end)),
                pos_var_start: SummaryStats::from_values(&defined(|m| m.pos_var_start)),
                pos_var_end: SummaryStats::from_values(&defined(|m| m.pos_var_end)),
                y_end_mean: SummaryStats::from_values(&defined(|m| m.y_end_mean)),
                mse_truth: SummaryStats::from_values(&defined(|m| m.mse_truth)),
                participant,
                condition,
            }
        })
        .collect()
}

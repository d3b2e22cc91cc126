//! Typed records for the experiment session log.

use serde::{Deserialize, Serialize};

/// One sample row of the session log.
///
/// The presentation front-end records one row per frame. All numeric fields
/// are finite by the time a record exists; malformed rows are dropped at
/// load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Participant identifier
    pub participant: String,
    /// Condition identifier
    pub condition: String,
    /// Trial number, unique within participant and condition
    pub trial: i64,
    /// Randomized onset delay for this trial in seconds
    pub tau: f64,
    /// Frame timestamp in seconds from trial start
    pub t: f64,
    /// Ideal target position in pixels
    pub y_t: f64,
    /// Observed pointer x position in pixels (unused by the metrics, kept
    /// for parity with the recorded format)
    pub x_p: f64,
    /// Observed pointer y position in pixels
    pub y_p: f64,
}

/// Composite key identifying one trial.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TrialKey {
    pub participant: String,
    pub condition: String,
    pub trial: i64,
}

/// The time-ordered samples of a single trial.
///
/// Constructed by [`crate::session::group_trials`], which never produces an
/// empty trial. Consumed once by the metrics engine.
#[derive(Debug, Clone)]
pub struct Trial {
    pub key: TrialKey,
    pub records: Vec<SessionRecord>,
}

impl Trial {
    /// Create a new empty trial for the given key.
    pub fn new(key: TrialKey) -> Self {
        Self {
            key,
            records: Vec::new(),
        }
    }

    /// Onset delay of this trial, taken from its first sample.
    pub fn tau(&self) -> f64 {
        self.records.first().map(|r| r.tau).unwrap_or_default()
    }

    /// Frame timestamps, in recording order.
    pub fn times(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.t).collect()
    }

    /// Observed pointer y positions, in recording order.
    pub fn pointer_positions(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.y_p).collect()
    }

    /// Ideal target positions, in recording order.
    pub fn target_positions(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.y_t).collect()
    }

    /// Number of samples in this trial.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the trial has no samples.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sort samples by timestamp, keeping input order on ties.
    pub(crate) fn sort_by_time(&mut self) {
        self.records.sort_by(|a, b| a.t.total_cmp(&b.t));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(t: f64, y_p: f64) -> SessionRecord {
        SessionRecord {
            participant: "P01".to_string(),
            condition: "1".to_string(),
            trial: 0,
            tau: 0.5,
            t,
            y_t: 0.0,
            x_p: 0.0,
            y_p,
        }
    }

    #[test]
    fn test_trial_accessors() {
        let key = TrialKey {
            participant: "P01".to_string(),
            condition: "1".to_string(),
            trial: 0,
        };
        let mut trial = Trial::new(key);
        trial.records.push(make_record(0.0, -200.0));
        trial.records.push(make_record(0.1, -190.0));

        assert_eq!(trial.len(), 2);
        assert_eq!(trial.tau(), 0.5);
        assert_eq!(trial.times(), vec![0.0, 0.1]);
        assert_eq!(trial.pointer_positions(), vec![-200.0, -190.0]);
    }

    #[test]
    fn test_sort_by_time() {
        let key = TrialKey {
            participant: "P01".to_string(),
            condition: "1".to_string(),
            trial: 0,
        };
        let mut trial = Trial::new(key);
        trial.records.push(make_record(0.2, 1.0));
        trial.records.push(make_record(0.0, 2.0));
        trial.records.push(make_record(0.1, 3.0));
        trial.sort_by_time();

        assert_eq!(trial.times(), vec![0.0, 0.1, 0.2]);
        assert_eq!(trial.pointer_positions(), vec![2.0, 3.0, 1.0]);
    }

    #[test]
    fn test_key_ordering() {
        let a = TrialKey {
            participant: "P01".to_string(),
            condition: "1".to_string(),
            trial: 2,
        };
        let b = TrialKey {
            participant: "P01".to_string(),
            condition: "2".to_string(),
            trial: 1,
        };
        assert!(a < b);
    }
}

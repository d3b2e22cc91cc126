//! Per-trial metric computation.
//!
//! Onset/offset detection plus truth-centered window statistics for one
//! trial. Missing detections and underfilled windows degrade to `None`
//! fields; a trial never fails outright, so one bad trial cannot affect the
//! others.

use crate::analysis::events::{first_cross_time, first_sustain_time, Direction};
use crate::analysis::velocity::compute_velocity;
use crate::config::AnalysisConfig;
use crate::session::Trial;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Metrics derived from a single trial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialMetrics {
    pub participant: String,
    pub condition: String,
    pub trial: i64,
    /// Randomized onset delay of this trial in seconds
    pub tau: f64,
    /// Detected movement onset time
    pub t_start: Option<f64>,
    /// Detected movement offset time
    pub t_end: Option<f64>,
    /// Pointer position variance in the window around tau
    pub pos_var_start: Option<f64>,
    /// Pointer position variance in the window around tau + T
    pub pos_var_end: Option<f64>,
    /// Mean pointer position in the window around tau + T
    pub y_end_mean: Option<f64>,
    /// Mean squared tracking error over [tau, tau + T]
    pub mse_truth: Option<f64>,
}

/// Compute all metrics for one trial.
///
/// The variance and error windows center on the ideal schedule (`tau` and
/// `tau + T`), not on the detected onset/offset, so window placement stays
/// independent of the detection strategy.
pub fn compute_trial_metrics(trial: &Trial, config: &AnalysisConfig) -> TrialMetrics {
    let t = trial.times();
    let y_p = trial.pointer_positions();
    let y_t = trial.target_positions();
    let tau = trial.tau();

    let velocity = compute_velocity(&y_p, &t);

    // Physical start/goal coordinates of the vertical reach
    let y_start = -config.travel_px / 2.0;
    let y_goal = config.travel_px / 2.0;

    let (t_start, t_end) = if config.use_velocity {
        let moving: Vec<bool> = velocity.iter().map(|&v| v >= config.v_start).collect();
        let t_start = first_sustain_time(&t, &moving, config.hold_start_ms / 1000.0);

        // The pointer rests at the start position before tau, so an offset
        // search over the whole trial would latch onto that pre-motion
        // stillness. Search only from the detected onset onward.
        let t_end = t_start.and_then(|onset| {
            let from = t.partition_point(|&ti| ti < onset);
            let still: Vec<bool> = velocity[from..]
                .iter()
                .map(|&v| v.abs() <= config.v_stop)
                .collect();
            first_sustain_time(&t[from..], &still, config.hold_stop_ms / 1000.0)
        });
        (t_start, t_end)
    } else {
        (
            first_cross_time(&t, &y_p, y_start + config.start_margin_px, Direction::Up),
            first_cross_time(&t, &y_p, y_goal - config.end_margin_px, Direction::Up),
        )
    };

    // Truth-centered windows around the ideal motion start and end
    let center_start = tau;
    let center_end = tau + config.motion_duration_s;
    let half_width = config.poswin_ms / 1000.0;

    let start_window = window_values(&t, &y_p, center_start, half_width);
    let end_window = window_values(&t, &y_p, center_end, half_width);

    let pos_var_start = sample_variance(&start_window);
    let pos_var_end = sample_variance(&end_window);
    let y_end_mean = if end_window.is_empty() {
        None
    } else {
        Some((&end_window).mean())
    };

    // Tracking error over the ideal motion interval, bounds inclusive
    let squared_errors: Vec<f64> = t
        .iter()
        .zip(y_p.iter().zip(&y_t))
        .filter(|(&ti, _)| ti >= center_start && ti <= center_end)
        .map(|(_, (&yp, &yt))| (yp - yt) * (yp - yt))
        .collect();
    let mse_truth = if squared_errors.is_empty() {
        None
    } else {
        Some((&squared_errors).mean())
    };

    TrialMetrics {
        participant: trial.key.participant.clone(),
        condition: trial.key.condition.clone(),
        trial: trial.key.trial,
        tau,
        t_start,
        t_end,
        pos_var_start,
        pos_var_end,
        y_end_mean,
        mse_truth,
    }
}

/// Pointer positions sampled within `center ± half_width`, bounds inclusive.
fn window_values(t: &[f64], y: &[f64], center: f64, half_width: f64) -> Vec<f64> {
    t.iter()
        .zip(y)
        .filter(|(&ti, _)| ti >= center - half_width && ti <= center + half_width)
        .map(|(_, &yi)| yi)
        .collect()
}

/// Sample variance (N-1 denominator), undefined below two values.
fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        None
    } else {
        Some(values.variance())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SessionRecord, TrialKey};

    fn make_trial(samples: &[(f64, f64, f64)], tau: f64) -> Trial {
        // samples: (t, y_t, y_p)
        let key = TrialKey {
            participant: "P01".to_string(),
            condition: "1".to_string(),
            trial: 0,
        };
        let mut trial = Trial::new(key);
        for &(t, y_t, y_p) in samples {
            trial.records.push(SessionRecord {
                participant: "P01".to_string(),
                condition: "1".to_string(),
                trial: 0,
                tau,
                t,
                y_t,
                x_p: 0.0,
                y_p,
            });
        }
        trial
    }

    fn position_config() -> AnalysisConfig {
        AnalysisConfig {
            use_velocity: false,
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn test_single_sample_window_variance_undefined() {
        // One sample inside the start window, one inside the end window
        let config = position_config();
        let trial = make_trial(&[(0.5, -200.0, -200.0), (1.5, 200.0, 199.0)], 0.5);
        let metrics = compute_trial_metrics(&trial, &config);

        assert!(metrics.pos_var_start.is_none());
        assert!(metrics.pos_var_end.is_none());
        // The end window still has a defined mean from its single sample
        assert_eq!(metrics.y_end_mean, Some(199.0));
    }

    #[test]
    fn test_mse_window_bounds_inclusive() {
        // Samples exactly at tau and tau + T contribute to the error
        let config = position_config();
        let trial = make_trial(
            &[
                (0.0, -200.0, -200.0),
                (0.5, -200.0, -197.0),
                (1.5, 200.0, 204.0),
                (1.8, 200.0, 200.0),
            ],
            0.5,
        );
        let metrics = compute_trial_metrics(&trial, &config);

        // (9 + 16) / 2: only the samples at t = 0.5 and t = 1.5 qualify
        assert_eq!(metrics.mse_truth, Some(12.5));
    }

    #[test]
    fn test_position_detection_thresholds() {
        let config = position_config();
        // Start threshold -180, end threshold 180 with default margins
        let trial = make_trial(
            &[
                (0.0, -200.0, -200.0),
                (0.1, -200.0, -185.0),
                (0.2, -200.0, -175.0),
                (0.3, -200.0, 0.0),
                (0.4, -200.0, 185.0),
            ],
            0.5,
        );
        let metrics = compute_trial_metrics(&trial, &config);

        assert_eq!(metrics.t_start, Some(0.2));
        assert_eq!(metrics.t_end, Some(0.4));
    }

    #[test]
    fn test_velocity_offset_anchored_at_onset() {
        let config = AnalysisConfig {
            hold_start_ms: 50.0,
            hold_stop_ms: 50.0,
            ..AnalysisConfig::default()
        };

        // Stationary hold, a fast ramp, then stationary again. The hold
        // before motion must not be reported as the offset.
        let mut samples = Vec::new();
        for i in 0..20 {
            let t = i as f64 * 0.05;
            let y = if t < 0.5 {
                -200.0
            } else if t < 0.7 {
                -200.0 + (t - 0.5) * 2000.0
            } else {
                200.0
            };
            samples.push((t, y, y));
        }
        let trial = make_trial(&samples, 0.5);
        let metrics = compute_trial_metrics(&trial, &config);

        let t_start = metrics.t_start.expect("onset detected");
        let t_end = metrics.t_end.expect("offset detected");
        assert!(t_start >= 0.4 && t_start <= 0.6, "t_start = {t_start}");
        assert!(t_end > t_start, "offset before onset: {t_end}");
        assert!(t_end >= 0.65, "offset latched pre-motion stillness: {t_end}");
    }

    #[test]
    fn test_no_onset_means_no_offset() {
        let config = AnalysisConfig::default();
        // Pointer never moves: no sustained v >= v_start run exists
        let samples: Vec<(f64, f64, f64)> = (0..30)
            .map(|i| (i as f64 * 0.05, -200.0, -200.0))
            .collect();
        let trial = make_trial(&samples, 0.5);
        let metrics = compute_trial_metrics(&trial, &config);

        assert!(metrics.t_start.is_none());
        assert!(metrics.t_end.is_none());
    }

    #[test]
    fn test_empty_windows_are_undefined() {
        let config = position_config();
        // All samples fall before the truth windows
        let trial = make_trial(&[(0.0, -200.0, -200.0), (0.1, -200.0, -200.0)], 2.0);
        let metrics = compute_trial_metrics(&trial, &config);

        assert!(metrics.pos_var_start.is_none());
        assert!(metrics.pos_var_end.is_none());
        assert!(metrics.y_end_mean.is_none());
        assert!(metrics.mse_truth.is_none());
    }

    #[test]
    fn test_variance_matches_sample_convention() {
        let config = position_config();
        // Three samples in the start window around tau = 0.5
        let trial = make_trial(
            &[
                (0.45, -200.0, -201.0),
                (0.5, -200.0, -200.0),
                (0.55, -200.0, -199.0),
            ],
            0.5,
        );
        let metrics = compute_trial_metrics(&trial, &config);

        // Sample variance of [-201, -200, -199] is 1.0
        let var = metrics.pos_var_start.expect("variance defined");
        assert!((var - 1.0).abs() < 1e-12);
    }
}

//! Synthetic session generation.
//!
//! Produces session logs in the same schema the presentation front-end
//! records, so the pipeline can be exercised without collecting data. Two
//! conditions are generated: condition "1" uses the fixed mean delay every
//! trial, condition "2" draws the delay from a normal distribution clipped
//! at zero. A fixed seed reproduces the session exactly.

use crate::config::{AnalysisConfig, SimulationConfig};
use crate::report::ReportError;
use crate::session::SessionRecord;
use crate::stimulus::target_position;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use statrs::distribution::{ContinuousCDF, Normal};
use std::path::Path;

/// Pointer behavior for simulated trials.
///
/// The default pointer tracks the target perfectly.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerModel {
    /// Reaction lag between target and pointer in seconds
    pub lag_s: f64,
    /// Standard deviation of added position noise in pixels
    pub noise_px: f64,
}

/// Generate one synthetic session for a single participant.
///
/// Each trial records from time zero until `tau + T + post_motion_s` at the
/// configured frame rate. The pointer follows the ideal trajectory shifted
/// by the reaction lag, with optional Gaussian position noise.
pub fn generate_session(
    participant: &str,
    analysis: &AnalysisConfig,
    simulation: &SimulationConfig,
    pointer: PointerModel,
    seed: u64,
) -> Vec<SessionRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dt = 1.0 / simulation.sample_rate_hz;
    let mut records = Vec::new();

    for condition in ["1", "2"] {
        for trial in 0..simulation.trials_per_condition {
            let tau = if condition == "1" {
                simulation.mean_delay_s
            } else {
                sample_normal(&mut rng, simulation.mean_delay_s, simulation.delay_sd_s).max(0.0)
            };

            let total = tau + analysis.motion_duration_s + simulation.post_motion_s;
            let frames = (total * simulation.sample_rate_hz).floor() as u64;
            for frame in 0..=frames {
                let t = frame as f64 * dt;
                let y_t = target_position(t, tau, analysis.travel_px, analysis.motion_duration_s);
                let noise = if pointer.noise_px > 0.0 {
                    sample_normal(&mut rng, 0.0, pointer.noise_px)
                } else {
                    0.0
                };
                let y_p = target_position(
                    t - pointer.lag_s,
                    tau,
                    analysis.travel_px,
                    analysis.motion_duration_s,
                ) + noise;

                records.push(SessionRecord {
                    participant: participant.to_string(),
                    condition: condition.to_string(),
                    trial: trial as i64,
                    tau,
                    t,
                    y_t,
                    x_p: 0.0,
                    y_p,
                });
            }
        }
    }

    records
}

/// Write a synthetic session to a CSV in the recorded-log schema.
pub fn write_session_csv(path: &Path, records: &[SessionRecord]) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| ReportError::Csv(e.to_string()))?;

    writer
        .write_record([
            "participant",
            "condition",
            "trial",
            "tau",
            "t",
            "y_t",
            "x_p",
            "y_p",
        ])
        .map_err(|e| ReportError::Csv(e.to_string()))?;

    for record in records {
        writer
            .write_record(&[
                record.participant.clone(),
                record.condition.clone(),
                record.trial.to_string(),
                record.tau.to_string(),
                record.t.to_string(),
                record.y_t.to_string(),
                record.x_p.to_string(),
                record.y_p.to_string(),
            ])
            .map_err(|e| ReportError::Csv(e.to_string()))?;
    }

    writer.flush().map_err(|e| ReportError::Io(e.to_string()))?;
    Ok(())
}

/// Draw from a normal distribution by inverse-transform sampling.
fn sample_normal(rng: &mut StdRng, mean: f64, sd: f64) -> f64 {
    match Normal::new(mean, sd) {
        Ok(dist) => {
            // Open interval keeps the quantile finite
            let u = rng.random_range(f64::EPSILON..1.0 - f64::EPSILON);
            dist.inverse_cdf(u)
        }
        // A degenerate spread collapses to the mean
        Err(_) => mean,
    }
}

//! Velocity estimation from sampled position sequences.

/// Floor for time deltas, guarding division on duplicate timestamps.
const MIN_DT: f64 = 1e-12;

/// Estimate instantaneous velocity at each sample.
///
/// Interior samples use the central difference over their neighbors; the
/// endpoints fall back to forward/backward differences. A single sample
/// yields zero velocity.
///
/// # Panics
///
/// Panics when `values` and `times` differ in length.
pub fn compute_velocity(values: &[f64], times: &[f64]) -> Vec<f64> {
    assert_eq!(
        values.len(),
        times.len(),
        "values and times must have equal length"
    );

    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    let mut velocity = vec![0.0; n];
    if n == 1 {
        return velocity;
    }

    velocity[0] = (values[1] - values[0]) / (times[1] - times[0]).max(MIN_DT);
    velocity[n - 1] = (values[n - 1] - values[n - 2]) / (times[n - 1] - times[n - 2]).max(MIN_DT);
    for i in 1..n - 1 {
        velocity[i] = (values[i + 1] - values[i - 1]) / (times[i + 1] - times[i - 1]).max(MIN_DT);
    }

    velocity
}

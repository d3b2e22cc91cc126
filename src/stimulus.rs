//! Ideal target trajectory.
//!
//! The presentation front-end moves the target along a minimum-jerk easing
//! curve after the randomized onset delay; the analysis consumes the result
//! as the `y_t` column of the session log. These functions reproduce that
//! schedule for synthetic sessions and tests.

/// Minimum-jerk easing from 0 at `t <= 0` to 1 at `t >= duration`.
pub fn bell_shape(t: f64, duration: f64) -> f64 {
    let s = (t / duration).clamp(0.0, 1.0);
    10.0 * s.powi(3) - 15.0 * s.powi(4) + 6.0 * s.powi(5)
}

/// Ideal target position at elapsed time `t`.
///
/// Held at `-travel / 2` until `tau`, eased across the travel distance over
/// `duration` seconds, held at `+travel / 2` after.
pub fn target_position(t: f64, tau: f64, travel: f64, duration: f64) -> f64 {
    if t < tau {
        -travel / 2.0
    } else if t < tau + duration {
        -travel / 2.0 + travel * bell_shape(t - tau, duration)
    } else {
        travel / 2.0
    }
}

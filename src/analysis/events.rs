//! Event detection over sampled sequences.
//!
//! Two strategies: a sustained-condition detector that requires a boolean
//! condition to hold continuously for a minimum duration, and a simple
//! first-crossing detector on a position sequence. Both are pure single-pass
//! scans that report "no event" as `None` rather than failing.

/// Crossing direction for [`first_cross_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Look for `y >= threshold`
    Up,
    /// Look for `y <= threshold`
    Down,
}

/// First time `cond` holds continuously for at least `min_duration_s`.
///
/// Returns the timestamp where the qualifying run began, not the time the
/// duration requirement was met. A `false` sample resets the run. Empty or
/// length-mismatched inputs yield `None`.
pub fn first_sustain_time(t: &[f64], cond: &[bool], min_duration_s: f64) -> Option<f64> {
    if t.is_empty() || cond.is_empty() || t.len() != cond.len() {
        return None;
    }

    let mut run_start: Option<usize> = None;
    for i in 0..t.len() {
        if cond[i] {
            let start = *run_start.get_or_insert(i);
            if t[i] - t[start] >= min_duration_s {
                return Some(t[start]);
            }
        } else {
            run_start = None;
        }
    }
    None
}

/// First time the position reaches `threshold` in the given direction.
///
/// Empty or length-mismatched inputs yield `None`.
pub fn first_cross_time(t: &[f64], y: &[f64], threshold: f64, direction: Direction) -> Option<f64> {
    if t.is_empty() || y.is_empty() || t.len() != y.len() {
        return None;
    }

    t.iter()
        .zip(y)
        .find(|(_, &yi)| match direction {
            Direction::Up => yi >= threshold,
            Direction::Down => yi <= threshold,
        })
        .map(|(&ti, _)| ti)
}

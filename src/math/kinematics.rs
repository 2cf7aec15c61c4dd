//! Kinematic signals derived from positions.

use crate::error::{MiningError, Result};
use crate::math::frame::wrap_angle;
use crate::math::polyfit::extend_by_extrapolation;
use crate::sample::KinematicSample;

/// Seconds per timestamp tick (timestamps are microseconds).
pub const TIMESTAMP_SCALE: f64 = 1e-6;

/// Per-sample planar speed from positional deltas over timestamp deltas.
///
/// Speeds are forward differences, so the trailing sample is extrapolated
/// (see [`crate::math::polyfit::extrapolate_next`]). A single sample has
/// speed `0.0`.
///
/// # Errors
///
/// Returns an error if lengths differ or timestamps are not strictly
/// increasing.
pub fn derive_speeds(positions: &[[f64; 3]], timestamps: &[i64]) -> Result<Vec<f64>> {
    if positions.len() != timestamps.len() {
        return Err(MiningError::length_mismatch(positions.len(), timestamps.len()));
    }
    if positions.len() == 1 {
        return Ok(vec![0.0]);
    }

    let mut speeds = Vec::with_capacity(positions.len());
    for (i, (p, t)) in positions.windows(2).zip(timestamps.windows(2)).enumerate() {
        let ticks = t[1] - t[0];
        if ticks <= 0 {
            return Err(MiningError::non_monotonic(i + 1));
        }
        let dt = ticks as f64 * TIMESTAMP_SCALE;
        let dist = (p[1][0] - p[0][0]).hypot(p[1][1] - p[0][1]);
        speeds.push(dist / dt);
    }
    extend_by_extrapolation(&mut speeds);
    for s in &mut speeds {
        *s = s.max(0.0);
    }
    Ok(speeds)
}

/// Overwrite each sample's speed with the position-derived speed.
///
/// # Errors
///
/// See [`derive_speeds`].
pub fn apply_derived_speeds(samples: &mut [KinematicSample]) -> Result<()> {
    let positions: Vec<[f64; 3]> = samples.iter().map(|s| s.position).collect();
    let timestamps: Vec<i64> = samples.iter().map(|s| s.timestamp).collect();
    let speeds = derive_speeds(&positions, &timestamps)?;
    for (sample, speed) in samples.iter_mut().zip(speeds) {
        sample.speed = speed;
    }
    Ok(())
}

/// Heading of travel estimated from consecutive planar positions.
///
/// Returns one value per input point; the last is extrapolated and wrapped.
/// Fewer than two points give no direction of travel and yield an empty vector.
#[must_use]
pub fn estimate_headings(xy: &[[f64; 2]]) -> Vec<f64> {
    if xy.len() < 2 {
        return Vec::new();
    }
    let mut headings: Vec<f64> = xy
        .windows(2)
        .map(|w| (w[1][1] - w[0][1]).atan2(w[1][0] - w[0][0]))
        .collect();
    extend_by_extrapolation(&mut headings);
    if let Some(last) = headings.last_mut() {
        *last = wrap_angle(*last);
    }
    headings
}

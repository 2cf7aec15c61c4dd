//! Speed-profile detectors: accelerate, decelerate, stop.
//!
//! All three require the speed to change monotonically by more than
//! `min_step` at every frame and by more than `min_speed_change` end to end.

use crate::config::LongitudinalThresholds;
use crate::signals::Signals;
use crate::window::window_mask;

fn rising(speed: &[f64], min_step: f64) -> bool {
    speed.windows(2).all(|p| p[1] - p[0] > min_step)
}

fn falling(speed: &[f64], min_step: f64) -> bool {
    speed.windows(2).all(|p| p[1] - p[0] < -min_step)
}

/// Speed change from the first to the last sample of a window.
fn change(speed: &[f64]) -> f64 {
    match (speed.first(), speed.last()) {
        (Some(first), Some(last)) => last - first,
        _ => 0.0,
    }
}

pub fn accelerate(subject: &Signals, t: &LongitudinalThresholds, width: usize) -> Vec<bool> {
    let v = subject.speed();
    window_mask(v.len(), width, |r| {
        let w = &v[r];
        rising(w, t.min_step) && change(w) > t.min_speed_change
    })
}

/// Slowing down while still driving at the end of the window.
pub fn decelerate(subject: &Signals, t: &LongitudinalThresholds, width: usize) -> Vec<bool> {
    let v = subject.speed();
    window_mask(v.len(), width, |r| {
        let w = &v[r];
        falling(w, t.min_step)
            && -change(w) > t.min_speed_change
            && w.last().is_some_and(|&end| end > t.min_cruise_speed)
    })
}

/// Slowing down to (nearly) standstill.
pub fn stop(subject: &Signals, t: &LongitudinalThresholds, width: usize) -> Vec<bool> {
    let v = subject.speed();
    window_mask(v.len(), width, |r| {
        let w = &v[r];
        falling(w, t.min_step)
            && -change(w) > t.min_speed_change
            && w.last().is_some_and(|&end| end < t.max_stop_speed)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_support::straight;
    use crate::sample::ActorKind;

    fn vehicle(speed: &[f64]) -> Signals {
        straight(ActorKind::Vehicle, [0.0, 0.0], 0.0, speed)
    }

    #[test]
    fn test_accelerate_ramp() {
        let t = LongitudinalThresholds::default();
        let mask = accelerate(&vehicle(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]), &t, 6);
        assert_eq!(mask, vec![true, true]);
    }

    #[test]
    fn test_accelerate_needs_every_step() {
        let t = LongitudinalThresholds::default();
        // Plateau in the middle breaks monotonicity.
        let mask = accelerate(&vehicle(&[0.0, 2.0, 4.0, 4.0, 6.0, 8.0]), &t, 6);
        assert_eq!(mask, vec![false]);
        // Monotonic but too small a change.
        let mask = accelerate(&vehicle(&[1.0, 1.2, 1.4, 1.6, 1.8, 2.0]), &t, 6);
        assert_eq!(mask, vec![false]);
    }

    #[test]
    fn test_decelerate_vs_stop() {
        let t = LongitudinalThresholds::default();
        let slowing = vehicle(&[10.0, 9.0, 8.0, 7.0, 6.0, 5.0]);
        assert_eq!(decelerate(&slowing, &t, 6), vec![true]);
        assert_eq!(stop(&slowing, &t, 6), vec![false]);

        let stopping = vehicle(&[4.0, 3.2, 2.4, 1.6, 0.8, 0.2]);
        assert_eq!(decelerate(&stopping, &t, 6), vec![false]);
        assert_eq!(stop(&stopping, &t, 6), vec![true]);
    }

    #[test]
    fn test_short_series_gives_no_windows() {
        let t = LongitudinalThresholds::default();
        assert!(accelerate(&vehicle(&[0.0, 5.0]), &t, 6).is_empty());
    }
}

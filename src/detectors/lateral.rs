//! Heading and lane detectors: lane change, left / right turn, U-turn, reverse.

use std::ops::Range;

use crate::config::{ReverseThresholds, TurnThresholds};
use crate::math::frame::angle_delta;
use crate::math::kinematics::estimate_headings;
use crate::math::stats::mean;
use crate::signals::Signals;
use crate::window::window_mask;

/// Lane id changes between two consecutive frames of the window.
///
/// Frames on no lane are ignored: a transition to or from "no lane" does
/// not count as a change.
pub fn lane_change(subject: &Signals, width: usize) -> Vec<bool> {
    let lanes: Vec<Option<i64>> = subject.map().iter().map(|m| m.lane_id()).collect();
    window_mask(lanes.len(), width, |r| {
        lanes[r].windows(2).any(|p| match (p[0], p[1]) {
            (Some(a), Some(b)) => a != b,
            _ => false,
        })
    })
}

/// Wrapped yaw change from the first to the last frame of a window.
fn yaw_change(yaw: &[f64], r: Range<usize>) -> f64 {
    angle_delta(yaw[r.start], yaw[r.end - 1])
}

pub fn left_turn(subject: &Signals, t: &TurnThresholds, width: usize) -> Vec<bool> {
    let yaw = subject.yaw();
    window_mask(yaw.len(), width, |r| yaw_change(yaw, r) > t.turn_yaw)
}

pub fn right_turn(subject: &Signals, t: &TurnThresholds, width: usize) -> Vec<bool> {
    let yaw = subject.yaw();
    window_mask(yaw.len(), width, |r| yaw_change(yaw, r) < -t.turn_yaw)
}

pub fn u_turn(subject: &Signals, t: &TurnThresholds, width: usize) -> Vec<bool> {
    let yaw = subject.yaw();
    window_mask(yaw.len(), width, |r| yaw_change(yaw, r).abs() > t.u_turn_yaw)
}

/// Direction of travel disagrees with the reported heading in more than
/// half the window while the vehicle is moving.
pub fn reverse(subject: &Signals, t: &ReverseThresholds, width: usize) -> Vec<bool> {
    let travel = estimate_headings(&subject.xy());
    if travel.len() != subject.len() {
        return Vec::new();
    }
    let mismatched: Vec<bool> = travel
        .iter()
        .zip(subject.yaw())
        .map(|(&est, &yaw)| angle_delta(est, yaw).abs() > t.heading_mismatch)
        .collect();
    let speed = subject.speed();
    window_mask(subject.len(), width, |r| {
        let count = mismatched[r.clone()].iter().filter(|&&m| m).count();
        count > width / 2 && mean(&speed[r]).is_some_and(|v| v > t.min_mean_speed)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_support::{series, straight, with_map};
    use crate::sample::{ActorKind, MapMembership};
    use std::f64::consts::PI;

    fn lanes(ids: &[i64]) -> Vec<MapMembership> {
        ids.iter().map(|&id| MapMembership::EMPTY.with_lane(id)).collect()
    }

    #[test]
    fn test_lane_change() {
        let s = with_map(ActorKind::Vehicle, &[5.0; 7], &lanes(&[1, 1, 1, 2, 2, 2, 2]));
        assert_eq!(lane_change(&s, 6), vec![true, true]);
    }

    #[test]
    fn test_lane_change_ignores_missing_lane() {
        let s = with_map(ActorKind::Vehicle, &[5.0; 6], &lanes(&[1, 1, -1, 1, 1, 1]));
        assert_eq!(lane_change(&s, 6), vec![false]);
        // Gap between two different lanes is masked out as well.
        let s = with_map(ActorKind::Vehicle, &[5.0; 6], &lanes(&[1, 1, -1, 2, 2, 2]));
        assert_eq!(lane_change(&s, 6), vec![false]);
    }

    fn turning(yaw: &[f64]) -> Signals {
        let n = yaw.len();
        let xy: Vec<[f64; 2]> = (0..n).map(|i| [i as f64, 0.0]).collect();
        series(ActorKind::Vehicle, &xy, yaw, &vec![5.0; n], &[])
    }

    #[test]
    fn test_turns() {
        let t = TurnThresholds::default();
        let left = turning(&[0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
        assert_eq!(left_turn(&left, &t, 6), vec![true]);
        assert_eq!(right_turn(&left, &t, 6), vec![false]);
        assert_eq!(u_turn(&left, &t, 6), vec![false]);

        let right = turning(&[0.0, -0.2, -0.4, -0.6, -0.8, -1.0]);
        assert_eq!(right_turn(&right, &t, 6), vec![true]);
        assert_eq!(left_turn(&right, &t, 6), vec![false]);
    }

    #[test]
    fn test_turn_across_pi_wraps() {
        let t = TurnThresholds::default();
        // 3.0 -> -2.9 is a +0.38 rad left turn across the branch cut, not -5.9.
        let s = turning(&[3.0, 3.1, -3.1, -3.0, -2.95, -2.9]);
        assert_eq!(left_turn(&s, &t, 6), vec![false]);
        assert_eq!(right_turn(&s, &t, 6), vec![false]);
        assert_eq!(u_turn(&s, &t, 6), vec![false]);
    }

    #[test]
    fn test_u_turn() {
        let t = TurnThresholds::default();
        let s = turning(&[0.0, 0.5, 1.0, 1.5, 2.0, 2.5]);
        assert_eq!(u_turn(&s, &t, 6), vec![true]);
    }

    #[test]
    fn test_reverse() {
        let t = ReverseThresholds::default();
        // Facing +x while travelling towards -x.
        let n = 6;
        let xy: Vec<[f64; 2]> = (0..n).map(|i| [-(i as f64), 0.0]).collect();
        let backing = series(ActorKind::Vehicle, &xy, &vec![0.0; n], &vec![2.0; n], &[]);
        assert_eq!(reverse(&backing, &t, 6), vec![true]);

        let forward = straight(ActorKind::Vehicle, [0.0, 0.0], 0.0, &[2.0; 6]);
        assert_eq!(reverse(&forward, &t, 6), vec![false]);

        let yaw_pi = series(ActorKind::Vehicle, &xy, &vec![PI; n], &vec![2.0; n], &[]);
        assert_eq!(reverse(&yaw_pi, &t, 6), vec![false]);
    }

    #[test]
    fn test_reverse_needs_speed() {
        let t = ReverseThresholds::default();
        let n = 6;
        let xy: Vec<[f64; 2]> = (0..n).map(|i| [-(i as f64) * 0.1, 0.0]).collect();
        let creeping = series(ActorKind::Vehicle, &xy, &vec![0.0; n], &vec![0.2; n], &[]);
        assert_eq!(reverse(&creeping, &t, 6), vec![false]);
    }
}

//! Two-participant interaction detectors.
//!
//! Relative positions are expressed in the other participant's body frame:
//! `x < 0` is behind it, `x > 0` ahead of it, `y` is the lateral offset.

use crate::config::{FollowThresholds, InteractionThresholds, WaitThresholds};
use crate::math::stats::{max, mean};
use crate::signals::Signals;
use crate::window::{all_in, any_in, window_mask};

/// Subject moves from behind the other to ahead of it while both move
/// in the same direction, staying close and faster at every frame.
pub fn overtake(
    subject: &Signals,
    other: &Signals,
    t: &InteractionThresholds,
    width: usize,
) -> Vec<bool> {
    let rel = subject.positions_in(other);
    let dist = subject.distances_to(other);
    let gaps = subject.heading_gaps_deg(other);
    let (v, ov) = (subject.speed(), other.speed());

    window_mask(subject.len(), width, |r| {
        rel[r.start].x < 0.0
            && rel[r.end - 1].x > 0.0
            && all_in(&dist, r.clone(), |&d| d < t.max_overtake_distance)
            && r.clone().all(|i| v[i] > ov[i])
            && all_in(v, r.clone(), |&s| s > t.min_speed)
            && all_in(ov, r.clone(), |&s| s > t.min_speed)
            && all_in(&gaps, r, |&g| g < t.max_heading_gap_deg)
    })
}

/// Subject moves from behind a standing participant to ahead of it.
pub fn pass(
    subject: &Signals,
    other: &Signals,
    t: &InteractionThresholds,
    width: usize,
) -> Vec<bool> {
    let rel = subject.positions_in(other);
    let dist = subject.distances_to(other);
    let gaps = subject.heading_gaps_deg(other);
    let (v, ov) = (subject.speed(), other.speed());

    window_mask(subject.len(), width, |r| {
        rel[r.start].x < 0.0
            && rel[r.end - 1].x > 0.0
            && max(&dist[r.clone()]).is_some_and(|d| d < t.max_pass_distance)
            && all_in(v, r.clone(), |&s| s > t.min_speed)
            && all_in(ov, r.clone(), |&s| s < t.min_speed)
            && all_in(&gaps, r, |&g| g < t.max_heading_gap_deg)
    })
}

/// Same lane, steady distance, similar speed; `ahead` selects lead over follow.
fn convoy(
    subject: &Signals,
    other: &Signals,
    t: &FollowThresholds,
    width: usize,
    ahead: bool,
) -> Vec<bool> {
    let rel = subject.positions_in(other);
    let dist = subject.distances_to(other);
    let (v, ov) = (subject.speed(), other.speed());

    window_mask(subject.len(), width, |r| {
        all_in(&rel, r.clone(), |p| {
            p.y.abs() < t.max_lateral_offset && if ahead { p.x > 0.0 } else { p.x < 0.0 }
        }) && all_in(&dist, r.clone(), |&d| d < t.max_distance)
            && r.clone().all(|i| (v[i] - ov[i]).abs() < t.max_speed_gap)
            && all_in(v, r.clone(), |&s| s > t.min_speed)
            && all_in(ov, r, |&s| s > t.min_speed)
    })
}

/// Subject drives behind the other in its lane.
pub fn follow(subject: &Signals, other: &Signals, t: &FollowThresholds, width: usize) -> Vec<bool> {
    convoy(subject, other, t, width, false)
}

/// Subject drives ahead of the other in its lane.
pub fn lead(subject: &Signals, other: &Signals, t: &FollowThresholds, width: usize) -> Vec<bool> {
    convoy(subject, other, t, width, true)
}

/// A (nearly) stopped vehicle close to a pedestrian who is on a crossing
/// at least once in the window.
pub fn wait_ped_cross(
    subject: &Signals,
    pedestrian: &Signals,
    t: &WaitThresholds,
    width: usize,
) -> Vec<bool> {
    let dist = subject.distances_to(pedestrian);
    let v = subject.speed();
    let map = pedestrian.map();

    window_mask(subject.len(), width, |r| {
        mean(&v[r.clone()]).is_some_and(|s| s < t.max_mean_speed)
            && max(&dist[r.clone()]).is_some_and(|d| d < t.max_distance)
            && any_in(map, r, |m| m.on_ped_crossing())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_support::{parked, series, straight};
    use crate::sample::{ActorKind, MapMembership};

    #[test]
    fn test_overtake() {
        let t = InteractionThresholds::vehicle();
        // Other at 6 m/s from x=0; subject at 8 m/s starting 2.5 m behind,
        // 3 m to the left. Gains 1 m per frame.
        let other = straight(ActorKind::Vehicle, [0.0, 0.0], 0.0, &[6.0; 6]);
        let subject = straight(ActorKind::Vehicle, [-2.5, 3.0], 0.0, &[8.0; 6]);
        assert_eq!(overtake(&subject, &other, &t, 6), vec![true]);
        // Reversed roles: never moves from behind to ahead.
        assert_eq!(overtake(&other, &subject, &t, 6), vec![false]);
    }

    #[test]
    fn test_overtake_requires_proximity() {
        let t = InteractionThresholds::vehicle();
        let other = straight(ActorKind::Vehicle, [0.0, 0.0], 0.0, &[6.0; 6]);
        let far = straight(ActorKind::Vehicle, [-2.5, 8.0], 0.0, &[8.0; 6]);
        assert_eq!(overtake(&far, &other, &t, 6), vec![false]);
    }

    #[test]
    fn test_pass_standing() {
        let t = InteractionThresholds::vehicle();
        let other = parked(ActorKind::Vehicle, [0.0, 0.0], 0.0, 6);
        // 4 m/s -> 2 m per frame: x from -5 to 5.
        let subject = straight(ActorKind::Vehicle, [-5.0, 3.0], 0.0, &[4.0; 6]);
        assert_eq!(pass(&subject, &other, &t, 6), vec![true]);
        assert_eq!(overtake(&subject, &other, &t, 6), vec![false]);
    }

    #[test]
    fn test_pass_rejects_missing_position() {
        let t = InteractionThresholds::vehicle();
        let other = parked(ActorKind::Vehicle, [0.0, 0.0], 0.0, 6);
        let mut xy: Vec<[f64; 2]> = (0..6).map(|i| [-5.0 + 2.0 * i as f64, 3.0]).collect();
        let subject = series(ActorKind::Vehicle, &xy, &[0.0; 6], &[4.0; 6], &[]);
        assert_eq!(pass(&subject, &other, &t, 6), vec![true]);

        xy[2] = [f64::NAN, 3.0];
        let gap = series(ActorKind::Vehicle, &xy, &[0.0; 6], &[4.0; 6], &[]);
        assert_eq!(pass(&gap, &other, &t, 6), vec![false]);
    }

    #[test]
    fn test_follow_and_lead() {
        let t = FollowThresholds::default();
        let front = straight(ActorKind::Vehicle, [10.0, 0.0], 0.0, &[8.0; 6]);
        let back = straight(ActorKind::Vehicle, [0.0, 0.5], 0.0, &[8.0; 6]);
        assert_eq!(follow(&back, &front, &t, 6), vec![true]);
        assert_eq!(lead(&front, &back, &t, 6), vec![true]);
        assert_eq!(lead(&back, &front, &t, 6), vec![false]);
        assert_eq!(follow(&front, &back, &t, 6), vec![false]);
    }

    #[test]
    fn test_follow_requires_motion() {
        let t = FollowThresholds::default();
        let front = parked(ActorKind::Vehicle, [10.0, 0.0], 0.0, 6);
        let back = parked(ActorKind::Vehicle, [0.0, 0.0], 0.0, 6);
        assert_eq!(follow(&back, &front, &t, 6), vec![false]);
    }

    #[test]
    fn test_wait_ped_cross() {
        let t = WaitThresholds::default();
        let car = parked(ActorKind::Vehicle, [0.0, 0.0], 0.0, 6);
        let mut map = vec![MapMembership::EMPTY; 6];
        map[4] = MapMembership::EMPTY.with_ped_crossing(7);
        let xy: Vec<[f64; 2]> = (0..6).map(|i| [5.0, -3.0 + i as f64]).collect();
        let ped = series(ActorKind::Human, &xy, &[0.0; 6], &[1.2; 6], &map);
        assert_eq!(wait_ped_cross(&car, &ped, &t, 6), vec![true]);

        let off_crossing = series(ActorKind::Human, &xy, &[0.0; 6], &[1.2; 6], &[]);
        assert_eq!(wait_ped_cross(&car, &off_crossing, &t, 6), vec![false]);
    }
}

//! Relative placement of two vehicles that hold their formation.
//!
//! Both are either standing still or moving, aligned within a heading
//! tolerance, close together, and the subject stays on one side of the
//! other for the whole window.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use nalgebra::Vector3;

use crate::config::RelativePositionThresholds;
use crate::math::stats::{max, min};
use crate::signals::Signals;
use crate::window::{all_in, window_mask};

/// Where the subject sits in the other vehicle's body frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Placement {
    Behind,
    InFront,
    LeftOf,
    RightOf,
}

impl Placement {
    /// Whether a body-frame offset lies in this placement's zone.
    #[must_use]
    pub fn contains(self, p: &Vector3<f64>, t: &RelativePositionThresholds) -> bool {
        match self {
            Self::Behind => p.y.abs() < t.max_lateral_offset && p.x < -t.min_axis_offset,
            Self::InFront => p.y.abs() < t.max_lateral_offset && p.x > t.min_axis_offset,
            Self::LeftOf => p.x.abs() < t.max_longitudinal_offset && p.y > t.min_axis_offset,
            Self::RightOf => p.x.abs() < t.max_longitudinal_offset && p.y < -t.min_axis_offset,
        }
    }
}

/// Whether both vehicles stand or both move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Motion {
    Stationary,
    Moving,
}

impl Motion {
    fn holds(self, speed: &[f64], t: &RelativePositionThresholds) -> bool {
        match self {
            Self::Stationary => max(speed).is_some_and(|v| v < t.max_stationary_speed),
            Self::Moving => min(speed).is_some_and(|v| v > t.min_moving_speed),
        }
    }
}

pub fn placement(
    subject: &Signals,
    other: &Signals,
    placement: Placement,
    motion: Motion,
    t: &RelativePositionThresholds,
    width: usize,
) -> Vec<bool> {
    let rel = subject.positions_in(other);
    let dist = subject.distances_to(other);
    let gaps = subject.heading_gaps_deg(other);
    let (v, ov) = (subject.speed(), other.speed());

    window_mask(subject.len(), width, |r| {
        all_in(&rel, r.clone(), |p| placement.contains(p, t))
            && all_in(&dist, r.clone(), |&d| d < t.max_distance)
            && motion.holds(&v[r.clone()], t)
            && motion.holds(&ov[r.clone()], t)
            && all_in(&gaps, r, |&g| g < t.max_heading_gap_deg)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::test_support::{parked, straight};
    use crate::sample::ActorKind;
    use std::f64::consts::FRAC_PI_2;

    const ALL: [Placement; 4] = [
        Placement::Behind,
        Placement::InFront,
        Placement::LeftOf,
        Placement::RightOf,
    ];

    fn matches(subject: &Signals, other: &Signals, motion: Motion) -> Vec<Placement> {
        let t = RelativePositionThresholds::default();
        ALL.into_iter()
            .filter(|&p| placement(subject, other, p, motion, &t, 6) == vec![true])
            .collect()
    }

    #[test]
    fn test_stationary_queue() {
        let front = parked(ActorKind::Vehicle, [0.0, 0.0], 0.0, 6);
        let back = parked(ActorKind::Vehicle, [-4.0, 0.3], 0.0, 6);
        assert_eq!(matches(&back, &front, Motion::Stationary), vec![Placement::Behind]);
        assert_eq!(matches(&front, &back, Motion::Stationary), vec![Placement::InFront]);
        assert!(matches(&back, &front, Motion::Moving).is_empty());
    }

    #[test]
    fn test_side_by_side_in_rotated_frame() {
        // Both face +y; subject at lower x is on the left of the other.
        let other = parked(ActorKind::Vehicle, [10.0, 10.0], FRAC_PI_2, 6);
        let subject = parked(ActorKind::Vehicle, [7.0, 10.2], FRAC_PI_2, 6);
        assert_eq!(matches(&subject, &other, Motion::Stationary), vec![Placement::LeftOf]);
        assert_eq!(matches(&other, &subject, Motion::Stationary), vec![Placement::RightOf]);
    }

    #[test]
    fn test_moving_alongside() {
        let other = straight(ActorKind::Vehicle, [0.0, 0.0], 0.0, &[8.0; 6]);
        let subject = straight(ActorKind::Vehicle, [0.2, -3.0], 0.0, &[8.0; 6]);
        assert_eq!(matches(&subject, &other, Motion::Moving), vec![Placement::RightOf]);
        assert!(matches(&subject, &other, Motion::Stationary).is_empty());
    }

    #[test]
    fn test_misaligned_heading() {
        let other = parked(ActorKind::Vehicle, [0.0, 0.0], 0.0, 6);
        let subject = parked(ActorKind::Vehicle, [-4.0, 0.0], 0.5, 6);
        assert!(matches(&subject, &other, Motion::Stationary).is_empty());
    }
}

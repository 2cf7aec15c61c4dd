//! Pedestrian detectors.
//!
//! Solo detectors optionally take a reference series (the ego vehicle) for
//! the distance gate of cross, jaywalk and run. Without one the gate passes.

use std::ops::Range;

use crate::config::{GroupWalkThresholds, PedestrianThresholds};
use crate::math::stats::max;
use crate::signals::Signals;
use crate::window::{all_in, window_mask};

/// Distance-to-reference column, or `None` when no reference is given.
fn reference_distances(subject: &Signals, reference: Option<&Signals>) -> Option<Vec<f64>> {
    reference.map(|r| subject.distances_to(r))
}

fn within_reach(dist: Option<&[f64]>, r: Range<usize>, limit: f64) -> bool {
    dist.map_or(true, |d| max(&d[r]).is_some_and(|m| m < limit))
}

/// Walking on a pedestrian crossing for the whole window.
pub fn cross(
    subject: &Signals,
    reference: Option<&Signals>,
    t: &PedestrianThresholds,
    width: usize,
) -> Vec<bool> {
    let dist = reference_distances(subject, reference);
    let (v, map) = (subject.speed(), subject.map());
    window_mask(subject.len(), width, |r| {
        all_in(map, r.clone(), |m| m.on_ped_crossing())
            && all_in(v, r.clone(), |&s| s > t.min_crossing_speed)
            && within_reach(dist.as_deref(), r, t.max_reference_distance)
    })
}

/// Walking on the drivable area, off any crossing, for the whole window.
pub fn jaywalk(
    subject: &Signals,
    reference: Option<&Signals>,
    t: &PedestrianThresholds,
    width: usize,
) -> Vec<bool> {
    let dist = reference_distances(subject, reference);
    let (v, map) = (subject.speed(), subject.map());
    window_mask(subject.len(), width, |r| {
        all_in(map, r.clone(), |m| !m.on_ped_crossing() && m.on_drivable_area())
            && all_in(v, r.clone(), |&s| s > t.min_crossing_speed)
            && within_reach(dist.as_deref(), r, t.max_reference_distance)
    })
}

pub fn run(
    subject: &Signals,
    reference: Option<&Signals>,
    t: &PedestrianThresholds,
    width: usize,
) -> Vec<bool> {
    let dist = reference_distances(subject, reference);
    let v = subject.speed();
    window_mask(subject.len(), width, |r| {
        all_in(v, r.clone(), |&s| s > t.min_run_speed)
            && within_reach(dist.as_deref(), r, t.max_reference_distance)
    })
}

/// Walking pace on a walkway for the whole window.
pub fn walk(subject: &Signals, t: &PedestrianThresholds, width: usize) -> Vec<bool> {
    let (v, map) = (subject.speed(), subject.map());
    window_mask(subject.len(), width, |r| {
        all_in(map, r.clone(), |m| m.on_walkway())
            && all_in(v, r, |&s| s > t.min_walk_speed && s < t.max_walk_speed)
    })
}

pub fn stand(subject: &Signals, t: &PedestrianThresholds, width: usize) -> Vec<bool> {
    let v = subject.speed();
    window_mask(v.len(), width, |r| all_in(v, r, |&s| s < t.max_stand_speed))
}

fn group_walk<F>(
    subject: &Signals,
    other: &Signals,
    t: &GroupWalkThresholds,
    width: usize,
    max_distance: f64,
    heading_ok: F,
) -> Vec<bool>
where
    F: Fn(f64) -> bool,
{
    let dist = subject.distances_to(other);
    let gaps = subject.heading_gaps_deg(other);
    let (v, ov) = (subject.speed(), other.speed());
    window_mask(subject.len(), width, |r| {
        max(&dist[r.clone()]).is_some_and(|d| d < max_distance)
            && all_in(v, r.clone(), |&s| s > t.min_speed)
            && all_in(ov, r.clone(), |&s| s > t.min_speed)
            && all_in(&gaps, r, |&g| heading_ok(g))
    })
}

/// Two pedestrians walking side by side in the same direction.
pub fn walk_alongside(
    subject: &Signals,
    other: &Signals,
    t: &GroupWalkThresholds,
    width: usize,
) -> Vec<bool> {
    group_walk(subject, other, t, width, t.max_alongside_distance, |g| {
        g < t.max_alongside_heading_deg
    })
}

/// Two pedestrians walking towards or past each other.
pub fn walk_opposite(
    subject: &Signals,
    other: &Signals,
    t: &GroupWalkThresholds,
    width: usize,
) -> Vec<bool> {
    group_walk(subject, other, t, width, t.max_opposite_distance, |g| {
        g > t.min_opposite_heading_deg
    })
}

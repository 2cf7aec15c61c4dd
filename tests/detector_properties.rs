//! Property tests for detectors, island reduction, the compatibility graph
//! and negative sampling.
//!
//! Every detector is exercised on synthetic trajectories through the public
//! `Detector` dispatch, the way the miner calls them.

use maneuver_mining::{
    compat, reduce_islands, sampler, ActorKind, Detector, DetectorInput, KinematicSample,
    ManeuverType, MapMembership, MiningConfig, Signals, Span,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f64::consts::FRAC_PI_2;

const STEP_US: i64 = 500_000;

// =============================================================================
// TRAJECTORY GENERATORS
// =============================================================================

/// Straight drive along a heading with per-frame speeds.
fn generate_cruise(kind: ActorKind, start: [f64; 2], yaw: f64, speeds: &[f64]) -> Signals {
    let mut p = start;
    let samples: Vec<KinematicSample> = speeds
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let s = KinematicSample::planar(i, i as i64 * STEP_US, p, yaw, v, kind);
            p[0] += 0.5 * v * yaw.cos();
            p[1] += 0.5 * v * yaw.sin();
            s
        })
        .collect();
    Signals::from_samples(kind, &samples)
}

/// Constant-speed arc sweeping `total_yaw` radians over `n` frames.
fn generate_turn_arc(n: usize, speed: f64, total_yaw: f64) -> Signals {
    let step = total_yaw / (n - 1) as f64;
    let mut p = [0.0, 0.0];
    let samples: Vec<KinematicSample> = (0..n)
        .map(|i| {
            let yaw = step * i as f64;
            let t = i as i64 * STEP_US;
            let s = KinematicSample::planar(i, t, p, yaw, speed, ActorKind::Vehicle);
            p[0] += 0.5 * speed * yaw.cos();
            p[1] += 0.5 * speed * yaw.sin();
            s
        })
        .collect();
    Signals::from_samples(ActorKind::Vehicle, &samples)
}

/// Pedestrian walking along +x with a fixed map membership.
fn generate_pedestrian(speeds: &[f64], map: MapMembership) -> Signals {
    let mut x = 0.0;
    let samples: Vec<KinematicSample> = speeds
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let t = i as i64 * STEP_US;
            let s = KinematicSample::planar(i, t, [x, 0.0], 0.0, v, ActorKind::Human).with_map(map);
            x += 0.5 * v;
            s
        })
        .collect();
    Signals::from_samples(ActorKind::Human, &samples)
}

fn spans(detector: Detector, subject: &Signals, other: Option<&Signals>) -> Vec<Span> {
    let config = MiningConfig::default();
    let input = match other {
        Some(o) => DetectorInput::paired(subject, o).unwrap(),
        None => DetectorInput::solo(subject),
    };
    detector.detect(&input, &config).unwrap().collect()
}

// =============================================================================
// ISLAND REDUCTION
// =============================================================================

#[test]
fn test_island_reduction_example() {
    let mask = [false, true, true, true, false, true, false];
    let reduced = reduce_islands(&mask);
    assert_eq!(reduced, vec![false, false, true, false, false, true, false]);
}

#[test]
fn test_island_reduction_even_run_lower_middle() {
    let reduced = reduce_islands(&[true, true, true, true, false]);
    assert_eq!(reduced, vec![false, true, false, false, false]);
    assert!(reduce_islands(&[]).is_empty());
}

// =============================================================================
// DETECTOR CONTRACT
// =============================================================================

#[test]
fn test_every_span_has_window_length() {
    let ramp: Vec<f64> = (0..20).map(|i| f64::from(i % 10)).collect();
    let subject = generate_cruise(ActorKind::Vehicle, [0.0, 0.0], 0.0, &ramp);
    let found = spans(Detector::Accelerate, &subject, None);
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|s| s.end - s.start == 6));

    let arc = generate_turn_arc(12, 5.0, 2.0);
    let found = spans(Detector::LeftTurn, &arc, None);
    assert!(!found.is_empty());
    assert!(found.iter().all(|s| s.len() == 6 && s.end <= 12));
}

#[test]
fn test_vehicle_detectors_empty_on_pedestrian() {
    let ped = generate_pedestrian(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0], MapMembership::EMPTY);
    for detector in [
        Detector::Accelerate,
        Detector::Decelerate,
        Detector::Stop,
        Detector::LaneChange,
        Detector::LeftTurn,
        Detector::RightTurn,
        Detector::UTurn,
        Detector::Reverse,
    ] {
        assert!(spans(detector, &ped, None).is_empty(), "{detector:?}");
    }
}

#[test]
fn test_pairwise_vehicle_detectors_empty_on_mixed_kinds() {
    let car = generate_cruise(ActorKind::Vehicle, [0.0, 0.0], 0.0, &[8.0; 8]);
    let ped = generate_pedestrian(&[8.0; 8], MapMembership::EMPTY);
    assert!(spans(Detector::Follow, &car, Some(&ped)).is_empty());
    assert!(spans(Detector::Overtake, &car, Some(&ped)).is_empty());
}

#[test]
fn test_monotonic_ramp_accelerates_once() {
    let subject = generate_cruise(
        ActorKind::Vehicle,
        [0.0, 0.0],
        0.0,
        &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
    );
    assert_eq!(spans(Detector::Accelerate, &subject, None), vec![Span { start: 0, end: 6 }]);
    assert!(spans(Detector::Decelerate, &subject, None).is_empty());
}

#[test]
fn test_braking_to_a_halt() {
    let subject = generate_cruise(
        ActorKind::Vehicle,
        [0.0, 0.0],
        0.0,
        &[5.0, 4.0, 3.0, 2.0, 1.0, 0.3],
    );
    assert_eq!(spans(Detector::Stop, &subject, None).len(), 1);
    assert!(spans(Detector::Decelerate, &subject, None).is_empty());
}

#[test]
fn test_turn_arc_direction() {
    let left = generate_turn_arc(6, 5.0, FRAC_PI_2);
    assert_eq!(spans(Detector::LeftTurn, &left, None).len(), 1);
    assert!(spans(Detector::RightTurn, &left, None).is_empty());

    let right = generate_turn_arc(6, 5.0, -FRAC_PI_2);
    assert_eq!(spans(Detector::RightTurn, &right, None).len(), 1);
    assert!(spans(Detector::LeftTurn, &right, None).is_empty());
}

#[test]
fn test_side_by_side_moving_pair() {
    let other = generate_cruise(ActorKind::Vehicle, [0.0, 0.0], 0.0, &[6.0; 6]);
    let subject = generate_cruise(ActorKind::Vehicle, [0.3, 3.0], 0.0, &[6.0; 6]);
    let left = Detector::for_maneuver(ManeuverType::MovingLeftOfAgent);
    let right = Detector::for_maneuver(ManeuverType::MovingRightOfAgent);
    assert_eq!(spans(left, &subject, Some(&other)).len(), 1);
    assert!(spans(right, &subject, Some(&other)).is_empty());
}

#[test]
fn test_pedestrian_pace_detectors() {
    let walkway = MapMembership::EMPTY.with_walkway(3);
    let walker = generate_pedestrian(&[1.3; 6], walkway);
    assert_eq!(spans(Detector::Walk, &walker, None).len(), 1);
    assert!(spans(Detector::Run, &walker, None).is_empty());
    assert!(spans(Detector::Stand, &walker, None).is_empty());

    let runner = generate_pedestrian(&[3.2; 6], walkway);
    assert_eq!(spans(Detector::Run, &runner, None).len(), 1);
    assert!(spans(Detector::Walk, &runner, None).is_empty());
}

// =============================================================================
// COMPATIBILITY GRAPH AND SAMPLING
// =============================================================================

#[test]
fn test_negatives_never_contain_key() {
    for maneuver in ManeuverType::ALL {
        assert!(!compat::negatives(maneuver).contains(&maneuver), "{maneuver}");
        assert!(
            !compat::negatives_for(maneuver, true).contains(&maneuver),
            "{maneuver} (pedestrian pair)"
        );
    }
}

#[test]
fn test_rank_weighted_sampling_bias() {
    let negatives = compat::negatives(ManeuverType::Walk);
    let head = &negatives[..5];
    let mut rng = StdRng::seed_from_u64(99);
    let mut counts = [0usize; 5];
    for _ in 0..5000 {
        let picked = sampler::sample_negatives(ManeuverType::Walk, head, 1, &mut rng).unwrap();
        let idx = head.iter().position(|m| *m == picked[0]).unwrap();
        counts[idx] += 1;
    }
    let top = counts.iter().enumerate().max_by_key(|(_, c)| **c).map(|(i, _)| i);
    assert_eq!(top, Some(0), "{counts:?}");
}

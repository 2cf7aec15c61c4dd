//! Negative label sampling.
//!
//! Negatives are listed from most to least confusable. The sampler draws a
//! fixed number of them without replacement, favouring earlier entries with
//! linearly decaying rank weights `n, n-1, ..., 1`.
//!
//! # Example
//!
//! ```
//! use maneuver_mining::sampler::sample_negatives;
//! use maneuver_mining::{compat, ManeuverType};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let negatives = compat::negatives(ManeuverType::Walk);
//! let picked = sample_negatives(ManeuverType::Walk, negatives, 4, &mut rng).unwrap();
//! assert_eq!(picked.len(), 4);
//! assert!(!picked.contains(&ManeuverType::Walk));
//! ```

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::config::RefinementThresholds;
use crate::error::{MiningError, Result};
use crate::maneuver::ManeuverType;

/// Normalized rank weights for a list of `n` entries, first entry heaviest.
#[must_use]
pub fn rank_weights(n: usize) -> Vec<f64> {
    let total = (n * (n + 1) / 2) as f64;
    (0..n).map(|i| (n - i) as f64 / total).collect()
}

/// Draw `k` distinct indices into a list of `n` entries with rank weights.
///
/// Returned indices are in list order. Returns `None` when `k > n`.
pub fn sample_rank_indices<R: Rng + ?Sized>(n: usize, k: usize, rng: &mut R) -> Option<Vec<usize>> {
    if k > n {
        return None;
    }
    let mut weights = rank_weights(n);
    let mut picked = Vec::with_capacity(k);
    for _ in 0..k {
        // Drawn entries get zero weight, so at least n - k + 1 stay positive.
        let dist = WeightedIndex::new(&weights).ok()?;
        let i = dist.sample(rng);
        weights[i] = 0.0;
        picked.push(i);
    }
    picked.sort_unstable();
    Some(picked)
}

/// Draw `k` distinct negatives for `maneuver` from its ordered negative list.
///
/// # Errors
///
/// Returns [`MiningError::InsufficientNegatives`] when `k` exceeds the list length.
pub fn sample_negatives<R: Rng + ?Sized>(
    maneuver: ManeuverType,
    negatives: &[ManeuverType],
    k: usize,
    rng: &mut R,
) -> Result<Vec<ManeuverType>> {
    let indices = sample_rank_indices(negatives.len(), k, rng)
        .ok_or_else(|| MiningError::insufficient_negatives(maneuver, k, negatives.len()))?;
    Ok(indices.into_iter().map(|i| negatives[i]).collect())
}

/// Pedestrian pace class implied by a median speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    Running,
    Walking,
    Standing,
}

impl Pace {
    /// Classify a median speed. `None` for NaN.
    #[must_use]
    pub fn classify(median_speed: f64, t: &RefinementThresholds) -> Option<Self> {
        if median_speed > t.run_speed {
            Some(Self::Running)
        } else if median_speed >= t.stand_speed {
            Some(Self::Walking)
        } else if median_speed < t.stand_speed {
            Some(Self::Standing)
        } else {
            None
        }
    }

    /// The maneuver that is obviously true at this pace and must not be a negative.
    #[must_use]
    pub const fn evident(self) -> ManeuverType {
        match self {
            Self::Running => ManeuverType::Run,
            Self::Walking => ManeuverType::Walk,
            Self::Standing => ManeuverType::Stand,
        }
    }
}

/// Drop the negative that contradicts a pedestrian's observed pace.
///
/// Returns the removed maneuver type, if it was present.
pub fn refine_pedestrian_negatives(
    negatives: &mut Vec<ManeuverType>,
    median_speed: f64,
    t: &RefinementThresholds,
) -> Option<ManeuverType> {
    let evident = Pace::classify(median_speed, t)?.evident();
    let before = negatives.len();
    negatives.retain(|&m| m != evident);
    (negatives.len() < before).then_some(evident)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rank_weights() {
        let w = rank_weights(4);
        assert_relative_eq!(w.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(w[0], 0.4, epsilon = 1e-12);
        assert_relative_eq!(w[3], 0.1, epsilon = 1e-12);
        assert!(rank_weights(0).is_empty());
    }

    #[test]
    fn test_sample_distinct_in_list_order() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let picked = sample_rank_indices(9, 4, &mut rng).unwrap();
            assert_eq!(picked.len(), 4);
            assert!(picked.windows(2).all(|p| p[0] < p[1]));
            assert!(picked.iter().all(|&i| i < 9));
        }
    }

    #[test]
    fn test_sample_all() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample_rank_indices(5, 5, &mut rng), Some(vec![0, 1, 2, 3, 4]));
        assert_eq!(sample_rank_indices(5, 0, &mut rng), Some(vec![]));
        assert_eq!(sample_rank_indices(0, 0, &mut rng), Some(vec![]));
    }

    #[test]
    fn test_first_entry_most_frequent() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts = [0usize; 5];
        for _ in 0..6000 {
            let picked = sample_rank_indices(5, 1, &mut rng).unwrap();
            counts[picked[0]] += 1;
        }
        // Expected shares 5/15 .. 1/15.
        assert!(counts.windows(2).all(|p| p[0] > p[1]), "{counts:?}");
        assert!(counts[0] > 1700 && counts[0] < 2300, "{counts:?}");
    }

    #[test]
    fn test_insufficient_negatives() {
        let mut rng = StdRng::seed_from_u64(0);
        let negatives = [ManeuverType::Walk, ManeuverType::Run];
        assert_eq!(
            sample_negatives(ManeuverType::Stand, &negatives, 3, &mut rng),
            Err(MiningError::insufficient_negatives(ManeuverType::Stand, 3, 2))
        );
    }

    #[test]
    fn test_pace_boundaries() {
        let t = RefinementThresholds::default();
        assert_eq!(Pace::classify(2.0, &t), Some(Pace::Running));
        assert_eq!(Pace::classify(1.66, &t), Some(Pace::Walking));
        assert_eq!(Pace::classify(0.5, &t), Some(Pace::Walking));
        assert_eq!(Pace::classify(0.49, &t), Some(Pace::Standing));
        assert_eq!(Pace::classify(f64::NAN, &t), None);
    }

    #[test]
    fn test_refine_removes_evident_pace() {
        let t = RefinementThresholds::default();
        let mut negatives = vec![ManeuverType::Run, ManeuverType::Walk, ManeuverType::Cross];
        assert_eq!(
            refine_pedestrian_negatives(&mut negatives, 1.2, &t),
            Some(ManeuverType::Walk)
        );
        assert_eq!(negatives, vec![ManeuverType::Run, ManeuverType::Cross]);

        assert_eq!(refine_pedestrian_negatives(&mut negatives, 0.1, &t), None);
        assert_eq!(negatives.len(), 2);
    }
}

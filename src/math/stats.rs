//! Small reductions over `f64` slices.
//!
//! Every reduction yields `None` for empty input or when any value is NaN,
//! so a window with a missing measurement never passes a threshold gate.

fn usable(values: &[f64]) -> bool {
    !values.is_empty() && !values.iter().any(|v| v.is_nan())
}

/// Smallest value.
#[must_use]
pub fn min(values: &[f64]) -> Option<f64> {
    usable(values).then(|| values.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Largest value.
#[must_use]
pub fn max(values: &[f64]) -> Option<f64> {
    usable(values).then(|| values.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// Arithmetic mean.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if !usable(values) {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; the mean of the two middle values for even lengths.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if !usable(values) {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reductions() {
        let v = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_relative_eq!(min(&v).unwrap(), 1.0);
        assert_relative_eq!(max(&v).unwrap(), 5.0);
        assert_relative_eq!(mean(&v).unwrap(), 2.8);
        assert_relative_eq!(median(&v).unwrap(), 3.0);
        assert_relative_eq!(median(&[1.0, 2.0, 3.0, 10.0]).unwrap(), 2.5);
    }

    #[test]
    fn test_empty() {
        assert!(min(&[]).is_none());
        assert!(max(&[]).is_none());
        assert!(mean(&[]).is_none());
        assert!(median(&[]).is_none());
    }

    #[test]
    fn test_nan_poisons_every_reduction() {
        let v = [2.0, f64::NAN, 7.0];
        assert!(min(&v).is_none());
        assert!(max(&v).is_none());
        assert!(mean(&v).is_none());
        assert!(median(&v).is_none());
        assert!(max(&[f64::NAN]).is_none());
        assert_relative_eq!(max(&[f64::INFINITY, 1.0]).unwrap(), f64::INFINITY);
    }
}

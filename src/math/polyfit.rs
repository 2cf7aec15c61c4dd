//! Least-squares polynomial fitting and one-step extrapolation.
//!
//! Used to fill the trailing sample of series derived from forward
//! differences (speed, estimated heading), which are one element short.

use nalgebra::{DMatrix, DVector};

/// Highest polynomial degree used for tail extrapolation.
pub const MAX_EXTRAPOLATION_DEGREE: usize = 2;

/// Fewest points for which a quadratic tail estimate is well defined.
///
/// Shorter inputs fall back to a linear (2 points) or constant (1 point)
/// estimate. Those estimates are coarse and should not be relied on.
pub const MIN_RELIABLE_POINTS: usize = MAX_EXTRAPOLATION_DEGREE + 1;

/// Fit a polynomial of `degree` to `(xs, ys)` by least squares.
///
/// Coefficients are returned lowest order first. Returns `None` for
/// mismatched or empty input, fewer points than coefficients, or a
/// numerically singular system.
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn polyfit(xs: &[f64], ys: &[f64], degree: usize) -> Option<Vec<f64>> {
    let n = xs.len();
    let terms = degree + 1;
    if n != ys.len() || n < terms {
        return None;
    }

    let vandermonde = DMatrix::from_fn(n, terms, |row, col| xs[row].powi(col as i32));
    let rhs = DVector::from_column_slice(ys);

    let svd = vandermonde.svd(true, true);
    let solution = svd.solve(&rhs, 1e-12).ok()?;
    if solution.iter().any(|c| !c.is_finite()) {
        return None;
    }
    Some(solution.iter().copied().collect())
}

/// Evaluate polynomial coefficients (lowest order first) at `x`.
#[must_use]
pub fn polyval(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Estimate the value following `values`, sampled at `0, 1, .., n-1`.
///
/// Fits degree `min(2, n - 1)` and evaluates at `n`. A single value is
/// repeated; an empty slice yields `None`.
#[must_use]
pub fn extrapolate_next(values: &[f64]) -> Option<f64> {
    match values.len() {
        0 => None,
        1 => Some(values[0]),
        n => {
            let degree = MAX_EXTRAPOLATION_DEGREE.min(n - 1);
            let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
            let coefficients = polyfit(&xs, values, degree)?;
            Some(polyval(&coefficients, n as f64))
        }
    }
}

/// Append the extrapolated next value to `values`, if one can be estimated.
pub fn extend_by_extrapolation(values: &mut Vec<f64>) {
    if let Some(next) = extrapolate_next(values) {
        values.push(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polyfit_exact_quadratic() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys: Vec<f64> = xs.iter().map(|x| 1.0 + 2.0 * x + 0.5 * x * x).collect();
        let c = polyfit(&xs, &ys, 2).unwrap();
        assert_relative_eq!(c[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(c[1], 2.0, epsilon = 1e-9);
        assert_relative_eq!(c[2], 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_polyfit_rejects_underdetermined() {
        assert!(polyfit(&[0.0, 1.0], &[1.0, 2.0], 2).is_none());
        assert!(polyfit(&[0.0, 1.0], &[1.0], 1).is_none());
    }

    #[test]
    fn test_polyval() {
        assert_relative_eq!(polyval(&[1.0, 0.0, 2.0], 3.0), 19.0);
        assert_relative_eq!(polyval(&[], 3.0), 0.0);
    }

    #[test]
    fn test_extrapolate_quadratic() {
        assert_relative_eq!(extrapolate_next(&[0.0, 1.0, 4.0]).unwrap(), 9.0, epsilon = 1e-9);
        assert_relative_eq!(
            extrapolate_next(&[0.0, 1.0, 4.0, 9.0, 16.0]).unwrap(),
            25.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_extrapolate_short_inputs() {
        assert!(extrapolate_next(&[]).is_none());
        assert_relative_eq!(extrapolate_next(&[2.5]).unwrap(), 2.5);
        assert_relative_eq!(extrapolate_next(&[1.0, 3.0]).unwrap(), 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_extend_by_extrapolation() {
        let mut v = vec![2.0, 2.0, 2.0];
        extend_by_extrapolation(&mut v);
        assert_eq!(v.len(), 4);
        assert_relative_eq!(v[3], 2.0, epsilon = 1e-9);

        let mut empty: Vec<f64> = Vec::new();
        extend_by_extrapolation(&mut empty);
        assert!(empty.is_empty());
    }
}

//! Sliding-window evaluation.
//!
//! A window of width `W` anchored at `i` covers samples `[i, i + W)`. A
//! series of `N` samples has `N - W + 1` anchors, or none when `N < W`.

use std::ops::Range;

/// Number of complete windows of `width` over `len` samples.
#[must_use]
#[inline]
pub const fn window_count(len: usize, width: usize) -> usize {
    if width == 0 || len < width {
        0
    } else {
        len - width + 1
    }
}

/// Sample ranges of every complete window, in anchor order.
pub fn windows(len: usize, width: usize) -> impl Iterator<Item = Range<usize>> {
    (0..window_count(len, width)).map(move |i| i..i + width)
}

/// Evaluate `predicate` on every window, producing one flag per anchor.
pub fn window_mask<F>(len: usize, width: usize, predicate: F) -> Vec<bool>
where
    F: FnMut(Range<usize>) -> bool,
{
    windows(len, width).map(predicate).collect()
}

/// Whether every value in `values[range]` satisfies `predicate`.
#[inline]
pub fn all_in<T, F>(values: &[T], range: Range<usize>, predicate: F) -> bool
where
    F: FnMut(&T) -> bool,
{
    values[range].iter().all(predicate)
}

/// Whether any value in `values[range]` satisfies `predicate`.
#[inline]
pub fn any_in<T, F>(values: &[T], range: Range<usize>, predicate: F) -> bool
where
    F: FnMut(&T) -> bool,
{
    values[range].iter().any(predicate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_count() {
        assert_eq!(window_count(7, 6), 2);
        assert_eq!(window_count(6, 6), 1);
        assert_eq!(window_count(5, 6), 0);
        assert_eq!(window_count(5, 0), 0);
    }

    #[test]
    fn test_windows() {
        let w: Vec<_> = windows(4, 2).collect();
        assert_eq!(w, vec![0..2, 1..3, 2..4]);
    }

    #[test]
    fn test_window_mask() {
        let v = [0.0, 1.0, 5.0, 6.0, 7.0];
        let mask = window_mask(v.len(), 3, |r| all_in(&v, r, |&x| x > 0.5));
        assert_eq!(mask, vec![false, true, true]);
        let any = window_mask(v.len(), 2, |r| any_in(&v, r, |&x| x > 5.5));
        assert_eq!(any, vec![false, false, true, true]);
    }
}

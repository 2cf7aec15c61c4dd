//! Temporal island reduction.
//!
//! An island is a maximal run of `true` in a per-anchor mask. Each island is
//! reduced to one anchor at its rank centre, `start + (len - 1) / 2`, which
//! for even lengths is the lower of the two middle indices.

use std::iter::FusedIterator;
use std::ops::Range;

/// Iterator over the maximal runs of `true` in a mask, in ascending order.
#[derive(Debug, Clone)]
pub struct Islands<'a> {
    mask: &'a [bool],
    cursor: usize,
}

impl<'a> Islands<'a> {
    #[must_use]
    pub const fn new(mask: &'a [bool]) -> Self {
        Self { mask, cursor: 0 }
    }
}

impl Iterator for Islands<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.mask.get(self.cursor..)?;
        let start = self.cursor + rest.iter().position(|&b| b)?;
        let len = self.mask[start..].iter().take_while(|&&b| b).count();
        self.cursor = start + len;
        Some(start..start + len)
    }
}

impl FusedIterator for Islands<'_> {}

/// Rank-centre index of an island.
#[must_use]
#[inline]
pub const fn island_center(island: &Range<usize>) -> usize {
    island.start + (island.end - island.start).saturating_sub(1) / 2
}

/// Anchor index of every island, ascending.
#[must_use]
pub fn island_anchors(mask: &[bool]) -> Vec<usize> {
    Islands::new(mask).map(|r| island_center(&r)).collect()
}

/// Reduce a mask to one `true` per island, placed at the island's centre.
///
/// The output has the same length as the input.
#[must_use]
pub fn reduce_islands(mask: &[bool]) -> Vec<bool> {
    let mut reduced = vec![false; mask.len()];
    for island in Islands::new(mask) {
        reduced[island_center(&island)] = true;
    }
    reduced
}

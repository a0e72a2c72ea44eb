// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Contiguous segment partitioning.
//!
//! # Boundary Rule
//!
//! ```text
//! base  = N / T
//! extra = N % T
//! len(i) = base + 1   for i <  extra
//! len(i) = base       for i >= extra
//! ```
//!
//! The remainder always goes to the earliest segments. Boundaries are a pure
//! function of `(N, T)` so tests can assert literal indices.

use std::ops::RangeInclusive;

use crate::error::FindProdError;

/// One worker's share of the array.
///
/// `start` and `end` are both inclusive. A partition never produces an empty
/// segment, so `start <= end` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// Position of this segment (and its worker) in creation order.
    pub index: usize,
    /// First element index covered.
    pub start: usize,
    /// Last element index covered.
    pub end: usize,
}

impl Segment {
    /// Number of elements covered.
    #[inline]
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    /// `true` for a hand-built descriptor with `start > end`. [`partition`]
    /// never produces one.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Element indices covered, as an inclusive range.
    #[inline]
    pub fn range(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    /// Returns `true` if element `idx` belongs to this segment.
    #[inline]
    pub fn contains(&self, idx: usize) -> bool {
        self.range().contains(&idx)
    }
}

/// Splits `array_len` elements into exactly `thread_count` contiguous segments.
///
/// # Errors
///
/// - [`FindProdError::InvalidArgument`] if either argument is zero.
/// - [`FindProdError::DegenerateSegment`] if `thread_count > array_len`.
///
/// # Example
///
/// ```
/// use findprod_core::partition;
///
/// let segs = partition(10, 3).unwrap();
/// let bounds: Vec<_> = segs.iter().map(|s| (s.start, s.end)).collect();
/// assert_eq!(bounds, vec![(0, 3), (4, 6), (7, 9)]);
/// ```
pub fn partition(array_len: usize, thread_count: usize) -> Result<Vec<Segment>, FindProdError> {
    if array_len == 0 {
        return Err(FindProdError::invalid("array length must be at least 1"));
    }
    if thread_count == 0 {
        return Err(FindProdError::invalid("thread count must be at least 1"));
    }
    if thread_count > array_len {
        return Err(FindProdError::DegenerateSegment {
            array_len,
            thread_count,
        });
    }

    let base = array_len / thread_count;
    let extra = array_len % thread_count;

    let mut segments = Vec::with_capacity(thread_count);
    let mut start = 0;
    for index in 0..thread_count {
        let len = base + usize::from(index < extra);
        let end = start + len - 1;
        segments.push(Segment { index, start, end });
        start = end + 1;
    }

    debug_assert_eq!(start, array_len, "segments must cover the array exactly");
    Ok(segments)
}

/// Index of the segment owning element `idx`, if any.
pub(crate) fn owner_of(segments: &[Segment], idx: usize) -> Option<usize> {
    segments
        .binary_search_by(|s| {
            if idx < s.start {
                std::cmp::Ordering::Greater
            } else if idx > s.end {
                std::cmp::Ordering::Less
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .ok()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    use super::*;

    fn bounds(segs: &[Segment]) -> Vec<(usize, usize)> {
        segs.iter().map(|s| (s.start, s.end)).collect()
    }

    #[test]
    fn even_split_has_equal_lengths() {
        let segs = partition(10, 2).unwrap();
        assert_eq!(bounds(&segs), vec![(0, 4), (5, 9)]);
    }

    #[test]
    fn remainder_goes_to_earliest_segments() {
        let segs = partition(11, 4).unwrap();
        // 11 = 4 * 2 + 3 → first three segments get 3 elements.
        assert_eq!(bounds(&segs), vec![(0, 2), (3, 5), (6, 8), (9, 10)]);
    }

    #[test]
    fn single_worker_covers_everything() {
        let segs = partition(7, 1).unwrap();
        assert_eq!(bounds(&segs), vec![(0, 6)]);
    }

    #[test]
    fn one_element_per_worker() {
        let segs = partition(5, 5).unwrap();
        assert!(segs.iter().all(|s| s.len() == 1));
        assert_eq!(segs[4], Segment { index: 4, start: 4, end: 4 });
    }

    #[test]
    fn hand_built_inverted_segment_is_empty() {
        let seg = Segment {
            index: 0,
            start: 6,
            end: 4,
        };
        assert!(seg.is_empty());
        assert_eq!(seg.len(), 0);
        assert!(!seg.contains(5));
    }

    #[test]
    fn more_workers_than_elements_is_degenerate() {
        assert_eq!(
            partition(2, 5),
            Err(FindProdError::DegenerateSegment {
                array_len: 2,
                thread_count: 5
            })
        );
    }

    #[test]
    fn zero_arguments_are_invalid() {
        assert!(matches!(
            partition(0, 1),
            Err(FindProdError::InvalidArgument(_))
        ));
        assert!(matches!(
            partition(4, 0),
            Err(FindProdError::InvalidArgument(_))
        ));
    }

    #[test]
    fn owner_lookup_matches_ranges() {
        let segs = partition(10, 3).unwrap();
        assert_eq!(owner_of(&segs, 0), Some(0));
        assert_eq!(owner_of(&segs, 5), Some(1));
        assert_eq!(owner_of(&segs, 7), Some(2));
        assert_eq!(owner_of(&segs, 10), None);
    }
}

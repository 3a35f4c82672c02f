//! Skip-aware iteration over a [`VectorPointTable`].
//!
//! Both iterators walk the logical index range `[0, size)` and step over
//! records whose skip flag is set, so a consumer sees only live records
//! without the buffer ever being compacted. An iterator always rests on
//! an unskipped index or on the terminal position `size`.

use std::iter::FusedIterator;

use pointslab_core::{PointId, PointTable};

use crate::point_ref::{Point, PointRef};
use crate::vector_table::VectorPointTable;

/// Read-only skip-aware iterator.
///
/// Two iterators compare equal when they rest on the same index. They are
/// only meaningful to compare when taken from the same table.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    table: &'a VectorPointTable,
    index: usize,
    end: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(table: &'a VectorPointTable, start: usize) -> Self {
        let end = table.size();
        let mut iter = Self {
            table,
            index: start.min(end),
            end,
        };
        iter.settle();
        iter
    }

    fn settle(&mut self) {
        while self.index < self.end && self.table.is_skipped(self.index) {
            self.index += 1;
        }
    }

    /// Index the iterator currently rests on.
    pub fn position(&self) -> PointId {
        PointId(self.index)
    }

    /// Whether the iterator has reached the end of the logical range.
    pub fn is_terminal(&self) -> bool {
        self.index == self.end
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = Point<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_terminal() {
            return None;
        }
        let id = PointId(self.index);
        let table: &'a VectorPointTable = self.table;
        let point = Point::new(id, table.point(id));
        self.index += 1;
        self.settle();
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.index;
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for Iter<'_> {}

impl PartialEq for Iter<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for Iter<'_> {}

/// Mutable skip-aware iterator yielding disjoint record handles.
#[derive(Debug)]
pub struct IterMut<'a> {
    /// Records from `index` up to `end`.
    rest: &'a mut [u8],
    skips: &'a [bool],
    point_size: usize,
    index: usize,
    end: usize,
}

impl<'a> IterMut<'a> {
    /// `live` must hold exactly `skips.len()` records.
    pub(crate) fn new(live: &'a mut [u8], skips: &'a [bool], point_size: usize) -> Self {
        debug_assert_eq!(live.len(), skips.len() * point_size);
        let mut iter = Self {
            rest: live,
            skips,
            point_size,
            index: 0,
            end: skips.len(),
        };
        iter.settle();
        iter
    }

    fn settle(&mut self) {
        while self.index < self.end && self.skips[self.index] {
            let rest = std::mem::take(&mut self.rest);
            self.rest = &mut rest[self.point_size..];
            self.index += 1;
        }
    }

    /// Index the iterator currently rests on.
    pub fn position(&self) -> PointId {
        PointId(self.index)
    }

    /// Whether the iterator has reached the end of the logical range.
    pub fn is_terminal(&self) -> bool {
        self.index == self.end
    }
}

impl<'a> Iterator for IterMut<'a> {
    type Item = PointRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_terminal() {
            return None;
        }
        let rest = std::mem::take(&mut self.rest);
        let (head, tail) = rest.split_at_mut(self.point_size);
        self.rest = tail;
        let id = PointId(self.index);
        self.index += 1;
        self.settle();
        Some(PointRef::new(id, head))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.index;
        (usize::from(remaining > 0), Some(remaining))
    }
}

impl FusedIterator for IterMut<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use pointslab_core::{PointLayout, StreamPointTable};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn table(points: usize) -> VectorPointTable {
        VectorPointTable::with_points(PointLayout::new(4).unwrap(), points)
    }

    #[test]
    fn unskipped_table_yields_every_index() {
        let t = table(3);
        let ids: Vec<PointId> = t.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![PointId(0), PointId(1), PointId(2)]);
    }

    #[test]
    fn leading_skips_are_settled_at_construction() {
        let mut t = table(4);
        t.set_skip(PointId(0)).unwrap();
        t.set_skip(PointId(1)).unwrap();
        assert_eq!(t.iter().position(), PointId(2));
    }

    #[test]
    fn trailing_skips_reach_terminal() {
        let mut t = table(4);
        t.set_skip(PointId(2)).unwrap();
        t.set_skip(PointId(3)).unwrap();
        let mut iter = t.iter();
        assert_eq!(iter.next().map(|p| p.id()), Some(PointId(0)));
        assert_eq!(iter.next().map(|p| p.id()), Some(PointId(1)));
        assert!(iter.is_terminal());
        assert_eq!(iter, t.iter_end());
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn all_skipped_begins_at_end() {
        let mut t = table(3);
        for i in 0..3 {
            t.set_skip(PointId(i)).unwrap();
        }
        assert_eq!(t.iter(), t.iter_end());
        assert_eq!(t.iter().count(), 0);
        assert_eq!(t.iter_mut().count(), 0);
    }

    #[test]
    fn empty_table_begins_at_end() {
        let t = table(0);
        assert!(t.iter().is_terminal());
        assert_eq!(t.iter(), t.iter_end());
    }

    #[test]
    fn iteration_respects_logical_size() {
        let mut t = table(6);
        t.set_num_points(3).unwrap();
        assert_eq!(t.iter().count(), 3);
        assert_eq!(t.iter_end().position(), PointId(3));
    }

    #[test]
    fn iterators_compare_by_position() {
        let mut t = table(4);
        t.set_skip(PointId(1)).unwrap();
        let mut a = t.iter();
        let b = t.iter();
        assert_eq!(a, b);
        a.next();
        assert_ne!(a, b);
        assert_eq!(a.position(), PointId(2));
    }

    #[test]
    fn yielded_points_carry_record_bytes() {
        let mut t = table(3);
        t.data_mut().copy_from_slice(&[0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2]);
        t.set_skip(PointId(1)).unwrap();
        let bytes: Vec<&[u8]> = t.iter().map(|p| p.as_bytes()).collect();
        assert_eq!(bytes, vec![&[0u8; 4][..], &[2u8; 4][..]]);
    }

    #[test]
    fn iter_mut_writes_only_live_records() {
        let mut t = table(4);
        t.set_skip(PointId(1)).unwrap();
        for mut point in t.iter_mut() {
            let value = point.id().index() as u8 + 1;
            point.as_bytes_mut().fill(value);
        }
        assert_eq!(
            t.data(),
            &[1, 1, 1, 1, 0, 0, 0, 0, 3, 3, 3, 3, 4, 4, 4, 4][..]
        );
    }

    #[test]
    fn iter_mut_settles_like_iter() {
        let mut t = table(3);
        t.set_skip(PointId(0)).unwrap();
        t.set_skip(PointId(2)).unwrap();
        let mut iter = t.iter_mut();
        assert_eq!(iter.position(), PointId(1));
        assert_eq!(iter.next().map(|p| p.id()), Some(PointId(1)));
        assert!(iter.is_terminal());
        assert!(iter.next().is_none());
    }

    #[test]
    fn iter_mut_handles_can_be_held_together() {
        let mut t = table(3);
        let mut points: Vec<PointRef<'_>> = t.iter_mut().collect();
        let (left, right) = points.split_at_mut(1);
        left[0].as_bytes_mut().fill(1);
        right[1].as_bytes_mut().fill(3);
        drop(points);
        assert_eq!(&t.data()[..4], &[1; 4]);
        assert_eq!(&t.data()[8..], &[3; 4]);
    }

    #[test]
    fn into_iterator_for_references() {
        let mut t = table(2);
        for mut point in &mut t {
            point.as_bytes_mut()[0] = 9;
        }
        let firsts: Vec<u8> = (&t).into_iter().map(|p| p.as_bytes()[0]).collect();
        assert_eq!(firsts, vec![9, 9]);
    }

    #[test]
    fn size_hint_bounds_remaining() {
        let mut t = table(5);
        t.set_skip(PointId(3)).unwrap();
        let iter = t.iter();
        let (lo, hi) = iter.size_hint();
        assert_eq!(lo, 1);
        assert_eq!(hi, Some(5));
        assert!(iter.count() <= 5);
    }

    proptest! {
        #[test]
        fn iteration_yields_exactly_the_unskipped_indices(
            points in 0usize..64,
            skipped in proptest::collection::vec(0usize..64, 0..64),
        ) {
            let mut t = table(points);
            let skipped: BTreeSet<usize> = skipped.into_iter().filter(|&i| i < points).collect();
            for &i in &skipped {
                t.set_skip(PointId(i)).unwrap();
            }
            let expected: Vec<usize> = (0..points).filter(|i| !skipped.contains(i)).collect();

            let seen: Vec<usize> = t.iter().map(|p| p.id().index()).collect();
            prop_assert_eq!(&seen, &expected);

            let seen_mut: Vec<usize> = t.iter_mut().map(|p| p.id().index()).collect();
            prop_assert_eq!(&seen_mut, &expected);

            if expected.is_empty() {
                prop_assert!(t.iter() == t.iter_end());
            }
        }
    }
}

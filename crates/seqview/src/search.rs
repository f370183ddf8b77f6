// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Linear search over a view's window: single items, any-of-a-set, ordered
//! subsequences and any-of-several-subsequences.
//!
//! Each operation comes in three flavors: a full-range convenience using the
//! item type's own equality, a `[start, start + count)` bounded variant, and a
//! bounded variant taking an equality predicate. The predicate receives both
//! items by reference, so comparing large item types never copies them.
//!
//! All returned indices are relative to the view's own window, and the earliest
//! index always wins; ties between candidates at the same position go to the
//! earliest candidate in caller order.

use crate::{Error, Result, SeqView};

impl<T> SeqView<T> {
    /// Validates a `[start, start + count)` search window against the view.
    fn window(&self, start: usize, count: usize) -> Result<&[T]> {
        if start > self.len() {
            return Err(Error::offset_beyond(start, self.len()));
        }

        let end = start.checked_add(count).ok_or(Error::span_beyond(usize::MAX, self.len()))?;

        if end > self.len() {
            return Err(Error::span_beyond(end, self.len()));
        }

        Ok(self.as_slice().get(start..end).expect("bounds validated above"))
    }

    /// Returns the index of the first item equal to `item`, or `None`.
    ///
    /// Scans the entire view - O(n).
    #[must_use]
    pub fn index_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.as_slice().iter().position(|candidate| candidate == item)
    }

    /// Returns the index of the first item within `[start, start + count)` equal
    /// to `item`, or `None`.
    ///
    /// The window is validated with the same rules as slicing and fails with
    /// [`OutOfRange`][Error::OutOfRange].
    pub fn index_of_in(&self, item: &T, start: usize, count: usize) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        self.index_of_in_by(item, start, count, T::eq)
    }

    /// Like [`index_of_in()`][Self::index_of_in], with equality decided by `eq`.
    ///
    /// Semantically identical results to the `PartialEq`-based variant; choose
    /// this purely to control how items are compared (e.g. a cheap field-only
    /// comparison for large item types).
    pub fn index_of_in_by<F>(&self, item: &T, start: usize, count: usize, mut eq: F) -> Result<Option<usize>>
    where
        F: FnMut(&T, &T) -> bool,
    {
        let window = self.window(start, count)?;

        Ok(window
            .iter()
            .position(|candidate| eq(candidate, item))
            .map(|position| position.wrapping_add(start)))
    }

    /// Returns the index of the first item equal to *any* of `candidates`, or
    /// `None`.
    ///
    /// An empty candidate set finds nothing.
    #[must_use]
    pub fn index_of_any(&self, candidates: &[T]) -> Option<usize>
    where
        T: PartialEq,
    {
        self.as_slice().iter().position(|item| candidates.contains(item))
    }

    /// Returns the index of the first item within `[start, start + count)` equal
    /// to any of `candidates`, or `None`.
    pub fn index_of_any_in(&self, candidates: &[T], start: usize, count: usize) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        self.index_of_any_in_by(candidates, start, count, T::eq)
    }

    /// Like [`index_of_any_in()`][Self::index_of_any_in], with equality decided
    /// by `eq`.
    pub fn index_of_any_in_by<F>(&self, candidates: &[T], start: usize, count: usize, mut eq: F) -> Result<Option<usize>>
    where
        F: FnMut(&T, &T) -> bool,
    {
        let window = self.window(start, count)?;

        Ok(window
            .iter()
            .position(|item| candidates.iter().any(|candidate| eq(item, candidate)))
            .map(|position| position.wrapping_add(start)))
    }

    /// Returns the index at which the ordered subsequence `needle` first occurs
    /// in full, or `None`.
    ///
    /// An empty needle fails with [`InvalidArgument`][Error::InvalidArgument].
    pub fn index_of_seq(&self, needle: &[T]) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        self.index_of_seq_in_by(needle, 0, self.len(), T::eq)
    }

    /// Returns the index at which `needle` first occurs in full without running
    /// past `start + count`, or `None`.
    ///
    /// A partial match straddling the window boundary does not count as a match.
    pub fn index_of_seq_in(&self, needle: &[T], start: usize, count: usize) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        self.index_of_seq_in_by(needle, start, count, T::eq)
    }

    /// Like [`index_of_seq_in()`][Self::index_of_seq_in], with equality decided
    /// by `eq`.
    #[expect(clippy::missing_panics_doc, reason = "only unreachable panics")]
    pub fn index_of_seq_in_by<F>(&self, needle: &[T], start: usize, count: usize, mut eq: F) -> Result<Option<usize>>
    where
        F: FnMut(&T, &T) -> bool,
    {
        if needle.is_empty() {
            return Err(Error::InvalidArgument("search needle must not be empty"));
        }

        let window = self.window(start, count)?;

        if needle.len() > window.len() {
            return Ok(None);
        }

        // Will never wrap - needle length validated against the window above.
        let last_candidate = window.len().wrapping_sub(needle.len());

        for at in 0..=last_candidate {
            let candidate = window.get(at..at.wrapping_add(needle.len())).expect("candidate window is in-bounds by construction");

            if candidate.iter().zip(needle.iter()).all(|(item, wanted)| eq(item, wanted)) {
                return Ok(Some(at.wrapping_add(start)));
            }
        }

        Ok(None)
    }

    /// Returns the earliest index at which any of the `needles` occurs in full,
    /// or `None`.
    ///
    /// Ties at the same position go to the earliest needle in caller order. Any
    /// empty needle fails with [`InvalidArgument`][Error::InvalidArgument]; an
    /// empty needle *list* simply finds nothing.
    pub fn index_of_any_seq(&self, needles: &[&[T]]) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        self.index_of_any_seq_in_by(needles, 0, self.len(), T::eq)
    }

    /// Returns the earliest index within `[start, start + count)` at which any
    /// of the `needles` occurs in full, or `None`.
    pub fn index_of_any_seq_in(&self, needles: &[&[T]], start: usize, count: usize) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        self.index_of_any_seq_in_by(needles, start, count, T::eq)
    }

    /// Like [`index_of_any_seq_in()`][Self::index_of_any_seq_in], with equality
    /// decided by `eq`.
    pub fn index_of_any_seq_in_by<F>(&self, needles: &[&[T]], start: usize, count: usize, mut eq: F) -> Result<Option<usize>>
    where
        F: FnMut(&T, &T) -> bool,
    {
        if needles.iter().any(|needle| needle.is_empty()) {
            return Err(Error::InvalidArgument("search needle must not be empty"));
        }

        let window = self.window(start, count)?;

        // Walking positions in the outer loop guarantees the earliest match
        // overall wins, with ties going to the earliest needle in caller order.
        for at in 0..window.len() {
            for needle in needles {
                let Some(candidate) = window.get(at..at.wrapping_add(needle.len())) else {
                    // This needle does not fit before the window boundary.
                    continue;
                };

                if candidate.iter().zip(needle.iter()).all(|(item, wanted)| eq(item, wanted)) {
                    return Ok(Some(at.wrapping_add(start)));
                }
            }
        }

        Ok(None)
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    #![allow(
        clippy::indexing_slicing,
        clippy::arithmetic_side_effects,
        reason = "This is all fine in test code"
    )]

    use super::*;
    use crate::OutOfRangeKind;

    /// The canonical test fixture: a backing sequence with sentinel items on
    /// both sides, viewed as the inner window.
    fn inner_window() -> SeqView<char> {
        let backing = SeqView::copied_from_slice(&['_', '_', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', '_']);
        backing.range(2..10)
    }

    #[test]
    fn index_of_in_window() {
        let view = inner_window();

        assert_eq!(Some(0), view.index_of(&'a'));
        assert_eq!(Some(3), view.index_of(&'d'));
        assert_eq!(Some(7), view.index_of(&'h'));
        assert_eq!(None, view.index_of(&'z'));
        assert_eq!(None, view.index_of(&'_'));
    }

    #[test]
    fn index_of_restricted_start() {
        let view = inner_window();

        // Restricting the start excludes 'a' but still finds 'b' at its
        // view-relative index.
        assert_eq!(None, view.index_of_in(&'a', 1, 7).unwrap());
        assert_eq!(Some(1), view.index_of_in(&'b', 1, 7).unwrap());
    }

    #[test]
    fn index_of_restricted_count() {
        let view = inner_window();

        // The window [1, 7) excludes 'h' but includes 'g'.
        assert_eq!(None, view.index_of_in(&'h', 1, 6).unwrap());
        assert_eq!(Some(6), view.index_of_in(&'g', 1, 6).unwrap());
    }

    #[test]
    fn index_of_window_validation() {
        let view = inner_window();

        match view.index_of_in(&'a', 9, 0) {
            Err(Error::OutOfRange { kind, .. }) => assert_eq!(kind, OutOfRangeKind::OffsetBeyondEnd),
            other => panic!("unexpected result: {other:?}"),
        }

        match view.index_of_in(&'a', 1, 8) {
            Err(Error::OutOfRange { kind, .. }) => assert_eq!(kind, OutOfRangeKind::SpanBeyondEnd),
            other => panic!("unexpected result: {other:?}"),
        }

        // Zero-count windows are valid and find nothing.
        assert_eq!(None, view.index_of_in(&'a', 8, 0).unwrap());
    }

    #[test]
    fn index_of_by_predicate() {
        #[derive(Debug)]
        struct Keyed {
            key: u32,
            payload: [u64; 8],
        }

        let items: Vec<Keyed> = (0..4)
            .map(|key| Keyed {
                key,
                payload: [0; 8],
            })
            .collect();
        let view = SeqView::from(items);

        let wanted = Keyed {
            key: 2,
            payload: [9; 8],
        };

        // Only the key participates in the comparison.
        let found = view.index_of_in_by(&wanted, 0, view.len(), |left, right| left.key == right.key).unwrap();

        assert_eq!(Some(2), found);
    }

    #[test]
    fn index_of_any() {
        let view = inner_window();

        assert_eq!(Some(2), view.index_of_any(&['x', 'c', 'd']));
        assert_eq!(None, view.index_of_any(&['x', 'y']));
        assert_eq!(None, view.index_of_any(&[]));

        assert_eq!(Some(3), view.index_of_any_in(&['d', 'a'], 1, 7).unwrap());
        assert!(view.index_of_any_in(&['a'], 0, 9).is_err());
    }

    #[test]
    fn index_of_seq() {
        let view = inner_window();

        assert_eq!(Some(2), view.index_of_seq(&['c', 'd', 'e']).unwrap());
        assert_eq!(Some(0), view.index_of_seq(&['a']).unwrap());
        assert_eq!(Some(5), view.index_of_seq(&['f', 'g', 'h']).unwrap());
        assert_eq!(None, view.index_of_seq(&['c', 'e']).unwrap());

        // A needle longer than the view cannot occur.
        let long: Vec<char> = ('a'..='z').collect();
        assert_eq!(None, view.index_of_seq(&long).unwrap());
    }

    #[test]
    fn index_of_seq_empty_needle_is_invalid() {
        let view = inner_window();

        assert!(matches!(view.index_of_seq(&[]), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn index_of_seq_does_not_straddle_boundary() {
        let view = inner_window();

        // 'g','h' starts at 6 but the window [0, 7) ends at 'g' - a partial
        // match straddling the boundary is not a match.
        assert_eq!(None, view.index_of_seq_in(&['g', 'h'], 0, 7).unwrap());
        assert_eq!(Some(6), view.index_of_seq_in(&['g', 'h'], 0, 8).unwrap());
    }

    #[test]
    fn index_of_seq_repeated_prefix() {
        let view = SeqView::copied_from_slice(&[1, 1, 1, 2, 1, 2, 3]);

        assert_eq!(Some(2), view.index_of_seq(&[1, 2]).unwrap());
        assert_eq!(Some(4), view.index_of_seq(&[1, 2, 3]).unwrap());
    }

    #[test]
    fn index_of_any_seq_earliest_wins() {
        let view = inner_window();

        // 'b' occurs before 'f','g' does.
        let found = view.index_of_any_seq(&[&['f', 'g'], &['b']]).unwrap();
        assert_eq!(Some(1), found);

        // No candidate occurs.
        let found = view.index_of_any_seq(&[&['x'], &['z', 'a']]).unwrap();
        assert_eq!(None, found);

        // Empty needle list finds nothing.
        let found = view.index_of_any_seq(&[]).unwrap();
        assert_eq!(None, found);

        // Any empty needle is rejected.
        assert!(matches!(
            view.index_of_any_seq(&[&['a'], &[]]),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn index_of_any_seq_respects_window() {
        let view = inner_window();

        // Both candidates occur, but only 'e','f' fits inside [1, 6).
        let found = view.index_of_any_seq_in(&[&['g', 'h'], &['e', 'f']], 1, 5).unwrap();
        assert_eq!(Some(4), found);
    }

    #[test]
    fn search_on_empty_view() {
        let view = SeqView::<u32>::new();

        assert_eq!(None, view.index_of(&1));
        assert_eq!(None, view.index_of_in(&1, 0, 0).unwrap());
        assert_eq!(None, view.index_of_seq(&[1]).unwrap());
        assert!(view.index_of_in(&1, 1, 0).is_err());
    }
}

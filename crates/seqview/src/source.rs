// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Copy dispatch: every allocating construction and combination operation funnels
//! through this module, which picks the fastest copy path a source's concrete
//! capability allows.
//!
//! The capability is decided statically, once, at the API boundary - a contiguous
//! slice bulk-copies, an owned `Vec` moves, a sized iterator pre-sizes the
//! destination, and a one-shot iterator of unknown length is materialized in a
//! single full pass. Sources that are enumerated twice (once to size, once to
//! copy) are checked for stability between the passes.

use nm::{Event, Magnitude};

use crate::{Error, Result, SeqView};

/// A source of items that the copy dispatcher can drain into a destination
/// buffer.
///
/// Implementations exist for borrowed slices (contiguous bulk copy), views
/// (bulk copy of the window), owned `Vec`s (move, no clone), and the iterator
/// adapters in this module ([`exact()`], [`one_shot()`], [`rewindable()`]).
///
/// The contract between the two methods is what makes dispatch safe: when
/// [`exact_len()`][Self::exact_len] declares a length, [`copy_into()`][Self::copy_into]
/// must deliver exactly that many items. The dispatcher verifies this and
/// reports a violation as the fatal
/// [`InconsistentSequence`][crate::Error::InconsistentSequence] error.
pub trait CopySource<T> {
    /// The exact number of items this source will deliver, if knowable without
    /// consuming the source.
    fn exact_len(&self) -> Option<usize>;

    /// Drains the source into `dst`, appending at the end.
    fn copy_into(self, dst: &mut Vec<T>);
}

impl<T: Clone> CopySource<T> for &[T] {
    fn exact_len(&self) -> Option<usize> {
        Some(self.len())
    }

    fn copy_into(self, dst: &mut Vec<T>) {
        dst.extend_from_slice(self);
    }
}

impl<T: Clone, const LEN: usize> CopySource<T> for &[T; LEN] {
    fn exact_len(&self) -> Option<usize> {
        Some(LEN)
    }

    fn copy_into(self, dst: &mut Vec<T>) {
        dst.extend_from_slice(self);
    }
}

impl<T: Clone> CopySource<T> for &SeqView<T> {
    fn exact_len(&self) -> Option<usize> {
        Some(self.len())
    }

    fn copy_into(self, dst: &mut Vec<T>) {
        dst.extend_from_slice(self.as_slice());
    }
}

impl<T: Clone> CopySource<T> for SeqView<T> {
    fn exact_len(&self) -> Option<usize> {
        Some(self.len())
    }

    fn copy_into(self, dst: &mut Vec<T>) {
        dst.extend_from_slice(self.as_slice());
    }
}

impl<T> CopySource<T> for Vec<T> {
    fn exact_len(&self) -> Option<usize> {
        Some(self.len())
    }

    fn copy_into(mut self, dst: &mut Vec<T>) {
        dst.append(&mut self);
    }
}

/// A [`CopySource`] over an iterator of statically known length.
///
/// Created via [`exact()`].
#[derive(Debug)]
pub struct Exact<I> {
    iter: I,
}

/// Wraps a sized iterator as a [`CopySource`] that pre-sizes the destination.
///
/// The length the iterator reports is trusted for allocation but verified after
/// the copy; an iterator that lies about its length is reported as
/// [`InconsistentSequence`][crate::Error::InconsistentSequence].
pub fn exact<I>(iter: I) -> Exact<I::IntoIter>
where
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
{
    Exact {
        iter: iter.into_iter(),
    }
}

impl<T, I> CopySource<T> for Exact<I>
where
    I: ExactSizeIterator<Item = T>,
{
    fn exact_len(&self) -> Option<usize> {
        Some(self.iter.len())
    }

    fn copy_into(self, dst: &mut Vec<T>) {
        dst.extend(self.iter);
    }
}

/// A [`CopySource`] over an arbitrary iterator of unknown length.
///
/// Created via [`one_shot()`].
#[derive(Debug)]
pub struct OneShot<I> {
    iter: I,
}

/// Wraps an arbitrary iterator as a [`CopySource`].
///
/// No faster path exists generically: the source is drained in one full pass and
/// the destination grows as needed.
pub fn one_shot<I>(iter: I) -> OneShot<I::IntoIter>
where
    I: IntoIterator,
{
    OneShot {
        iter: iter.into_iter(),
    }
}

impl<T, I> CopySource<T> for OneShot<I>
where
    I: Iterator<Item = T>,
{
    fn exact_len(&self) -> Option<usize> {
        None
    }

    fn copy_into(self, dst: &mut Vec<T>) {
        dst.extend(self.iter);
    }
}

/// A [`CopySource`] over a cheaply re-iterable iterator, enumerated twice:
/// once to size the destination exactly, once to copy.
///
/// Created via [`rewindable()`].
#[derive(Debug)]
pub struct Rewindable<I> {
    iter: I,
}

/// Wraps a cloneable iterator as a [`CopySource`] that sizes the destination by
/// counting a first pass before copying in a second.
///
/// A source that yields a different number of items on the second pass violates
/// the stability assumption that lets the dispatcher avoid buffering; the
/// dispatcher reports this as the fatal
/// [`InconsistentSequence`][crate::Error::InconsistentSequence] error.
pub fn rewindable<I>(iter: I) -> Rewindable<I::IntoIter>
where
    I: IntoIterator,
    I::IntoIter: Clone,
{
    Rewindable {
        iter: iter.into_iter(),
    }
}

impl<T, I> CopySource<T> for Rewindable<I>
where
    I: Iterator<Item = T> + Clone,
{
    fn exact_len(&self) -> Option<usize> {
        Some(self.iter.clone().count())
    }

    fn copy_into(self, dst: &mut Vec<T>) {
        dst.extend(self.iter);
    }
}

/// Drains `source` into `dst`, verifying any declared length against what was
/// actually delivered.
///
/// This is the double-enumeration safety check shared by every allocating
/// operation: a mismatch means the source changed between the sizing pass and
/// the copying pass (or an `ExactSizeIterator` lied), which is fatal.
pub(crate) fn extend_from_source<T, S>(dst: &mut Vec<T>, source: S) -> Result<()>
where
    S: CopySource<T>,
{
    let declared = source.exact_len();
    let before = dst.len();

    if let Some(extra) = declared {
        dst.reserve_exact(extra);
    }

    source.copy_into(dst);

    if let Some(declared) = declared {
        // Will never wrap - copy_into only appends.
        let actual = dst.len().wrapping_sub(before);

        if actual != declared {
            return Err(Error::InconsistentSequence { declared, actual });
        }
    }

    Ok(())
}

/// Turns a buffer the dispatcher has just allocated and populated into a view,
/// recording the copy size.
pub(crate) fn materialize<T>(items: Vec<T>) -> SeqView<T> {
    // We can use this to fine-tune allocation behavior once we have real-world data.
    VIEW_COPIED_ITEMS.with(|x| x.observe(items.len()));

    SeqView::adopt(items)
}

impl<T> SeqView<T> {
    /// Creates a `SeqView` from any [`CopySource`], dispatching on the source's
    /// concrete capability.
    ///
    /// One destination buffer is allocated (exactly sized whenever the source
    /// can declare its length) and filled through the fastest copy path the
    /// source supports.
    ///
    /// Fails with [`InconsistentSequence`][Error::InconsistentSequence] if a
    /// source that declared its length delivered a different number of items.
    pub fn from_source<S>(source: S) -> Result<Self>
    where
        S: CopySource<T>,
    {
        let mut items = Vec::new();
        extend_from_source(&mut items, source)?;
        Ok(materialize(items))
    }

    /// Creates a `SeqView` by copying `len` items from an iterable source,
    /// skipping the first `offset` items.
    ///
    /// This is a single bounded pass: enumeration stops as soon as the requested
    /// range has been captured. Fails with [`OutOfRange`][Error::OutOfRange],
    /// distinguishing an offset beyond the source from a span that runs past the
    /// source end.
    pub fn copied_from_iter_range<I>(iter: I, offset: usize, len: usize) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let end = offset.checked_add(len).ok_or(Error::span_beyond(usize::MAX, offset))?;

        let mut iter = iter.into_iter();

        for consumed in 0..offset {
            if iter.next().is_none() {
                return Err(Error::offset_beyond(offset, consumed));
            }
        }

        let mut items = Vec::with_capacity(len);

        for captured in 0..len {
            match iter.next() {
                Some(item) => items.push(item),
                // Will never overflow - captured < len <= end - offset.
                None => return Err(Error::span_beyond(end, offset.wrapping_add(captured))),
            }
        }

        Ok(materialize(items))
    }

    /// Creates a `SeqView` by copying `len` items from an iterable source,
    /// ending `offset_from_end` items before the source's end.
    ///
    /// A range anchored at the unknown end makes a full count unavoidable, so the
    /// source is enumerated twice: once to count, once to copy. A source that
    /// comes up short on the second pass fails with
    /// [`InconsistentSequence`][Error::InconsistentSequence].
    pub fn copied_from_iter_tail<I>(iter: I, offset_from_end: usize, len: usize) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Clone,
    {
        let iter = iter.into_iter();
        let total = iter.clone().count();

        let start = total
            .checked_sub(offset_from_end)
            .ok_or(Error::offset_beyond(offset_from_end, total))?;

        if len > offset_from_end {
            return Err(Error::span_beyond(start.wrapping_add(len), total));
        }

        let mut items = Vec::with_capacity(len);
        items.extend(iter.skip(start).take(len));

        if items.len() != len {
            return Err(Error::InconsistentSequence {
                declared: total,
                // Will never overflow - both counts are bounded by the first pass.
                actual: start.wrapping_add(items.len()),
            });
        }

        Ok(materialize(items))
    }
}

const COPIED_ITEMS_BUCKETS: &[Magnitude] = &[0, 16, 256, 4096, 65_536];

thread_local! {
    static VIEW_COPIED_ITEMS: Event = Event::builder()
        .name("seqview_view_copied_items")
        .histogram(COPIED_ITEMS_BUCKETS)
        .build();
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    #![allow(
        clippy::indexing_slicing,
        clippy::arithmetic_side_effects,
        reason = "This is all fine in test code"
    )]

    use std::cell::Cell;

    use super::*;
    use crate::testing::{LyingLenIter, ShrinkingIter};

    #[test]
    fn from_slice_source() {
        let view = SeqView::from_source([1, 2, 3].as_slice()).unwrap();
        assert_eq!(view, &[1, 2, 3]);

        let view = SeqView::from_source(&[4, 5]).unwrap();
        assert_eq!(view, &[4, 5]);
    }

    #[test]
    fn from_vec_source_moves() {
        #[derive(Debug, PartialEq)]
        struct Opaque(u32);

        let view = SeqView::from_source(vec![Opaque(7)]).unwrap();
        assert_eq!(1, view.len());
        assert_eq!(Opaque(7), view[0]);
    }

    #[test]
    fn from_view_source_copies_window() {
        let original = SeqView::copied_from_slice(&[0, 1, 2, 3, 4]);
        let window = original.range(1..4);

        let copied = SeqView::from_source(&window).unwrap();
        assert_eq!(copied, &[1, 2, 3]);

        // The dispatcher copies; the result does not share the original backing.
        assert!(!copied.shares_backing(&original));
    }

    #[test]
    fn from_exact_iter_source() {
        let view = SeqView::from_source(exact(0..5_u32)).unwrap();
        assert_eq!(view, &[0, 1, 2, 3, 4]);
    }

    #[test]
    fn from_one_shot_source() {
        // A filtered iterator has no exact length.
        let iter = (0..10_u32).filter(|x| x % 2 == 0);
        assert!(one_shot(iter.clone()).exact_len().is_none());

        let view = SeqView::from_source(one_shot(iter)).unwrap();
        assert_eq!(view, &[0, 2, 4, 6, 8]);
    }

    #[test]
    fn from_rewindable_source() {
        let iter = (0..10_u32).filter(|x| x % 2 == 0);
        assert_eq!(Some(5), rewindable(iter.clone()).exact_len());

        let view = SeqView::from_source(rewindable(iter)).unwrap();
        assert_eq!(view, &[0, 2, 4, 6, 8]);
    }

    #[test]
    fn lying_exact_size_iterator_is_fatal() {
        let lying = LyingLenIter::new(3, 5);

        match SeqView::from_source(exact(lying)) {
            Err(Error::InconsistentSequence { declared, actual }) => {
                assert_eq!(declared, 5);
                assert_eq!(actual, 3);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unstable_rewindable_source_is_fatal() {
        // The counting pass drains items from the shared pool, so the copying
        // pass comes up short - the source is not stable between enumerations.
        let pool = Cell::new(8);
        let source = rewindable(ShrinkingIter::new(&pool, 5));

        match SeqView::from_source(source) {
            Err(Error::InconsistentSequence { declared, actual }) => {
                assert_eq!(declared, 5);
                assert_eq!(actual, 3);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn iter_range_bounded_pass() {
        let view = SeqView::copied_from_iter_range(0..100_u32, 10, 5).unwrap();
        assert_eq!(view, &[10, 11, 12, 13, 14]);

        let view = SeqView::copied_from_iter_range(0..3_u32, 0, 3).unwrap();
        assert_eq!(view, &[0, 1, 2]);

        let view = SeqView::copied_from_iter_range(0..3_u32, 3, 0).unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn iter_range_stops_as_soon_as_captured() {
        // An endless source must not be a problem as long as the range is bounded.
        let view = SeqView::copied_from_iter_range(0_u32.., 2, 3).unwrap();
        assert_eq!(view, &[2, 3, 4]);
    }

    #[test]
    fn iter_range_diagnostics() {
        use crate::OutOfRangeKind;

        match SeqView::copied_from_iter_range(0..3_u32, 5, 1) {
            Err(Error::OutOfRange { kind, .. }) => assert_eq!(kind, OutOfRangeKind::OffsetBeyondEnd),
            other => panic!("unexpected result: {other:?}"),
        }

        match SeqView::copied_from_iter_range(0..3_u32, 1, 5) {
            Err(Error::OutOfRange { kind, .. }) => assert_eq!(kind, OutOfRangeKind::SpanBeyondEnd),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn iter_tail() {
        let view = SeqView::copied_from_iter_tail(0..10_u32, 4, 2).unwrap();
        assert_eq!(view, &[6, 7]);

        let view = SeqView::copied_from_iter_tail(0..10_u32, 10, 10).unwrap();
        assert_eq!(10, view.len());

        let view = SeqView::copied_from_iter_tail(0..10_u32, 0, 0).unwrap();
        assert!(view.is_empty());

        // Anchor before the start of the source.
        assert!(SeqView::copied_from_iter_tail(0..10_u32, 11, 0).is_err());
        // Span runs past the end of the source.
        assert!(SeqView::copied_from_iter_tail(0..10_u32, 4, 5).is_err());
    }

    #[test]
    fn iter_tail_unstable_source_is_fatal() {
        let pool = Cell::new(8);

        // First pass counts 5; the copy pass then only finds 3 items.
        let result = SeqView::copied_from_iter_tail(ShrinkingIter::new(&pool, 5), 5, 4);

        assert!(matches!(result, Err(Error::InconsistentSequence { .. })));
    }
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::hash::{Hash, Hasher};
use std::ops::{Bound, Deref, Index, RangeBounds};
use std::sync::Arc;
use std::{fmt, slice};

use crate::cursor::SeqCursor;
use crate::{Error, Result};

/// A view over a sequence of immutable elements.
///
/// A `SeqView<T>` is a window (start offset + length) into a contiguous, shared,
/// immutable backing buffer. Cloning a view and slicing a view are O(1) operations
/// that share the backing buffer; no operation ever mutates a buffer after a view
/// has been constructed over it.
///
/// The zero-length view is a canonical value that does not reference any backing
/// buffer at all. It is available via [`SeqView::new()`] and `Default`, and every
/// zero-length slicing result collapses to it.
///
/// To create a view over actual data, copy from a borrowed source
/// ([`copied_from_slice()`][Self::copied_from_slice] and friends), transfer
/// ownership of a `Vec<T>` (`SeqView::from(vec)`, which clones nothing), or go
/// through the capability-dispatched [`from_source()`][Self::from_source] path.
pub struct SeqView<T> {
    /// `None` if and only if the view is the canonical empty value.
    backing: Option<Arc<[T]>>,

    start: usize,
    len: usize,
}

impl<T> SeqView<T> {
    /// Returns a view over a zero-length sequence.
    ///
    /// The canonical empty view references no backing buffer.
    #[cfg_attr(test, mutants::skip)] // Generates no-op mutations, not useful.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            backing: None,
            start: 0,
            len: 0,
        }
    }

    /// Takes ownership of a freshly produced buffer without copying its items.
    ///
    /// This is the only path that turns a mutable buffer into view backing. It is
    /// sound because the `Vec` is consumed - after the move there is no holder
    /// left that could mutate the contents.
    pub(crate) fn adopt(items: Vec<T>) -> Self {
        if items.is_empty() {
            return Self::new();
        }

        let backing: Arc<[T]> = Arc::from(items);
        let len = backing.len();

        Self {
            backing: Some(backing),
            start: 0,
            len,
        }
    }

    /// The number of items exposed through the view.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the view is over a zero-length sequence.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The entire window as one borrowed slice.
    ///
    /// This is the fundamental read accessor - indexing, search and iteration are
    /// all defined in terms of it. It never copies.
    #[expect(clippy::missing_panics_doc, reason = "only unreachable panics")]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        match &self.backing {
            Some(backing) => {
                // Will never overflow - the window invariant keeps start + len
                // within the backing buffer.
                let end = self.start.wrapping_add(self.len);

                backing.get(self.start..end).expect("view invariant violated: window does not fit the backing buffer")
            }
            None => &[],
        }
    }

    /// References the item at `index`, or `None` if the index is outside the view.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// References the item at `index` positions before the end of the view.
    ///
    /// `get_from_end(0)` is the last item.
    #[must_use]
    pub fn get_from_end(&self, index: usize) -> Option<&T> {
        let index = self.len.checked_sub(1)?.checked_sub(index)?;
        self.as_slice().get(index)
    }

    /// Returns a sub-view over a range of the sequence.
    ///
    /// This is an O(1) operation - the new view shares the backing buffer of this
    /// one, with an adjusted window.
    ///
    /// # Panics
    ///
    /// Panics if the provided range is outside the bounds of the view. Use
    /// [`range_checked()`][Self::range_checked] to get an error value instead.
    #[must_use]
    pub fn range<R>(&self, range: R) -> Self
    where
        R: RangeBounds<usize>,
    {
        self.range_checked(range).expect("provided range out of view bounds")
    }

    /// Returns a sub-view over a range of the sequence, or an
    /// [`OutOfRange`][Error::OutOfRange] error if the range violates the bounds
    /// of the view.
    ///
    /// A zero-length result is the canonical empty view.
    pub fn range_checked<R>(&self, range: R) -> Result<Self>
    where
        R: RangeBounds<usize>,
    {
        let start_at = match range.start_bound() {
            Bound::Included(&x) => x,
            Bound::Excluded(&x) => x.checked_add(1).ok_or(Error::offset_beyond(usize::MAX, self.len))?,
            Bound::Unbounded => 0,
        };

        if start_at > self.len {
            return Err(Error::offset_beyond(start_at, self.len));
        }

        let end_at = match range.end_bound() {
            Bound::Included(&x) => x.checked_add(1).ok_or(Error::span_beyond(usize::MAX, self.len))?,
            Bound::Excluded(&x) => x,
            Bound::Unbounded => self.len,
        };

        if end_at > self.len {
            return Err(Error::span_beyond(end_at, self.len));
        }

        // A range whose end lies before its start has no representable length.
        let len = end_at.checked_sub(start_at).ok_or(Error::span_beyond(end_at, start_at))?;

        Ok(self.subview(start_at, len))
    }

    /// Returns a sub-view whose bounds are anchored at the end of the view:
    /// `len` items starting `offset_from_end` positions before the end.
    ///
    /// Fails with [`OutOfRange`][Error::OutOfRange] if the anchor lies before the
    /// start of the view or the span runs past the end.
    pub fn range_from_end(&self, offset_from_end: usize, len: usize) -> Result<Self> {
        let start_at = self
            .len
            .checked_sub(offset_from_end)
            .ok_or(Error::offset_beyond(offset_from_end, self.len))?;

        if len > offset_from_end {
            return Err(Error::span_beyond(start_at.wrapping_add(len), self.len));
        }

        Ok(self.subview(start_at, len))
    }

    /// Builds the sub-view once bounds have been validated by the caller.
    fn subview(&self, start: usize, len: usize) -> Self {
        if len == 0 {
            // Every zero-length window is the same canonical empty value and
            // does not need to keep the backing buffer alive.
            return Self::new();
        }

        Self {
            backing: self.backing.clone(),
            // Will never overflow - validated against self.len by the caller.
            start: self.start.wrapping_add(start),
            len,
        }
    }

    /// Creates a `SeqView` by copying the contents of a slice.
    ///
    /// The items are cloned into a freshly allocated backing buffer, so later
    /// changes to the source cannot be observed through the view. To avoid the
    /// copy for a buffer you own, convert a `Vec<T>` instead, which transfers
    /// ownership without cloning a single item.
    #[must_use]
    pub fn copied_from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        Self::adopt(items.to_vec())
    }

    /// Creates a `SeqView` by copying `len` items of a slice starting at `offset`.
    ///
    /// Fails with [`OutOfRange`][Error::OutOfRange], distinguishing an offset
    /// beyond the source from a span that runs past the source end.
    #[expect(clippy::missing_panics_doc, reason = "only unreachable panics")]
    pub fn copied_from_slice_range(items: &[T], offset: usize, len: usize) -> Result<Self>
    where
        T: Clone,
    {
        if offset > items.len() {
            return Err(Error::offset_beyond(offset, items.len()));
        }

        let end = offset.checked_add(len).ok_or(Error::span_beyond(usize::MAX, items.len()))?;

        if end > items.len() {
            return Err(Error::span_beyond(end, items.len()));
        }

        Ok(Self::copied_from_slice(items.get(offset..end).expect("bounds validated above")))
    }

    /// Iterates over the items of the view in index order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns a restartable cursor over the items of the view.
    ///
    /// Unlike [`iter()`][Self::iter], the cursor has an explicit position that
    /// starts *before* the first item and must be advanced before the first read;
    /// see [`SeqCursor`].
    #[must_use]
    pub fn cursor(&self) -> SeqCursor<'_, T> {
        SeqCursor::new(self)
    }

    /// Whether two views share the same backing buffer.
    ///
    /// Used to verify that slicing and cloning are zero-copy. Two canonical empty
    /// views trivially share (non-existent) storage.
    #[must_use]
    pub fn shares_backing(&self, other: &Self) -> bool {
        match (&self.backing, &other.backing) {
            (Some(left), Some(right)) => Arc::ptr_eq(left, right),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T> Default for SeqView<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SeqView<T> {
    /// Cloning shares the backing buffer - O(1), no items are copied.
    fn clone(&self) -> Self {
        Self {
            backing: self.backing.clone(),
            start: self.start,
            len: self.len,
        }
    }
}

impl<T> From<Vec<T>> for SeqView<T> {
    /// Converts a `Vec<T>` into a `SeqView` without cloning any item.
    ///
    /// Ownership of the contents is transferred, which is what makes the
    /// no-copy adoption sound: after the conversion no holder remains that
    /// could mutate the buffer.
    fn from(value: Vec<T>) -> Self {
        Self::adopt(value)
    }
}

impl<T> FromIterator<T> for SeqView<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::adopt(iter.into_iter().collect())
    }
}

impl<T> Deref for SeqView<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> AsRef<[T]> for SeqView<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> Index<usize> for SeqView<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index` is outside the view. Use [`SeqView::get()`] for a
    /// non-panicking accessor.
    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).expect("index out of bounds of the view")
    }
}

impl<'v, T> IntoIterator for &'v SeqView<T> {
    type Item = &'v T;
    type IntoIter = slice::Iter<'v, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<T: PartialEq> PartialEq for SeqView<T> {
    fn eq(&self, other: &Self) -> bool {
        // We do not care about buffer identity, only the contents.
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for SeqView<T> {}

impl<T: PartialEq> PartialEq<&[T]> for SeqView<T> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq> PartialEq<SeqView<T>> for &[T] {
    fn eq(&self, other: &SeqView<T>) -> bool {
        other.eq(self)
    }
}

impl<T: PartialEq, const LEN: usize> PartialEq<&[T; LEN]> for SeqView<T> {
    fn eq(&self, other: &&[T; LEN]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq, const LEN: usize> PartialEq<SeqView<T>> for &[T; LEN] {
    fn eq(&self, other: &SeqView<T>) -> bool {
        other.eq(self)
    }
}

impl<T: Hash> Hash for SeqView<T> {
    /// Hashes the contents, consistently with `[T]` and with the equality
    /// relation (two equal views hash identically even if their backing
    /// buffers differ).
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for SeqView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW_ITEMS: usize = 8;

        let mut debug_struct = f.debug_struct("SeqView");

        debug_struct.field("len", &self.len);

        let preview_len = self.len.min(PREVIEW_ITEMS);
        let preview = self.as_slice().get(..preview_len).expect("preview length is bounded by the view length");

        debug_struct.field("leading_items", &preview);

        if self.len > PREVIEW_ITEMS {
            debug_struct.field("truncated_items", &(self.len.wrapping_sub(PREVIEW_ITEMS)));
        }

        debug_struct.finish()
    }
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Operations that produce a new, larger (or smaller) view from existing data.
//!
//! Every operation here allocates one exactly-sized destination buffer, copies
//! the original window and the new content into their respective offsets through
//! the copy dispatcher, and adopts the result. The original view is never
//! touched - in particular, prepending and inserting write only into the fresh
//! destination, never into the (possibly shared) backing buffer.

use nm::{Event, Magnitude};
use smallvec::SmallVec;

use crate::source::{extend_from_source, materialize};
use crate::{CopySource, Error, MAX_INLINE_PARTS, Result, SeqView};

impl<T: Clone> SeqView<T> {
    /// Returns a new view with `item` added after the end of this one.
    ///
    /// O(n) - the result owns a fresh buffer of length + 1.
    #[must_use]
    pub fn append(&self, item: T) -> Self {
        let mut items = Vec::with_capacity(self.len().saturating_add(1));
        items.extend_from_slice(self.as_slice());
        items.push(item);
        materialize(items)
    }

    /// Returns a new view with `item` added before the start of this one.
    ///
    /// O(n) - the result owns a fresh buffer of length + 1.
    #[must_use]
    pub fn prepend(&self, item: T) -> Self {
        let mut items = Vec::with_capacity(self.len().saturating_add(1));
        items.push(item);
        items.extend_from_slice(self.as_slice());
        materialize(items)
    }

    /// Returns a new view with `item` inserted at `index`.
    ///
    /// The boundary indices are valid: 0 degrades to [`prepend()`][Self::prepend]
    /// and `len()` to [`append()`][Self::append]. An index beyond the length
    /// fails with [`OutOfRange`][Error::OutOfRange].
    #[expect(clippy::missing_panics_doc, reason = "only unreachable panics")]
    pub fn insert(&self, index: usize, item: T) -> Result<Self> {
        if index > self.len() {
            return Err(Error::offset_beyond(index, self.len()));
        }

        let mut items = Vec::with_capacity(self.len().saturating_add(1));
        items.extend_from_slice(self.as_slice().get(..index).expect("index validated above"));
        items.push(item);
        items.extend_from_slice(self.as_slice().get(index..).expect("index validated above"));
        Ok(materialize(items))
    }

    /// Returns a new view with the contents of `source` added after the end of
    /// this one.
    ///
    /// O(n + m) through the copy dispatcher; the fastest copy path available for
    /// the source's concrete capability is used.
    pub fn append_all<S>(&self, source: S) -> Result<Self>
    where
        S: CopySource<T>,
    {
        let mut items = Vec::with_capacity(self.len().saturating_add(source.exact_len().unwrap_or(0)));
        items.extend_from_slice(self.as_slice());
        extend_from_source(&mut items, source)?;
        Ok(materialize(items))
    }

    /// Returns a new view with the contents of `source` inserted at `index`.
    ///
    /// The boundary indices degrade to prepending/appending. An index beyond the
    /// length fails with [`OutOfRange`][Error::OutOfRange].
    #[expect(clippy::missing_panics_doc, reason = "only unreachable panics")]
    pub fn insert_all<S>(&self, index: usize, source: S) -> Result<Self>
    where
        S: CopySource<T>,
    {
        if index > self.len() {
            return Err(Error::offset_beyond(index, self.len()));
        }

        let mut items = Vec::with_capacity(self.len().saturating_add(source.exact_len().unwrap_or(0)));
        items.extend_from_slice(self.as_slice().get(..index).expect("index validated above"));
        extend_from_source(&mut items, source)?;
        items.extend_from_slice(self.as_slice().get(index..).expect("index validated above"));
        Ok(materialize(items))
    }

    /// Returns a view without the items for which `remove` answers true.
    ///
    /// If nothing is removed the original view is returned unchanged, sharing
    /// its backing buffer without any allocation. If everything is removed the
    /// canonical empty view is returned. Otherwise the result owns a buffer of
    /// exactly the retained length.
    ///
    /// The predicate is consulted twice per item (once to size the result, once
    /// to compact), so it must answer consistently.
    #[must_use]
    pub fn remove_all<F>(&self, mut remove: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        let retained = self.as_slice().iter().filter(|item| !remove(item)).count();

        if retained == self.len() {
            return self.clone();
        }

        if retained == 0 {
            return Self::new();
        }

        let mut items = Vec::with_capacity(retained);
        items.extend(self.as_slice().iter().filter(|item| !remove(item)).cloned());
        materialize(items)
    }

    /// Concatenates any number of views into one.
    ///
    /// Zero parts yield the canonical empty view. A single part is returned
    /// as-is, sharing its backing buffer without any copy. Otherwise one
    /// destination buffer sized as the sum of all part lengths is allocated and
    /// filled in a single pass - O(total n + s) for s parts.
    #[expect(clippy::missing_panics_doc, reason = "only unreachable panics")]
    #[must_use]
    pub fn concat<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let parts: SmallVec<[Self; MAX_INLINE_PARTS]> = parts.into_iter().collect();

        // We can use this to fine-tune the inline part count once we have real-world data.
        COMBINED_PARTS.with(|x| x.observe(parts.len()));

        match parts.len() {
            0 => Self::new(),
            1 => parts.into_iter().next().expect("part count checked above"),
            _ => {
                let total = parts.iter().map(Self::len).fold(0_usize, usize::saturating_add);

                let mut items = Vec::with_capacity(total);

                for part in &parts {
                    items.extend_from_slice(part.as_slice());
                }

                materialize(items)
            }
        }
    }

    /// Concatenates any number of [`CopySource`]s into one view.
    ///
    /// Like [`concat()`][Self::concat], but accepting sources of any capability.
    /// The destination is exactly pre-sized when every source can declare its
    /// length. Fails with
    /// [`InconsistentSequence`][Error::InconsistentSequence] if a source that
    /// declared its length delivered a different number of items.
    pub fn concat_sources<I, S>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: CopySource<T>,
    {
        let sources: SmallVec<[S; MAX_INLINE_PARTS]> = sources.into_iter().collect();

        COMBINED_PARTS.with(|x| x.observe(sources.len()));

        if sources.is_empty() {
            return Ok(Self::new());
        }

        let mut items = match sources.iter().map(CopySource::exact_len).sum::<Option<usize>>() {
            Some(total) => Vec::with_capacity(total),
            None => Vec::new(),
        };

        for source in sources {
            extend_from_source(&mut items, source)?;
        }

        Ok(materialize(items))
    }

    /// Concatenates views with `delimiter` interleaved between each adjacent
    /// pair.
    ///
    /// An empty delimiter degenerates to [`concat()`][Self::concat]. A single
    /// part is returned as-is without any copy. O(total n + s·d) for s parts and
    /// a delimiter of length d.
    #[expect(clippy::missing_panics_doc, reason = "only unreachable panics")]
    #[must_use]
    pub fn join<I>(delimiter: &Self, parts: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        if delimiter.is_empty() {
            return Self::concat(parts);
        }

        let parts: SmallVec<[Self; MAX_INLINE_PARTS]> = parts.into_iter().collect();

        COMBINED_PARTS.with(|x| x.observe(parts.len()));

        match parts.len() {
            0 => Self::new(),
            1 => parts.into_iter().next().expect("part count checked above"),
            _ => {
                let items_total = parts.iter().map(Self::len).fold(0_usize, usize::saturating_add);
                let delimiters_total = delimiter.len().saturating_mul(parts.len().wrapping_sub(1));

                let mut items = Vec::with_capacity(items_total.saturating_add(delimiters_total));

                for (position, part) in parts.iter().enumerate() {
                    if position > 0 {
                        items.extend_from_slice(delimiter.as_slice());
                    }

                    items.extend_from_slice(part.as_slice());
                }

                materialize(items)
            }
        }
    }
}

const PART_COUNT_BUCKETS: &[Magnitude] = &[0, 1, 2, 4, 8, 16, 32];

thread_local! {
    static COMBINED_PARTS: Event = Event::builder()
        .name("seqview_combined_parts")
        .histogram(PART_COUNT_BUCKETS)
        .build();
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Create and manipulate immutable sequences of elements.
//!
//! A sequence view is a window over a contiguous, shared, immutable block of
//! elements, similar to a slice `&[T]` but with some key differences:
//!
//! * A [`SeqView`] owns a share of its backing storage - it is a value type with
//!   no lifetime parameter, free to be stored, sent across threads and returned
//!   from functions.
//! * The elements behind a view are always immutable.
//!
//! Because the contents can never change, a view can hand out sub-views that
//! share the same backing buffer: cloning and slicing are O(1) and allocate
//! nothing.
//!
//! ```
//! use seqview::SeqView;
//!
//! let view = SeqView::copied_from_slice(&[1, 2, 3, 4, 5]);
//!
//! let middle = view.range(1..4);
//!
//! assert_eq!(middle, &[2, 3, 4]);
//! assert!(middle.shares_backing(&view));
//! ```
//!
//! # Creating Views
//!
//! Every construction path either copies the source exactly once or proves that
//! no copy is needed:
//!
//! * [`copied_from_slice()`] copies a borrowed slice, so later changes to the
//!   source cannot be observed through the view.
//! * `SeqView::from(vec)` adopts an owned `Vec<T>` without cloning any element -
//!   ownership transfer is what makes the no-copy adoption sound.
//! * Cloning an existing view shares its backing buffer - O(1).
//! * [`from_source()`] accepts any [`CopySource`] and dispatches on the source's
//!   concrete capability: contiguous sources bulk-copy, sized sources get an
//!   exactly-sized destination in one pass, and arbitrary one-shot sequences are
//!   materialized in a single full pass. See the [`source`] module.
//! * [`copied_from_iter_range()`] captures a bounded sub-range of an iterable
//!   source in a single pass that stops as early as possible;
//!   [`copied_from_iter_tail()`] anchors the range at the source's end, which
//!   makes a counting pass unavoidable.
//!
//! Sources that are enumerated twice (once to size the destination, once to
//! copy) are verified between the passes; a source that changes length in
//! between is reported as the fatal [`Error::InconsistentSequence`].
//!
//! # Deriving New Views
//!
//! A view never mutates - operations that "change" a sequence return a new view
//! over a freshly allocated, exactly-sized buffer:
//!
//! ```
//! use seqview::SeqView;
//!
//! let view = SeqView::copied_from_slice(&[1, 2, 3]);
//!
//! let longer = view.append(4);
//! let full = view.prepend(0);
//!
//! assert_eq!(longer, &[1, 2, 3, 4]);
//! assert_eq!(full, &[0, 1, 2, 3]);
//!
//! // The original is untouched by any of this.
//! assert_eq!(view, &[1, 2, 3]);
//! ```
//!
//! [`concat()`] and [`join()`] combine any number of views, special-casing the
//! empty and single-part inputs to avoid copying; [`remove_all()`] compacts a
//! view through a predicate and returns the original, share and all, when
//! nothing was removed.
//!
//! # Searching
//!
//! Linear searches for an item, any of a set of items, an ordered subsequence
//! or any of several subsequences, each optionally restricted to a
//! `[start, start + count)` window of the view and optionally parameterized
//! with an equality predicate that receives both items by reference:
//!
//! ```
//! use seqview::SeqView;
//!
//! let view = SeqView::copied_from_slice(b"mississippi");
//!
//! assert_eq!(Some(2), view.index_of(&b's'));
//! assert_eq!(Some(1), view.index_of_seq(b"issi").unwrap());
//! assert_eq!(None, view.index_of_seq(b"xyz").unwrap());
//! ```
//!
//! # Enumerating
//!
//! [`iter()`] walks the window as a standard iterator. For callers that need an
//! explicitly positioned, restartable traversal there is [`cursor()`]:
//!
//! ```
//! use seqview::SeqView;
//!
//! let view = SeqView::copied_from_slice(&[10, 20]);
//! let mut cursor = view.cursor();
//!
//! // The cursor starts before the first item; reading now would be an error.
//! assert!(cursor.current().is_err());
//!
//! assert!(cursor.advance());
//! assert_eq!(10, *cursor.current().unwrap());
//!
//! cursor.reset();
//! assert!(cursor.advance());
//! assert_eq!(10, *cursor.current().unwrap());
//! ```
//!
//! # Thread Safety
//!
//! A view has no internal mutable state after construction, so views may be
//! cloned, sent and read concurrently from any number of threads (given
//! `T: Send + Sync`). Nothing blocks and nothing is retried - every operation
//! is synchronous, bounded, in-memory computation, and every contract violation
//! surfaces as an [`Error`] on the operation that detected it.
//!
//! [`copied_from_slice()`]: SeqView::copied_from_slice
//! [`from_source()`]: SeqView::from_source
//! [`copied_from_iter_range()`]: SeqView::copied_from_iter_range
//! [`copied_from_iter_tail()`]: SeqView::copied_from_iter_tail
//! [`concat()`]: SeqView::concat
//! [`join()`]: SeqView::join
//! [`remove_all()`]: SeqView::remove_all
//! [`iter()`]: SeqView::iter
//! [`cursor()`]: SeqView::cursor

mod combine;
mod constants;
mod cursor;
mod error;
mod search;
pub mod source;
mod view;

pub use constants::MAX_INLINE_PARTS;
pub use cursor::SeqCursor;
pub use error::{Error, OutOfRangeKind, Result};
pub use source::CopySource;
pub use view::SeqView;

#[cfg(test)]
mod testing;

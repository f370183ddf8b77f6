// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::{Error, Result, SeqView};

/// A restartable cursor over the items of a [`SeqView`].
///
/// Created via [`SeqView::cursor()`][crate::SeqView::cursor].
///
/// Unlike a plain iterator, the cursor has an explicit position with two
/// out-of-window states: freshly created (or [`reset()`][Self::reset]) it sits
/// *before* the first item, and advancing past the last item parks it *after*
/// the end. Reading [`current()`][Self::current] in either state fails with
/// [`InvalidState`][crate::Error::InvalidState].
///
/// The cursor walks the view's own window - for a view that is itself a slice,
/// the first advance lands on the slice's first item, not the backing buffer's.
#[derive(Debug)]
pub struct SeqCursor<'v, T> {
    view: &'v SeqView<T>,
    state: CursorState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    BeforeFirst,
    At(usize),
    PastEnd,
}

impl<'v, T> SeqCursor<'v, T> {
    pub(crate) const fn new(view: &'v SeqView<T>) -> Self {
        Self {
            view,
            state: CursorState::BeforeFirst,
        }
    }

    /// Moves the cursor to the next item.
    ///
    /// Returns whether the cursor is now positioned on an item. Once the cursor
    /// has advanced past the end it stays there until [`reset()`][Self::reset].
    pub fn advance(&mut self) -> bool {
        let next = match self.state {
            CursorState::BeforeFirst => 0,
            // Will never overflow - bounded by the view length below.
            CursorState::At(current) => current.wrapping_add(1),
            CursorState::PastEnd => return false,
        };

        if next < self.view.len() {
            self.state = CursorState::At(next);
            true
        } else {
            self.state = CursorState::PastEnd;
            false
        }
    }

    /// References the item the cursor is positioned on.
    ///
    /// Fails with [`InvalidState`][crate::Error::InvalidState] before the first
    /// advance and after the cursor has advanced past the end.
    #[expect(clippy::missing_panics_doc, reason = "only unreachable panics")]
    pub fn current(&self) -> Result<&'v T> {
        match self.state {
            CursorState::At(index) => Ok(self.view.get(index).expect("cursor position is always within the view")),
            CursorState::BeforeFirst | CursorState::PastEnd => Err(Error::InvalidState),
        }
    }

    /// Returns the cursor to its pre-first-advance state.
    pub fn reset(&mut self) {
        self.state = CursorState::BeforeFirst;
    }
}

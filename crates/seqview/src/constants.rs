// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// How many parts `concat`/`join` can gather without a heap allocation for the
/// part list itself.
///
/// Combining more parts than this still works fine - the part list simply spills
/// to the heap. The item copies are unaffected either way.
pub const MAX_INLINE_PARTS: usize = 8;

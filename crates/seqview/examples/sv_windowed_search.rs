// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Showcases zero-copy slicing and window-restricted searching.

use seqview::SeqView;

fn main() {
    // One backing buffer for the whole session - every view below shares it.
    let log: SeqView<u8> = SeqView::copied_from_slice(b"GET /index.html HTTP/1.1");

    // Slicing is O(1): the path view is a window, not a copy.
    let space = log.index_of(&b' ').expect("request line always has a method");
    let rest = log.range(space + 1..);
    assert!(rest.shares_backing(&log));

    let path_end = rest.index_of(&b' ').expect("request line always has a protocol");
    let path = rest.range(..path_end);

    println!("path: {}", String::from_utf8_lossy(path.as_slice()));

    // Search can be restricted to a window of the view. The extension dot must
    // come from the path, not from the protocol version trailing it.
    let dot = log
        .index_of_in(&b'.', space + 1, path_end)
        .expect("window is within the view");
    println!("extension starts at index: {dot:?}");

    // Derived views never disturb the original.
    let rewritten = path.append_all(b"?cached=1".as_slice()).expect("sized source is stable");
    println!("rewritten: {}", String::from_utf8_lossy(rewritten.as_slice()));
    println!("original:  {}", String::from_utf8_lossy(log.as_slice()));
}

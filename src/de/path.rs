//! The grammar of a decoded `key=value` pair.
//!
//! A key like `a[b][]` is read as a root name followed by bracketed
//! segments. The grammar is total: every string produces some path.
//!
//! - The text before the first `[` is the root name, taken verbatim. It may
//!   be empty.
//! - Each following `[`-separated part is
//!   - empty (`a[[b]` or a trailing `[`): [`Segment::End`], the value lands
//!     on the key reached so far and the rest of the key is ignored,
//!   - starting with `]`: [`Segment::Append`], which also ends the path,
//!   - otherwise a [`Segment::Key`]: the text up to the first `]`, or the
//!     whole part when the bracket is never closed. Anything between that
//!     `]` and the next `[` is dropped.
//!
//! At most `max_depth` named segments are read. Once that many have been
//! read, the remaining text of the key (starting at its `[`) becomes one last
//! literal [`Segment::Key`], so `a[b][c][d]` with a depth of 1 nests as
//! `{a: {b: {"[c][d]": ..}}}`.

/// Finds where the key ends and the value starts.
///
/// This is the first `=` outside a `[...]` span, falling back to the first
/// `=` anywhere. Nesting is not tracked: `[` enters a span, `]` leaves it.
pub(crate) fn split_point(pair: &str) -> Option<usize> {
    let mut inside = false;
    for (idx, b) in pair.bytes().enumerate() {
        match b {
            b']' => inside = false,
            b'[' => inside = true,
            b'=' if !inside => return Some(idx),
            _ => {}
        }
    }
    pair.find('=')
}

/// Splits a decoded pair into key and value.
///
/// A pair without a key (`foo`, or `=foo`) is a bare flag: the whole pair is
/// the key and the value is empty.
pub(crate) fn split_pair(pair: &str) -> (&str, &str) {
    match split_point(pair) {
        Some(idx) if idx > 0 => (&pair[..idx], &pair[idx + 1..]),
        _ => (pair, ""),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Segment<'k> {
    /// `[name]`: descend into the mapping at the current key.
    Key(&'k str),
    /// `[]`: append to the sequence at the current key.
    Append,
    /// `[` with nothing after it.
    End,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct KeyPath<'k> {
    pub(crate) root: &'k str,
    pub(crate) segments: Vec<Segment<'k>>,
}

impl<'k> KeyPath<'k> {
    pub(crate) fn parse(key: &'k str, max_depth: usize) -> Self {
        let (root, mut rest) = key.split_at(key.find('[').unwrap_or(key.len()));
        let mut segments = Vec::new();
        let mut depth = 0;
        while let Some(tail) = rest.strip_prefix('[') {
            let (part, next) = tail.split_at(tail.find('[').unwrap_or(tail.len()));
            let segment = match part.find(']') {
                _ if part.is_empty() => Segment::End,
                Some(0) => Segment::Append,
                _ if depth == max_depth => {
                    segments.push(Segment::Key(rest));
                    break;
                }
                Some(end) => Segment::Key(&part[..end]),
                None => Segment::Key(part),
            };
            segments.push(segment);
            if !matches!(segment, Segment::Key(_)) {
                break;
            }
            depth += 1;
            rest = next;
        }
        KeyPath { root, segments }
    }
}

//! Parsing querystrings into nested mappings.
//!
//! ### An overview of the design of `parse`
//!
//! The input is split on `&` into raw pairs. Each raw pair is decoded as a
//! whole (so `%5B` and `%3D` act as brackets and `=` afterwards), and then
//! split into a key and a value by `path::split_pair`.
//!
//! Keys without a `]` are flat: repeating one turns its value into a
//! sequence (`a=1&a=2` gives `{a: ["1", "2"]}`).
//!
//! Keys with a `]` are parsed into a `KeyPath` and walked with a cursor made
//! of the current container and the current key. Named segments move the
//! cursor one mapping deeper, creating it if needed; `[]` appends to the
//! sequence at the cursor; reaching the end assigns the value at the cursor,
//! replacing whatever was there.
//!
//! Values are always kept as strings. Parsing never fails: pairs whose path
//! runs into an existing string or sequence are dropped, and malformed
//! brackets are read according to the grammar in `path`.
//!
//! Nesting is bounded by `Config::max_depth`. Past that depth the rest of the
//! key is kept as a literal key, so the depth of the result (and of every
//! recursive walk over it, including `Drop`) is bounded by the configuration
//! rather than by the input.

mod decode;
mod path;

use indexmap::map::Entry;

use crate::config::Config;
use crate::value::{Object, Value};

use path::{KeyPath, Segment};

/// Parses a querystring with the default [`Config`].
///
/// ```
/// let parsed = nested_qs::parse("a[b][]=x&a[b][]=y&c=1&c=2&flag");
///
/// assert_eq!(
///     serde_json::to_value(&parsed).unwrap(),
///     serde_json::json!({"a": {"b": ["x", "y"]}, "c": ["1", "2"], "flag": ""})
/// );
/// ```
pub fn parse(input: &str) -> Object {
    Config::new().parse(input)
}

/// Parses a querystring from bytes with the default [`Config`].
///
/// Bytes that do not decode to valid UTF-8 are replaced with U+FFFD.
pub fn parse_bytes(input: &[u8]) -> Object {
    Config::new().parse_bytes(input)
}

/// Parses `input`, nesting at most `max_depth` named segments below each
/// root key. A depth of 0 keeps every key flat.
pub(crate) fn parse_with_depth(input: &[u8], max_depth: usize) -> Object {
    let root = Object::new();
    for raw in input.split(|&b| b == b'&') {
        if raw.is_empty() {
            continue;
        }
        let pair = decode::decode_str(raw);
        let (key, value) = path::split_pair(&pair);
        if key.contains(']') && max_depth > 0 {
            insert_nested(&root, KeyPath::parse(key, max_depth), value);
        } else {
            insert_flat(&root, key, value);
        }
    }
    root
}

/// Sets `key` to `value`, turning repeated keys into a sequence.
fn insert_flat(object: &Object, key: &str, value: &str) {
    let mut map = object.borrow_mut();
    match map.entry(key.to_owned()) {
        Entry::Occupied(mut o) => {
            let entry = o.get_mut();
            if let Value::Sequence(seq) = entry {
                seq.push(value.into());
            } else {
                let existing = std::mem::take(entry);
                *entry = Value::Sequence(vec![existing, value.into()]);
            }
        }
        Entry::Vacant(v) => {
            v.insert(value.into());
        }
    }
}

fn insert_nested(root: &Object, path: KeyPath<'_>, value: &str) {
    let mut container = root.clone();
    let mut key = path.root;
    for segment in path.segments {
        match segment {
            Segment::Key(name) => {
                let Some(child) = descend(&container, key) else {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(key, "dropping pair: key already holds a value");
                    return;
                };
                container = child;
                key = name;
            }
            Segment::Append => {
                append(&container, key, value);
                return;
            }
            Segment::End => break,
        }
    }
    container.insert(key, value);
}

/// Returns the mapping stored under `key`, creating it if the key is unset.
///
/// A bare flag (empty string) is replaced by a new mapping. Any other string
/// and any sequence block the descent.
fn descend(container: &Object, key: &str) -> Option<Object> {
    let mut map = container.borrow_mut();
    let slot = map
        .entry(key.to_owned())
        .or_insert_with(|| Value::Mapping(Object::new()));
    if matches!(slot, Value::String(s) if s.is_empty()) {
        *slot = Value::Mapping(Object::new());
    }
    match slot {
        Value::Mapping(child) => Some(child.clone()),
        _ => None,
    }
}

/// Appends `value` to the sequence under `key`.
///
/// Anything other than a sequence under `key` is replaced by an empty one.
/// Empty values create the sequence but are not pushed.
fn append(container: &Object, key: &str, value: &str) {
    let mut map = container.borrow_mut();
    let slot = map
        .entry(key.to_owned())
        .or_insert_with(|| Value::Sequence(Vec::new()));
    if !matches!(slot, Value::Sequence(_)) {
        #[cfg(feature = "tracing")]
        tracing::trace!(key, "replacing value with a sequence");
        *slot = Value::Sequence(Vec::new());
    }
    if let Value::Sequence(seq) = slot {
        if !value.is_empty() {
            seq.push(value.into());
        }
    }
}

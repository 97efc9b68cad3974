//! The dynamic value tree that is stringified and produced by parsing.

mod serde_impl;

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

/// Insertion-ordered map backing every [`Object`].
pub type Map = IndexMap<String, Value>;

/// A node of the structure being encoded or decoded.
///
/// `parse` only ever produces `String`, `Sequence` and `Mapping` values; the
/// remaining variants exist so that arbitrary host data can be stringified.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    /// An absent value, e.g. a missing optional field.
    Undefined,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Value>),
    Mapping(Object),
    /// An opaque callable. Encoded exactly like `Undefined`.
    Function,
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Mapping(object) => Some(object),
            _ => None,
        }
    }

    /// `Null`, `Undefined` and `Function` all encode as "no value".
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined | Value::Function)
    }
}

/// A numeric scalar.
///
/// Numbers print the way JavaScript's `Number.prototype.toString` prints
/// them: the shortest digits that round-trip, in plain decimal notation for
/// magnitudes in `[1e-6, 1e21)` and in exponent notation (`1e+21`, `1.5e-7`)
/// otherwise. Integral floats drop their fraction (`1.0` is `1`), and
/// non-finite values print as `NaN`, `Infinity` and `-Infinity`.
#[derive(Clone, Copy, Debug)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub(crate) fn format<'b>(&self, buffer: &'b mut NumberBuffer) -> &'b str {
        match *self {
            Number::Int(i) => buffer.int.format(i),
            Number::Float(f) if f.is_nan() => "NaN",
            Number::Float(f) if f.is_infinite() => {
                if f > 0.0 {
                    "Infinity"
                } else {
                    "-Infinity"
                }
            }
            Number::Float(f) => buffer.format_float(f),
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = NumberBuffer::new();
        f.write_str(self.format(&mut buffer))
    }
}

/// Scratch space for rendering numbers.
pub(crate) struct NumberBuffer {
    int: itoa::Buffer,
    float: ryu::Buffer,
    text: String,
}

impl NumberBuffer {
    pub(crate) fn new() -> Self {
        Self {
            int: itoa::Buffer::new(),
            float: ryu::Buffer::new(),
            text: String::new(),
        }
    }

    /// Rewrites the shortest representation from `ryu` into JavaScript's
    /// layout. `f` must be finite.
    fn format_float(&mut self, f: f64) -> &str {
        let shortest = self.float.format_finite(f.abs());
        let (mantissa, exponent) = match shortest.split_once('e') {
            Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
            None => (shortest, 0),
        };
        let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));

        // the value is 0.DIGITS * 10^point
        let digits = int.trim_start_matches('0');
        let mut point = int.len() as i32 - (int.len() - digits.len()) as i32 + exponent;
        let digits = if digits.is_empty() {
            let trimmed = frac.trim_start_matches('0');
            point -= (frac.len() - trimmed.len()) as i32;
            trimmed.trim_end_matches('0').to_owned()
        } else {
            let mut all = String::with_capacity(digits.len() + frac.len());
            all.push_str(digits);
            all.push_str(frac);
            all.trim_end_matches('0').to_owned()
        };

        let text = &mut self.text;
        text.clear();
        if digits.is_empty() {
            text.push('0');
            return text;
        }
        if f < 0.0 {
            text.push('-');
        }

        let k = digits.len() as i32;
        let n = point;
        if k <= n && n <= 21 {
            text.push_str(&digits);
            text.extend(std::iter::repeat_n('0', (n - k) as usize));
        } else if 0 < n && n <= 21 {
            let (whole, fraction) = digits.split_at(n as usize);
            text.push_str(whole);
            text.push('.');
            text.push_str(fraction);
        } else if -6 < n && n <= 0 {
            text.push_str("0.");
            text.extend(std::iter::repeat_n('0', (-n) as usize));
            text.push_str(&digits);
        } else {
            let (first, rest) = digits.split_at(1);
            text.push_str(first);
            if !rest.is_empty() {
                text.push('.');
                text.push_str(rest);
            }
            text.push('e');
            text.push(if n > 0 { '+' } else { '-' });
            text.push_str(self.int.format((n - 1).abs()));
        }
        text
    }
}

/// A shared, mutable mapping from keys to values.
///
/// Cloning an `Object` clones the handle, not the entries: both handles refer
/// to the same mapping. This is what lets a mapping contain itself, and the
/// encoder tells mappings apart by this identity rather than by contents.
///
/// `Debug` and `PartialEq` walk the entries and therefore do not terminate on
/// cyclic structures (comparing a handle with itself short-circuits).
#[derive(Clone, Default)]
pub struct Object(Rc<RefCell<Map>>);

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, returning the previous value for `key`.
    ///
    /// A new key goes to the end of the iteration order; replacing an
    /// existing key keeps its position.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.borrow_mut().insert(key.into(), value.into())
    }

    /// Returns a clone of the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Keys in iteration order.
    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }

    pub fn borrow(&self) -> Ref<'_, Map> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Map> {
        self.0.borrow_mut()
    }

    /// Returns `true` if both handles point to the same mapping.
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Takes the entries out, cloning them if other handles are still alive.
    pub fn into_map(self) -> Map {
        match Rc::try_unwrap(self.0) {
            Ok(cell) => cell.into_inner(),
            Err(shared) => shared.borrow().clone(),
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.borrow().iter()).finish()
    }
}

impl From<Map> for Object {
    fn from(map: Map) -> Self {
        Object(Rc::new(RefCell::new(map)))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map: Map = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        map.into()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! from_int {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    Number::Int(n as i64)
                }
            }

            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n.into())
                }
            }
        )*
    };
}

from_int! { i8 i16 i32 i64 u8 u16 u32 }

// integers that may not fit in an `i64` fall back to the nearest float
macro_rules! from_wide_int {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for Number {
                fn from(n: $ty) -> Self {
                    match i64::try_from(n) {
                        Ok(i) => Number::Int(i),
                        Err(_) => Number::Float(n as f64),
                    }
                }
            }

            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n.into())
                }
            }
        )*
    };
}

from_wide_int! { u64 usize isize }

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::Float(f)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(f.into())
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(seq: Vec<T>) -> Self {
        Value::Sequence(seq.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Mapping(object)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Mapping(map.into())
    }
}

//! Stringifying values into querystrings.

mod encode;
pub(crate) mod guard;

pub use encode::{Encoding, Escape};

use std::io::Write;

use crate::config::Config;
use crate::error::Result;
use crate::value::{NumberBuffer, Object, Value};

use guard::CycleGuard;

/// Stringifies a value with the default [`Config`].
///
/// ```
/// use nested_qs::{Object, Value};
///
/// let address: Object = [("city", "Carrot City"), ("postcode", "12345")]
///     .into_iter()
///     .collect();
/// let query: Object = [
///     ("name", Value::from("Acme")),
///     ("ids", Value::from(vec![1, 2])),
///     ("address", Value::from(address)),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(
///     nested_qs::stringify(&query.into()).unwrap(),
///     "name=Acme&ids[]=1&ids[]=2&address[city]=Carrot%20City&address[postcode]=12345"
/// );
/// ```
pub fn stringify(value: &Value) -> Result<String> {
    Config::new().stringify(value)
}

/// Stringifies a value with the default [`Config`] into a writer.
pub fn stringify_to_writer<W: Write>(value: &Value, writer: &mut W) -> Result<()> {
    Config::new().stringify_to_writer(value, writer)
}

/// Walks one value depth-first and writes its `key=value` segments.
///
/// The full key of the node being visited is kept in `key`, unescaped;
/// descending appends `[]`, `[name]` or the bare root name to it and
/// returning truncates it again. Each segment is escaped only when it is
/// written.
///
/// The children of a sequence or mapping are joined with the separator
/// whether or not they wrote anything, so `{a: [], b: 1}` becomes `&b=1`.
/// `written` counts the bytes produced so far, which tells a mapping whether
/// its joined entries came out empty.
pub(crate) struct Stringifier<'c, W, E> {
    writer: W,
    written: usize,
    key: String,
    ancestors: CycleGuard,
    config: &'c Config<'c, E>,
}

impl<'c, W: Write, E: Escape> Stringifier<'c, W, E> {
    pub(crate) fn new(writer: W, config: &'c Config<'c, E>) -> Self {
        Self {
            writer,
            written: 0,
            key: config.key_prefix.to_owned(),
            ancestors: CycleGuard::default(),
            config,
        }
    }

    pub(crate) fn visit(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null | Value::Undefined | Value::Function => self.write_unit(),
            Value::Bool(b) => self.write_value(if *b { "1" } else { "0" }),
            Value::Number(n) => {
                let mut buffer = NumberBuffer::new();
                self.write_value(n.format(&mut buffer))
            }
            Value::String(s) => self.write_value(s),
            Value::Sequence(items) => {
                let len = self.key.len();
                self.key.push_str("[]");
                let result = self.visit_items(items);
                self.key.truncate(len);
                result
            }
            Value::Mapping(object) => self.visit_object(object),
        }
    }

    fn visit_items(&mut self, items: &[Value]) -> Result<()> {
        for (idx, item) in items.iter().enumerate() {
            if idx > 0 {
                self.write_separator()?;
            }
            self.visit(item)?;
        }
        Ok(())
    }

    fn visit_object(&mut self, object: &Object) -> Result<()> {
        self.ancestors.enter(object)?;
        let start = self.written;
        let result = self.visit_entries(object);
        self.ancestors.leave();
        result?;

        // an empty mapping still reserves its key
        if self.written == start && !self.key.is_empty() {
            let key = std::mem::take(&mut self.key);
            let result = self.write_raw(key.as_bytes());
            self.key = key;
            result?;
            self.write_raw(self.config.assigner.as_bytes())?;
        }
        Ok(())
    }

    fn visit_entries(&mut self, object: &Object) -> Result<()> {
        let entries = object.borrow();
        for (idx, (name, value)) in entries.iter().enumerate() {
            if idx > 0 {
                self.write_separator()?;
            }
            let len = self.key.len();
            self.push_key(name);
            let result = self.visit(value);
            self.key.truncate(len);
            result?;
        }
        Ok(())
    }

    /// Extends the current key with a mapping entry name.
    ///
    /// - root key "user" becomes: `user`
    /// - second key "name" becomes: `user[name]`
    /// - third key "first" becomes: `user[name][first]`
    fn push_key(&mut self, name: &str) {
        if self.key.is_empty() {
            self.key.push_str(name);
        } else {
            self.key.push('[');
            self.key.push_str(name);
            self.key.push(']');
        }
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.written += bytes.len();
        Ok(())
    }

    fn write_separator(&mut self) -> Result<()> {
        self.write_raw(self.config.separator.as_bytes())
    }

    fn write_escaped(&mut self, text: &str) -> Result<()> {
        let escaped = self.config.escape.escape(text);
        self.writer.write_all(escaped.as_bytes())?;
        self.written += escaped.len();
        Ok(())
    }

    fn write_key(&mut self) -> Result<()> {
        let key = std::mem::take(&mut self.key);
        let result = self.write_escaped(&key);
        self.key = key;
        result?;
        self.write_raw(self.config.assigner.as_bytes())
    }

    fn write_value(&mut self, value: &str) -> Result<()> {
        self.write_key()?;
        self.write_escaped(value)
    }

    /// Writes `key=` for absent values; nothing at all when there is no key.
    fn write_unit(&mut self) -> Result<()> {
        if self.key.is_empty() {
            return Ok(());
        }
        self.write_key()
    }
}

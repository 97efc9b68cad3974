use std::io::Write;

use crate::de;
use crate::error::Result;
use crate::ser::{Encoding, Escape, Stringifier};
use crate::value::{Object, Value};

/// Configuration for stringifying and parsing.
///
/// Every call to [`Config::stringify`] walks the value with its own cycle
/// guard, so a `Config` can be shared freely between calls.
///
/// Parsing always splits on `&` and `=`; of the settings below it only uses
/// `max_depth`.
///
/// ## Nesting depth
///
/// `max_depth` bounds how many named `[key]` segments the parser nests below
/// a root key. This keeps maliciously deep keys from building arbitrarily
/// deep structures. Past the limit the rest of the key is kept as a literal
/// key, and a `max_depth` of 0 keeps every key flat.
///
/// Default value: `max_depth = 32`
///
/// ```
/// use nested_qs::Config;
///
/// let flat = Config::new().max_depth(0).parse("a[b][c]=1");
/// assert_eq!(flat.get("a[b][c]").unwrap().as_str(), Some("1"));
///
/// let shallow = Config::new().max_depth(1).parse("a[b][c]=1");
/// let b = shallow.get("a").unwrap().as_object().unwrap().get("b").unwrap();
/// assert_eq!(b.as_object().unwrap().get("[c]").unwrap().as_str(), Some("1"));
/// ```
///
/// ## Delimiters
///
/// `separator` joins `key=value` segments (default `&`) and `assigner` joins
/// a key to its value (default `=`).
///
/// ## Key prefix
///
/// `key_prefix` names the value being stringified. Keys of a mapping are
/// nested under it, and a scalar needs it to produce a meaningful segment.
///
/// ```
/// use nested_qs::{Config, Object, Value};
///
/// let filter: Object = [("tag", Value::from(vec!["a", "b"]))].into_iter().collect();
///
/// let config = Config::new().separator(";").assigner(":").key_prefix("filter");
/// assert_eq!(
///     config.stringify(&filter.into()).unwrap(),
///     "filter[tag][]:a;filter[tag][]:b"
/// );
/// ```
///
/// ## Escaping
///
/// Keys and values pass through an [`Escape`] implementation before being
/// written. The default is [`Encoding::Component`].
///
/// ```
/// use nested_qs::{Config, Encoding, Object};
///
/// let object: Object = [("a b", "c&d")].into_iter().collect();
/// let value = object.into();
///
/// assert_eq!(Config::new().stringify(&value).unwrap(), "a%20b=c%26d");
/// assert_eq!(
///     Config::new().escape(Encoding::Form).stringify(&value).unwrap(),
///     "a+b=c%26d"
/// );
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Config<'a, E = Encoding> {
    pub(crate) separator: &'a str,
    pub(crate) assigner: &'a str,
    pub(crate) key_prefix: &'a str,
    pub(crate) max_depth: usize,
    pub(crate) escape: E,
}

impl Default for Config<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Config<'static> {
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    pub const fn new() -> Self {
        Self {
            separator: "&",
            assigner: "=",
            key_prefix: "",
            max_depth: Self::DEFAULT_MAX_DEPTH,
            escape: Encoding::Component,
        }
    }
}

impl<'a, E: Escape> Config<'a, E> {
    /// Sets the text written between `key=value` segments. Default is `&`.
    pub fn separator(mut self, separator: &'a str) -> Self {
        self.separator = separator;
        self
    }

    /// Sets the text written between a key and its value. Default is `=`.
    pub fn assigner(mut self, assigner: &'a str) -> Self {
        self.assigner = assigner;
        self
    }

    /// Sets the key the stringified value is nested under. Default is empty.
    pub fn key_prefix(mut self, key_prefix: &'a str) -> Self {
        self.key_prefix = key_prefix;
        self
    }

    /// Sets the maximum nesting depth used when parsing. Default is 32.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Replaces the escaping function.
    pub fn escape<F: Escape>(self, escape: F) -> Config<'a, F> {
        Config {
            separator: self.separator,
            assigner: self.assigner,
            key_prefix: self.key_prefix,
            max_depth: self.max_depth,
            escape,
        }
    }

    /// Parses a querystring using this `Config`.
    pub fn parse(&self, input: &str) -> Object {
        self.parse_bytes(input.as_bytes())
    }

    /// Parses a querystring from bytes using this `Config`.
    ///
    /// Bytes that do not decode to valid UTF-8 are replaced with U+FFFD.
    pub fn parse_bytes(&self, input: &[u8]) -> Object {
        de::parse_with_depth(input, self.max_depth)
    }

    /// Stringifies a value using this `Config`.
    ///
    /// Fails with [`Error::CyclicReference`](crate::Error::CyclicReference)
    /// if a mapping contains itself; no partial output is returned.
    pub fn stringify(&self, value: &Value) -> Result<String> {
        // initialize the buffer with 128 bytes
        // this is a guess based on what `serde_json` does
        let mut buffer = Vec::with_capacity(128);
        self.stringify_to_writer(value, &mut buffer)?;
        String::from_utf8(buffer).map_err(crate::Error::from)
    }

    /// Stringifies a value into a writer using this `Config`.
    ///
    /// On error, segments written before the cycle was found may already
    /// have reached the writer.
    pub fn stringify_to_writer<W: Write>(&self, value: &Value, writer: &mut W) -> Result<()> {
        let mut stringifier = Stringifier::new(writer, self);
        stringifier.visit(value)
    }
}

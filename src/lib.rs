//! Nested querystrings with bracket keys.
//!
//! Querystrings are not formally defined and loosely take the form of
//! _nested_ urlencoded queries. This crate converts between a dynamic
//! [`Value`] tree and that flattened form:
//!
//! ```text
//! a[b][]=1&a[b][]=2&c=x   <->   {a: {b: ["1", "2"]}, c: "x"}
//! ```
//!
//! The syntax follows the bracket convention used by Node's classic
//! `querystring` helpers and Rack:
//!
//! - `a[b]=1` nests `b` inside `a`,
//! - `a[]=1&a[]=2` appends to a sequence,
//! - a plain key repeated (`a=1&a=2`) also collects a sequence,
//! - a key without a value (`flag`) is the empty string.
//!
//! ## Stringifying
//!
//! [`stringify`] walks a value depth-first. Booleans become `1`/`0`, absent
//! values become `key=`, empty sequences write nothing and empty mappings keep
//! their key (`key=`). Entries are joined with the separator even when they
//! wrote nothing, so `{a: [], b: 1}` becomes `&b=1`, which parses back to
//! `{b: "1"}`. A mapping that contains itself is reported as
//! [`Error::CyclicReference`]. Delimiters, the key prefix and escaping are set
//! through [`Config`].
//!
//! ## Parsing
//!
//! [`parse`] never fails and never coerces: every leaf is a string. Inputs with
//! odd or unbalanced brackets still produce a well-defined mapping.
//!
//! ## Usage
//!
//! ```
//! use nested_qs::{Object, Value};
//!
//! let address: Object = [("city", "Carrot City"), ("postcode", "12345")]
//!     .into_iter()
//!     .collect();
//! let params: Object = [
//!     ("id", Value::from(42)),
//!     ("name", Value::from("Acme")),
//!     ("address", Value::from(address)),
//!     ("user_ids", Value::from(vec![1, 2, 3, 4])),
//! ]
//! .into_iter()
//! .collect();
//!
//! let qs = nested_qs::stringify(&params.into()).unwrap();
//! assert_eq!(
//!     qs,
//!     "id=42&name=Acme&address[city]=Carrot%20City&address[postcode]=12345&\
//!      user_ids[]=1&user_ids[]=2&user_ids[]=3&user_ids[]=4"
//! );
//!
//! let parsed = nested_qs::parse(&qs);
//! assert_eq!(parsed.get("id"), Some(Value::from("42")));
//! assert_eq!(
//!     parsed.get("user_ids"),
//!     Some(Value::from(vec!["1", "2", "3", "4"]))
//! );
//! ```
//!
//! ## Features
//!
//! - `tracing`: emit `tracing` events when a cycle is found and when the
//!   parser discards or replaces a conflicting value.

mod config;
mod de;
mod error;
mod ser;
mod value;

#[doc(inline)]
pub use config::Config;
#[doc(inline)]
pub use de::{parse, parse_bytes};
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use ser::{Encoding, Escape, stringify, stringify_to_writer};
#[doc(inline)]
pub use value::{Map, Number, Object, Value};

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Percent-encoding applied to keys and values while stringifying.
///
/// The contract is a total function from text to text whose output is safe to
/// embed between the `=`, `&`, `[` and `]` delimiters. Numbers are rendered to
/// text before they are escaped.
///
/// Any `Fn(&str) -> String` is an `Escape`:
///
/// ```
/// use nested_qs::{Config, Object};
///
/// let object: Object = [("a", "x y")].into_iter().collect();
/// let config = Config::new().escape(|s: &str| s.to_uppercase());
/// assert_eq!(config.stringify(&object.into()).unwrap(), "A=X Y");
/// ```
pub trait Escape {
    fn escape<'v>(&self, input: &'v str) -> Cow<'v, str>;
}

impl<F> Escape for F
where
    F: Fn(&str) -> String,
{
    fn escape<'v>(&self, input: &'v str) -> Cow<'v, str> {
        Cow::Owned(self(input))
    }
}

/// The escaping schemes shipped with the crate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Encoding {
    /// `encodeURIComponent`, except that `[` and `]` are left as they are so
    /// that bracketed keys stay readable: `a[b][]=x%20y`.
    #[default]
    Component,
    /// Exactly `encodeURIComponent`: `a%5Bb%5D%5B%5D=x%20y`.
    Strict,
    /// `application/x-www-form-urlencoded`, with spaces written as `+`.
    Form,
}

/// As produced by `encodeURIComponent`: everything except ASCII
/// alphanumerics and `-_.!~*'()` is percent-encoded.
const URI_COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const BRACKETED_SET: &AsciiSet = &URI_COMPONENT_SET.remove(b'[').remove(b']');

/// As defined in https://url.spec.whatwg.org/#application-x-www-form-urlencoded-percent-encode-set
///
/// Space is removed here and written as `+` afterwards.
const FORM_URLENCODED_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b' ');

impl Escape for Encoding {
    fn escape<'v>(&self, input: &'v str) -> Cow<'v, str> {
        let set = match self {
            Encoding::Component => BRACKETED_SET,
            Encoding::Strict => URI_COMPONENT_SET,
            Encoding::Form => FORM_URLENCODED_SET,
        };
        let encoded: Cow<'v, str> = percent_encoding::utf8_percent_encode(input, set).into();
        if *self == Encoding::Form {
            replace_space(encoded)
        } else {
            encoded
        }
    }
}

fn replace_space(input: Cow<'_, str>) -> Cow<'_, str> {
    if input.contains(' ') {
        Cow::Owned(input.replace(' ', "+"))
    } else {
        input
    }
}

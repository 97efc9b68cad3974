use std::borrow::Cow;

#[inline(always)]
fn char_to_digit(c: u8) -> Option<u8> {
    char::from(c).to_digit(16).map(|d| d as u8)
}

fn decode_hex_pair(pair: Option<&[u8]>) -> Option<u8> {
    let &[h, l] = pair? else {
        return None;
    };
    Some(char_to_digit(h)? * 0x10 + char_to_digit(l)?)
}

/// Decodes a raw pair, applying the following:
/// - Replaces `+` with a space
/// - Decodes percent-encoded bytes
///
/// `+` is translated before escapes are decoded, so `%2B` yields a literal
/// `+`. A `%` that is not followed by two hex digits is kept as it is.
pub fn decode(input: &[u8]) -> Cow<'_, [u8]> {
    if !input.iter().any(|&b| b == b'+' || b == b'%') {
        return Cow::Borrowed(input);
    }

    let mut decoded = Vec::with_capacity(input.len());
    let mut idx = 0;
    while idx < input.len() {
        match input[idx] {
            b'+' => decoded.push(b' '),
            b'%' => {
                if let Some(byte) = decode_hex_pair(input.get(idx + 1..idx + 3)) {
                    decoded.push(byte);
                    idx += 3;
                    continue;
                }
                decoded.push(b'%');
            }
            b => decoded.push(b),
        }
        idx += 1;
    }
    Cow::Owned(decoded)
}

/// Decodes a raw pair into text. Invalid UTF-8 is replaced with U+FFFD.
pub fn decode_str(input: &[u8]) -> Cow<'_, str> {
    match decode(input) {
        Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes),
        Cow::Owned(bytes) => match String::from_utf8(bytes) {
            Ok(s) => Cow::Owned(s),
            Err(e) => Cow::Owned(String::from_utf8_lossy(e.as_bytes()).into_owned()),
        },
    }
}

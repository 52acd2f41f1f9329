//! Percent-encoding and internationalized-hostname transforms.
//!
//! Stateless conversions between Unicode text and transport-safe ASCII:
//! - Percent-escaping for single URL components and for non-ASCII bytes
//! - ACE (punycode) encoding and decoding of internationalized hostnames
//!
//! All functions are pure and total. Hostname encoding signals failure by
//! returning an empty string rather than an error; decoding returns its
//! input unchanged when there is nothing to decode.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters reserved by the generic URI grammar.
///
/// Every character in this set is escaped by [`encode_uri_component`] and
/// left untouched by [`encode_unicode_bytes`].
pub const RESERVED_CHARACTERS: &str = "!*'();:@&=+$,/?%#[]";

/// Everything except unreserved `A-Z a-z 0-9 - _ . ~` gets escaped when
/// encoding a single component. This covers the full reserved set above.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// ASCII passes through untouched; non-ASCII bytes are always escaped by
/// the percent-encoder regardless of the set.
const ASCII_TRANSPARENT: &AsciiSet = &AsciiSet::EMPTY;

/// Percent-encode a string for use as a single path, query, or fragment
/// component.
///
/// Escapes every reserved character (see [`RESERVED_CHARACTERS`]) as well
/// as anything else outside the unreserved set, using UTF-8 byte-wise
/// `%XX` escapes with uppercase hex. Never fails.
///
/// # Examples
///
/// ```
/// use pubiri::encode_uri_component;
///
/// assert_eq!(encode_uri_component("a/b?c"), "a%2Fb%3Fc");
/// assert_eq!(encode_uri_component("caf\u{e9}"), "caf%C3%A9");
/// ```
pub fn encode_uri_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// Percent-encode only the non-ASCII code points of a string.
///
/// ASCII characters — reserved characters like `/` and `?` included — pass
/// through unchanged; every code point above 0x7F is expanded to its UTF-8
/// byte sequence and each byte escaped `%XX` with uppercase hex. This is
/// the transform that turns an IRI path into its URI equivalent without
/// disturbing the component structure.
///
/// # Examples
///
/// ```
/// use pubiri::encode_unicode_bytes;
///
/// assert_eq!(encode_unicode_bytes("caf\u{e9}"), "caf%C3%A9");
/// assert_eq!(encode_unicode_bytes("/a?b#c"), "/a?b#c");
/// ```
pub fn encode_unicode_bytes(text: &str) -> String {
    utf8_percent_encode(text, ASCII_TRANSPARENT).to_string()
}

/// Reverse percent-escaping, reassembling escaped UTF-8 byte sequences
/// into Unicode text.
///
/// Malformed escape sequences (a `%` not followed by two hex digits) are
/// passed through literally; escaped bytes that do not form valid UTF-8
/// decode lossily. Never fails.
///
/// # Examples
///
/// ```
/// use pubiri::decode_percent_escapes;
///
/// assert_eq!(decode_percent_escapes("caf%C3%A9"), "caf\u{e9}");
/// assert_eq!(decode_percent_escapes("100%zz"), "100%zz");
/// ```
pub fn decode_percent_escapes(text: &str) -> String {
    percent_decode_str(text).decode_utf8_lossy().into_owned()
}

/// Convert a Unicode hostname to its ASCII-Compatible Encoding (punycode).
///
/// Returns an empty string when the conversion fails, such as a label
/// carrying invalid punycode — callers must check for emptiness before
/// using the result.
///
/// # Examples
///
/// ```
/// use pubiri::encode_international_hostname;
///
/// assert_eq!(encode_international_hostname("b\u{fc}cher.de"), "xn--bcher-kva.de");
/// assert_eq!(encode_international_hostname("xn--a.com"), "");
/// ```
pub fn encode_international_hostname(host: &str) -> String {
    idna::domain_to_ascii(host).unwrap_or_default()
}

/// Convert an ACE-encoded hostname back to Unicode.
///
/// Returns the input unchanged when it is not ACE-encoded or cannot be
/// decoded.
///
/// # Examples
///
/// ```
/// use pubiri::decode_international_hostname;
///
/// assert_eq!(decode_international_hostname("xn--bcher-kva.de"), "b\u{fc}cher.de");
/// assert_eq!(decode_international_hostname("example.com"), "example.com");
/// ```
pub fn decode_international_hostname(host: &str) -> String {
    let (unicode, result) = idna::domain_to_unicode(host);
    if result.is_ok() {
        unicode
    } else {
        host.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_encoding_escapes_reserved_set() {
        for ch in RESERVED_CHARACTERS.chars() {
            let encoded = encode_uri_component(&ch.to_string());
            assert_eq!(
                encoded,
                format!("%{:02X}", ch as u32),
                "reserved character {:?} should be escaped",
                ch
            );
        }
    }

    #[test]
    fn test_component_encoding_preserves_unreserved() {
        assert_eq!(encode_uri_component("AZaz09-_.~"), "AZaz09-_.~");
    }

    #[test]
    fn test_unicode_byte_encoding() {
        assert_eq!(encode_unicode_bytes("café"), "caf%C3%A9");
        // Reserved ASCII stays put, unlike encode_uri_component
        assert_eq!(encode_unicode_bytes("/OPS/ch?q=1#f"), "/OPS/ch?q=1#f");
        assert_eq!(encode_unicode_bytes("日本"), "%E6%97%A5%E6%9C%AC");
    }

    #[test]
    fn test_percent_decoding() {
        assert_eq!(decode_percent_escapes("caf%C3%A9"), "café");
        assert_eq!(decode_percent_escapes("a%2Fb"), "a/b");
        // Malformed escapes pass through literally
        assert_eq!(decode_percent_escapes("50%"), "50%");
        assert_eq!(decode_percent_escapes("%G1"), "%G1");
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let original = "chapitre déjà-vu";
        let encoded = encode_unicode_bytes(original);
        assert!(encoded.is_ascii());
        assert_eq!(decode_percent_escapes(&encoded), original);
    }

    #[test]
    fn test_hostname_encoding() {
        assert_eq!(encode_international_hostname("bücher.de"), "xn--bcher-kva.de");
        assert_eq!(encode_international_hostname("example.com"), "example.com");
        // Failure is signaled by emptiness, not an error
        assert_eq!(encode_international_hostname("xn--a.com"), "");
    }

    #[test]
    fn test_hostname_decoding() {
        assert_eq!(decode_international_hostname("xn--bcher-kva.de"), "bücher.de");
        // Plain ASCII hostnames come back unchanged
        assert_eq!(decode_international_hostname("example.com"), "example.com");
    }
}

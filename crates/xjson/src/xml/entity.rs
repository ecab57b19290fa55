//! Entity decoding for text and attribute values

use std::borrow::Cow;

/// Entities resolved by [`decode_entities`], in application order.
///
/// `&amp;` follows `&lt;` and `&gt;` so an escaped `&amp;lt;` comes out as
/// the literal `&lt;` instead of `<`.
pub const ENTITIES: [(&str, &str); 5] = [
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
    ("&quot;", "\""),
    ("&apos;", "'"),
];

/// Replace the five predefined entities, one pass per entity in
/// [`ENTITIES`] order.
///
/// Numeric character references and any other entity are left as written.
pub fn decode_entities(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut decoded = Cow::Borrowed(input);
    for (entity, replacement) in ENTITIES {
        if decoded.contains(entity) {
            decoded = Cow::Owned(decoded.replace(entity, replacement));
        }
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(decode_entities("plain text"), Cow::Borrowed("plain text")));
    }

    #[test]
    fn test_decode_all_predefined() {
        assert_eq!(
            decode_entities("&lt;a&gt; &amp; &quot;b&quot; &apos;c&apos;"),
            "<a> & \"b\" 'c'"
        );
    }

    #[test]
    fn test_escaped_lt_stays_escaped() {
        assert_eq!(decode_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_entities("&amp;gt;"), "&gt;");
        assert_eq!(decode_entities("&amp;amp;"), "&amp;");
    }

    #[test]
    fn test_later_entities_see_decoded_ampersand() {
        // &amp; is resolved before &quot; and &apos;
        assert_eq!(decode_entities("&amp;quot;"), "\"");
        assert_eq!(decode_entities("&amp;apos;"), "'");
    }

    #[test]
    fn test_unknown_entities_pass_through() {
        assert_eq!(decode_entities("&#60; &#x3C; &nbsp; & alone"), "&#60; &#x3C; &nbsp; & alone");
    }
}

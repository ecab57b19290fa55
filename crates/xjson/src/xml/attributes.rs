//! Attribute extraction from the inside of a start tag

use crate::cursor::Cursor;
use crate::value::Map;
use crate::xml::entity::decode_entities;
use crate::xml::is_name_byte;

/// Prefix that keeps attribute keys apart from child element keys
pub const ATTRIBUTE_PREFIX: &str = "_";

/// Parse every `name="value"` pair in `raw` into a map keyed `_name`.
///
/// Whitespace is allowed around `=`. Values are entity-decoded and may hold
/// anything but a double quote. Anything that does not fit the pattern is
/// skipped, and a repeated name overwrites the earlier value.
pub fn parse_attributes(raw: &str) -> Map {
    let mut attrs = Map::new();
    let mut cursor = Cursor::new(raw.as_bytes());

    while !cursor.is_eof() {
        let name_start = cursor.pos();
        if cursor.eat_while(is_name_byte) == 0 {
            cursor.advance();
            continue;
        }
        let Some(name) = raw.get(name_start..cursor.pos()) else {
            break;
        };

        // a failed pair resumes where it failed: no suffix of the name can do better
        cursor.skip_whitespace();
        if !cursor.consume(b'=') {
            continue;
        }
        cursor.skip_whitespace();
        if !cursor.consume(b'"') {
            continue;
        }

        // an unterminated value leaves no quote for any later pair
        let value_start = cursor.pos();
        let Some(value_end) = cursor.find_byte(b'"') else {
            break;
        };
        cursor.seek(value_end + 1);
        if let Some(value) = raw.get(value_start..value_end) {
            attrs.insert(
                format!("{ATTRIBUTE_PREFIX}{name}"),
                decode_entities(value).into_owned(),
            );
        }
    }

    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Node;

    #[test]
    fn test_simple_attributes() {
        let attrs = parse_attributes(r#" id="1" name="test""#);
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs["_id"], Node::from("1"));
        assert_eq!(attrs["_name"], Node::from("test"));
        let keys: Vec<_> = attrs.keys().collect();
        assert_eq!(keys, vec!["_id", "_name"]);
    }

    #[test]
    fn test_whitespace_around_equals() {
        let attrs = parse_attributes("a = \"1\"\n\tb=\n\"2\"");
        assert_eq!(attrs["_a"], Node::from("1"));
        assert_eq!(attrs["_b"], Node::from("2"));
    }

    #[test]
    fn test_prefixed_and_hyphenated_names() {
        let attrs = parse_attributes(r#"xml:lang="en" data-x_1="y""#);
        assert_eq!(attrs["_xml:lang"], Node::from("en"));
        assert_eq!(attrs["_data-x_1"], Node::from("y"));
    }

    #[test]
    fn test_values_are_decoded() {
        let attrs = parse_attributes(r#"q="a &lt; b &amp;&amp; c""#);
        assert_eq!(attrs["_q"], Node::from("a < b && c"));
    }

    #[test]
    fn test_value_may_hold_markup_and_newlines() {
        let attrs = parse_attributes("v=\"x > y\nz\" w='1'");
        assert_eq!(attrs["_v"], Node::from("x > y\nz"));
        assert!(!attrs.contains_key("_w"));
    }

    #[test]
    fn test_malformed_pairs_are_skipped() {
        let attrs = parse_attributes(r#"checked bare=1 ok="yes" broken="never"#);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs["_ok"], Node::from("yes"));
    }

    #[test]
    fn test_empty_value_and_repeated_name() {
        let attrs = parse_attributes(r#"a="" a="second""#);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs["_a"], Node::from("second"));
    }

    #[test]
    fn test_name_after_bare_word() {
        let attrs = parse_attributes(r#"disabled id="3""#);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs["_id"], Node::from("3"));
    }

    #[test]
    fn test_long_bare_name_is_skipped() {
        let raw = format!("{} k=\"v\"", "n".repeat(100_000));
        let attrs = parse_attributes(&raw);
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs["_k"], Node::from("v"));
    }

    #[test]
    fn test_no_attributes() {
        assert!(parse_attributes("").is_empty());
        assert!(parse_attributes("   /").is_empty());
    }
}

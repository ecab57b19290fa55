//! XML to tree conversion

pub mod attributes;
pub mod entity;
pub mod parser;
pub mod preprocess;

pub use attributes::{parse_attributes, ATTRIBUTE_PREFIX};
pub use entity::{decode_entities, ENTITIES};
pub use parser::Parser;
pub use preprocess::preprocess;

/// Bytes allowed in tag and attribute names: ASCII word characters, `:` and `-`
pub(crate) fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b':' | b'-')
}

//! xjson - XML to JSON-shaped tree conversion
//!
//! Elements become map fields, attributes become `_`-prefixed fields, and a
//! tag repeated under one parent becomes a list.
//!
//! # Quick Start
//!
//! ```
//! use xjson::{convert, json};
//! # fn main() -> Result<(), xjson::Error> {
//! let node = convert(r#"<r><i id="1">a</i><i>b</i></r>"#)?;
//! assert_eq!(json::to_string(&node), r#"{"r":{"i":[{"_id":"1","i":"a"},"b"]}}"#);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

use tracing::{debug, instrument};

pub mod config;
pub use config::Config;

pub mod cursor;

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result};

pub mod json;

pub mod value;
pub use value::{List, Map, Node};

pub mod xml;
pub use xml::{decode_entities, parse_attributes, preprocess, Parser};

/// Convert XML text with the default limits
pub fn convert(input: &str) -> Result<Node> {
    convert_with_config(input, Config::default())
}

/// Convert XML bytes, which must be UTF-8, with the default limits
pub fn convert_bytes(bytes: &[u8]) -> Result<Node> {
    convert_bytes_with_config(bytes, Config::default())
}

/// Convert XML bytes, which must be UTF-8, with custom limits
pub fn convert_bytes_with_config(bytes: &[u8], config: Config) -> Result<Node> {
    let input = std::str::from_utf8(bytes).map_err(|err| {
        let valid = bytes.get(..err.valid_up_to()).unwrap_or_default();
        Error::with_message(
            ErrorKind::InvalidUtf8,
            Pos::locate(std::str::from_utf8(valid).unwrap_or_default(), err.valid_up_to()),
            format!("invalid utf-8 after byte {}", err.valid_up_to()),
        )
    })?;
    convert_with_config(input, config)
}

/// Convert XML text with custom limits
///
/// The size limit applies to `input` as given. Depth errors report positions
/// in the text left after the declaration and comments are removed.
#[instrument(level = "debug", skip_all, fields(len = input.len()))]
pub fn convert_with_config(input: &str, config: Config) -> Result<Node> {
    if config.size_exceeded(input.len()) {
        return Err(Error::at(
            ErrorKind::MaxSizeExceeded {
                max: config.max_size,
            },
            input,
            config.max_size,
        ));
    }

    let text = preprocess(input);
    debug!(
        removed = input.len().saturating_sub(text.len()),
        "stripped prologue and comments"
    );

    let node = Parser::with_config(&text, config).parse()?;
    debug!(root_map = node.is_map(), "conversion finished");
    Ok(node)
}

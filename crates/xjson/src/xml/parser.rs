//! Recursive tag matcher

use std::collections::HashMap;

use tracing::trace;

use crate::config::Config;
use crate::cursor::Cursor;
use crate::error::{Error, ErrorKind, Result};
use crate::value::{Map, Node};
use crate::xml::attributes::parse_attributes;
use crate::xml::entity::decode_entities;
use crate::xml::is_name_byte;

/// What a fragment of element content resolves to
#[derive(Debug)]
enum Fragment {
    Text(String),
    Fields(Map),
}

impl From<Fragment> for Node {
    fn from(fragment: Fragment) -> Self {
        match fragment {
            Fragment::Text(text) => Self::Text(text),
            Fragment::Fields(map) => Self::Map(map),
        }
    }
}

/// An element located by the scanner
#[derive(Debug)]
struct Element<'a> {
    name: &'a str,
    attrs: &'a str,
    /// Byte range of the inner content; `None` for `<name/>`
    content: Option<(usize, usize)>,
    start: usize,
    end: usize,
}

/// A start tag recorded by [`TagIndex`]
#[derive(Debug, Clone, Copy)]
struct StartTag<'a> {
    name: &'a str,
    /// Offset of the `>` that ends the tag
    gt: usize,
    self_closing: bool,
}

/// Start tags and their closing tags, found in one pass over the source
///
/// A start tag pairs with the `</name>` that brings the count of open
/// same-name tags after it back to zero. Once a tag of some name is seen,
/// nothing up to its end is read as another tag of that name.
#[derive(Debug, Default)]
struct TagIndex<'a> {
    /// Keyed by the offset of the `<`
    starts: HashMap<usize, StartTag<'a>>,
    /// `(name, content start)` to the closing tag's start and end offsets
    closes: HashMap<(&'a str, usize), (usize, usize)>,
}

impl<'a> TagIndex<'a> {
    fn build(source: &'a str) -> Self {
        let bytes = source.as_bytes();
        let mut index = Self::default();
        let mut open: HashMap<&'a str, Vec<usize>> = HashMap::new();
        let mut skip_until: HashMap<&'a str, usize> = HashMap::new();
        let mut next_gt = NextByte::new(bytes, b'>');
        let mut cursor = Cursor::new(bytes);

        while let Some(lt) = cursor.find_byte(b'<') {
            cursor.seek(lt);
            cursor.advance();
            let closing = cursor.consume(b'/');

            let name_start = cursor.pos();
            if cursor.eat_while(is_name_byte) == 0 {
                continue;
            }
            let name_end = cursor.pos();
            let Some(name) = source.get(name_start..name_end) else {
                continue;
            };
            let counted = skip_until.get(name).is_none_or(|&until| lt >= until);

            if closing {
                cursor.skip_whitespace();
                if !cursor.consume(b'>') || !counted {
                    continue;
                }
                let close_end = cursor.pos();
                if let Some(content_start) = open.get_mut(name).and_then(Vec::pop) {
                    index.closes.insert((name, content_start), (lt, close_end));
                }
                skip_until.insert(name, close_end);
                continue;
            }

            if !ends_name(cursor.current()) {
                continue;
            }
            let Some(gt) = next_gt.find(name_end) else {
                continue;
            };
            let self_closing = gt > name_end && bytes.get(gt - 1) == Some(&b'/');
            index.starts.insert(
                lt,
                StartTag {
                    name,
                    gt,
                    self_closing,
                },
            );
            if counted {
                if !self_closing {
                    open.entry(name).or_default().push(gt + 1);
                }
                skip_until.insert(name, gt + 1);
            }
        }

        index
    }
}

/// Next occurrence of a byte, for lookups at non-decreasing offsets
struct NextByte<'a> {
    bytes: &'a [u8],
    byte: u8,
    found: Option<usize>,
    exhausted: bool,
}

impl<'a> NextByte<'a> {
    const fn new(bytes: &'a [u8], byte: u8) -> Self {
        Self {
            bytes,
            byte,
            found: None,
            exhausted: false,
        }
    }

    fn find(&mut self, from: usize) -> Option<usize> {
        if let Some(at) = self.found.filter(|&at| at >= from) {
            return Some(at);
        }
        if self.exhausted {
            return None;
        }
        let byte = self.byte;
        self.found = self
            .bytes
            .get(from..)
            .and_then(|rest| rest.iter().position(|&b| b == byte))
            .map(|i| from + i);
        self.exhausted = self.found.is_none();
        self.found
    }
}

/// Tag matcher over preprocessed text
///
/// Positions in errors are byte offsets into the text the parser was built
/// with.
#[derive(Debug)]
pub struct Parser<'a> {
    source: &'a str,
    config: Config,
    index: TagIndex<'a>,
}

impl<'a> Parser<'a> {
    /// Create a new parser with default configuration
    pub fn new(source: &'a str) -> Self {
        Self::with_config(source, Config::default())
    }

    /// Create a new parser with custom configuration
    pub fn with_config(source: &'a str, config: Config) -> Self {
        Self {
            source,
            config,
            index: TagIndex::build(source),
        }
    }

    /// Convert the whole source into a node
    pub fn parse(&self) -> Result<Node> {
        self.parse_fragment(0, self.source.len(), 0).map(Node::from)
    }

    fn parse_fragment(&self, start: usize, end: usize, depth: u16) -> Result<Fragment> {
        let mut cursor = Cursor::window(self.source.as_bytes(), start, end);
        let mut fields = Map::new();
        let mut last = cursor.pos();

        while let Some(element) = self.next_element(&mut cursor) {
            if let Some(text) = self.significant_text(last, element.start) {
                trace!(offset = last, "text beside elements, fragment collapses to text");
                return Ok(Fragment::Text(decode_entities(text).into_owned()));
            }
            self.attach_element(&mut fields, &element, depth)?;
            last = element.end;
        }

        match self.significant_text(last, cursor.end()) {
            Some(text) => Ok(Fragment::Text(decode_entities(text).into_owned())),
            None => Ok(Fragment::Fields(fields)),
        }
    }

    fn attach_element(&self, parent: &mut Map, element: &Element<'a>, depth: u16) -> Result<()> {
        let depth = depth.saturating_add(1);
        if self.config.depth_exceeded(depth) {
            return Err(Error::at(
                ErrorKind::MaxDepthExceeded {
                    max: self.config.max_depth,
                },
                self.source,
                element.start,
            ));
        }
        trace!(name = element.name, depth, "matched element");

        let mut node = parse_attributes(element.attrs);
        let value = match element.content {
            None => Node::Map(node),
            Some((start, end)) => match self.parse_fragment(start, end, depth)? {
                Fragment::Text(text) if node.is_empty() => Node::Text(text),
                Fragment::Text(text) => {
                    node.insert(element.name, text);
                    Node::Map(node)
                }
                Fragment::Fields(fields) => {
                    node.extend(fields);
                    Node::Map(node)
                }
            },
        };

        parent.attach(element.name, value);
        Ok(())
    }

    /// Find the next complete element at or after the cursor, leaving the
    /// cursor just past it. A `<` that starts no element is stepped over.
    fn next_element(&self, cursor: &mut Cursor<'a>) -> Option<Element<'a>> {
        while let Some(lt) = cursor.find_byte(b'<') {
            if let Some(element) = self.element_at(lt, cursor.end()) {
                cursor.seek(element.end);
                return Some(element);
            }
            cursor.seek(lt);
            cursor.advance();
        }
        cursor.seek(cursor.end());
        None
    }

    /// The element starting at `start`, if it ends before `end`
    fn element_at(&self, start: usize, end: usize) -> Option<Element<'a>> {
        let tag = self.index.starts.get(&start)?;
        if tag.gt >= end {
            return None;
        }
        let name_end = start + 1 + tag.name.len();

        if tag.self_closing {
            return Some(Element {
                name: tag.name,
                attrs: self.source.get(name_end..tag.gt - 1)?,
                content: None,
                start,
                end: tag.gt + 1,
            });
        }

        let content_start = tag.gt + 1;
        let &(content_end, close_end) = self.index.closes.get(&(tag.name, content_start))?;
        if close_end > end {
            return None;
        }
        Some(Element {
            name: tag.name,
            attrs: self.source.get(name_end..tag.gt)?,
            content: Some((content_start, content_end)),
            start,
            end: close_end,
        })
    }

    fn significant_text(&self, start: usize, end: usize) -> Option<&'a str> {
        let text = self.source.get(start..end)?.trim();
        (!text.is_empty()).then_some(text)
    }
}

fn ends_name(b: Option<u8>) -> bool {
    matches!(b, Some(b) if b.is_ascii_whitespace() || b == b'/' || b == b'>')
}

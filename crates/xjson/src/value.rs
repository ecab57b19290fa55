//! Tree types produced by conversion

use indexmap::map::{Entry, IntoIter, Iter, Keys};
use indexmap::IndexMap;
use std::ops::Index;

/// A converted document node
///
/// Elements that only hold text become [`Node::Text`], elements with
/// attributes or children become [`Node::Map`], and a tag repeated under one
/// parent is promoted to a [`Node::List`] of its occurrences.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Node {
    /// Decoded text
    Text(String),
    /// Attributes (`_`-prefixed) and child elements, in document order
    Map(Map),
    /// Repeated sibling elements, in document order
    List(List),
}

impl Default for Node {
    fn default() -> Self {
        Self::Map(Map::new())
    }
}

impl Node {
    /// Returns true if this node is text
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Returns true if this node is a map
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Returns true if this node is a list
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Returns the text if this is a text node, None otherwise
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the map if this is a map, None otherwise
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the list if this is a list, None otherwise
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// Looks up a field when this node is a map
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_map().and_then(|map| map.get(key))
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Map> for Node {
    fn from(value: Map) -> Self {
        Self::Map(value)
    }
}

impl From<List> for Node {
    fn from(value: List) -> Self {
        Self::List(value)
    }
}

impl From<Vec<Node>> for Node {
    fn from(values: Vec<Node>) -> Self {
        Self::List(List(values))
    }
}

/// An order-preserving map of field names to nodes
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Map(pub(crate) IndexMap<String, Node>);

impl Map {
    /// Creates a new empty map
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Returns the number of fields
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the map has no fields
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a reference to the node stored under the key
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    /// Returns true if the map contains the specified key
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Sets a field, overwriting any previous value
    ///
    /// An overwritten key keeps the position of its first insertion.
    /// Returns the previous value if the key already existed.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        self.0.insert(key.into(), value.into())
    }

    /// Attaches a child element value under `name`.
    ///
    /// The first occurrence is stored as is, the second turns the field into
    /// a two-element list, and later occurrences append to that list.
    pub fn attach(&mut self, name: &str, value: impl Into<Node>) {
        let value = value.into();
        match self.0.entry(name.to_owned()) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                Node::List(list) => list.push(value),
                existing => {
                    let first = std::mem::take(existing);
                    *existing = Node::List(List(vec![first, value]));
                }
            },
        }
    }

    /// Copies every field of `other` into this map, later values winning
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Returns an iterator over the keys
    pub fn keys(&self) -> Keys<'_, String, Node> {
        self.0.keys()
    }

    /// Returns an iterator over key-value pairs
    pub fn iter(&self) -> Iter<'_, String, Node> {
        self.0.iter()
    }
}

impl Index<&str> for Map {
    type Output = Node;

    #[allow(clippy::indexing_slicing)]
    fn index(&self, key: &str) -> &Self::Output {
        &self.0[key]
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a Node);
    type IntoIter = Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Map {
    type Item = (String, Node);
    type IntoIter = IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, Node)> for Map {
    fn from_iter<I: IntoIterator<Item = (String, Node)>>(iter: I) -> Self {
        Self(IndexMap::from_iter(iter))
    }
}

/// Occurrences of a repeated sibling element
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct List(pub(crate) Vec<Node>);

impl List {
    /// Creates a new empty list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the number of elements in the list
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list contains no elements
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a reference to the element at the given index
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.0.get(index)
    }

    /// Appends an element to the end of the list
    pub fn push(&mut self, value: impl Into<Node>) {
        self.0.push(value.into());
    }

    /// Returns an iterator over the list
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.0.iter()
    }
}

impl Index<usize> for List {
    type Output = Node;

    #[allow(clippy::indexing_slicing)]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for List {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Vec<Node>> for List {
    fn from(values: Vec<Node>) -> Self {
        Self(values)
    }
}

impl FromIterator<Node> for List {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self(Vec::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_is_methods() {
        assert!(Node::from("x").is_text());
        assert!(Node::default().is_map());
        assert!(Node::from(List::new()).is_list());
        assert!(!Node::from("x").is_map());
    }

    #[test]
    fn test_node_as_methods() {
        assert_eq!(Node::from("hello").as_text(), Some("hello"));
        assert_eq!(Node::default().as_text(), None);
        assert!(Node::default().as_map().is_some_and(Map::is_empty));
        assert_eq!(Node::from("x").as_list(), None);
    }

    #[test]
    fn test_attach_single_stays_scalar() {
        let mut map = Map::new();
        map.attach("item", "1");
        assert_eq!(map.get("item"), Some(&Node::from("1")));
    }

    #[test]
    fn test_attach_promotes_and_appends() {
        let mut map = Map::new();
        map.attach("item", "1");
        map.attach("item", "2");
        assert_eq!(
            map["item"],
            Node::from(vec![Node::from("1"), Node::from("2")])
        );

        map.attach("item", "3");
        let list = map["item"].as_list().map(List::len);
        assert_eq!(list, Some(3));
        assert_eq!(map["item"].as_list().map(|l| l[2].clone()), Some(Node::from("3")));
    }

    #[test]
    fn test_attach_promotes_maps_without_nesting_lists() {
        let mut first = Map::new();
        first.insert("_id", "1");
        let mut map = Map::new();
        map.attach("row", first.clone());
        map.attach("row", Map::new());
        map.attach("row", "tail");

        let rows = map["row"].as_list().cloned().unwrap_or_default();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], Node::Map(first));
        assert!(rows.iter().all(|row| !row.is_list()));
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut map = Map::new();
        map.insert("_a", "attr");
        map.insert("b", "child");
        let previous = map.insert("_a", "later");
        assert_eq!(previous, Some(Node::from("attr")));
        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["_a", "b"]);
        assert_eq!(map["_a"], Node::from("later"));
    }

    #[test]
    fn test_extend_keeps_order_and_overwrites() {
        let mut attrs = Map::new();
        attrs.insert("_x", "1");
        attrs.insert("y", "attr");
        let mut children = Map::new();
        children.insert("y", "element");
        children.insert("z", "2");

        attrs.extend(children);
        let keys: Vec<_> = attrs.keys().cloned().collect();
        assert_eq!(keys, vec!["_x", "y", "z"]);
        assert_eq!(attrs["y"], Node::from("element"));
    }

    #[test]
    fn test_node_get() {
        let mut map = Map::new();
        map.insert("a", "1");
        let node = Node::from(map);
        assert_eq!(node.get("a"), Some(&Node::from("1")));
        assert_eq!(node.get("b"), None);
        assert_eq!(Node::from("text").get("a"), None);
    }
}

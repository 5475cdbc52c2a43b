//! Order-preserving JSON tree for the table and chart loaders.
//!
//! `serde_json::Value` folds repeated object keys into the last one. The
//! loaders must see every key as written so repeats can be rejected, so
//! objects here keep all `(key, value)` pairs in file order.

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Node>),
    Object(Vec<(String, Node)>),
}

pub(crate) fn parse(json: &str) -> Result<Node, serde_json::Error> {
    serde_json::from_str(json)
}

impl Node {
    pub fn as_object(&self) -> Option<&[(String, Node)]> {
        match self {
            Node::Object(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Every value stored under `key`, in file order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.as_object()
            .unwrap_or_default()
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => write!(f, "null"),
            Node::Bool(b) => write!(f, "{}", b),
            Node::Number(n) => write!(f, "{}", n),
            Node::String(s) => write!(f, "{:?}", s),
            Node::Array(_) => write!(f, "[..]"),
            Node::Object(_) => write!(f, "{{..}}"),
        }
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Node, E> {
        Ok(Node::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Node, E> {
        Ok(Node::Number(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Node, E> {
        Ok(Node::Number(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Node, E> {
        Ok(Node::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Node, E> {
        Ok(Node::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Node, E> {
        Ok(Node::String(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Node::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
        let mut entries = Vec::new();
        while let Some((key, value)) = map.next_entry::<String, Node>()? {
            entries.push((key, value));
        }
        Ok(Node::Object(entries))
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Node, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_keys_are_kept_in_order() {
        let node = parse(r#"{"Sun": "ARIES", "Moon": 12.5, "Sun": "LEO"}"#).unwrap();
        let entries = node.as_object().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[2], ("Sun".to_string(), Node::String("LEO".to_string())));
        assert_eq!(node.get_all("Sun").count(), 2);
        assert_eq!(entries[1].1.as_f64(), Some(12.5));
    }

    #[test]
    fn test_nested_values() {
        let node = parse(r#"{"animals": [{"ANIMAL": "Wolf", "ANIMAL": "Bear"}, null, true]}"#).unwrap();
        let animals = node.get_all("animals").next().and_then(Node::as_array).unwrap();
        assert_eq!(animals[0].get_all("ANIMAL").count(), 2);
        assert_eq!(animals[1], Node::Null);
        assert_eq!(animals[2].to_string(), "true");
    }
}

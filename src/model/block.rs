use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque, client-generated identifier for a [`Block`].
///
/// Ids are never reused: the default generator draws a fresh UUID v4 for every
/// block, including duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub String);

impl BlockId {
    /// Draws a new random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of block variants the editor knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Section,
    Columns,
    Heading,
    Text,
    Image,
    Button,
    Hero,
    Pricing,
    Spacer,
    Divider,
}

impl BlockType {
    /// Every variant, in block-library order.
    pub const ALL: [BlockType; 10] = [
        BlockType::Section,
        BlockType::Columns,
        BlockType::Heading,
        BlockType::Text,
        BlockType::Image,
        BlockType::Button,
        BlockType::Hero,
        BlockType::Pricing,
        BlockType::Spacer,
        BlockType::Divider,
    ];

    /// The wire tag (`"heading"`, `"pricing"`, ...).
    pub fn tag(self) -> &'static str {
        match self {
            BlockType::Section => "section",
            BlockType::Columns => "columns",
            BlockType::Heading => "heading",
            BlockType::Text => "text",
            BlockType::Image => "image",
            BlockType::Button => "button",
            BlockType::Hero => "hero",
            BlockType::Pricing => "pricing",
            BlockType::Spacer => "spacer",
            BlockType::Divider => "divider",
        }
    }

    /// Only container types carry nested blocks.
    pub fn is_container(self) -> bool {
        matches!(self, BlockType::Section | BlockType::Columns)
    }
}

impl Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Returned when a tag names no known block type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown block type: {0}")]
pub struct UnknownBlockType(pub String);

impl FromStr for BlockType {
    type Err = UnknownBlockType;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| UnknownBlockType(tag.to_string()))
    }
}

/// A primitive property value. Colors are stored as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropValue {
    Number(f64),
    Text(String),
}

impl PropValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropValue::Text(text) => Some(text),
            PropValue::Number(_) => None,
        }
    }

    /// False for NaN and infinite numbers, which JSON cannot carry.
    pub fn is_finite(&self) -> bool {
        match self {
            PropValue::Number(n) => n.is_finite(),
            PropValue::Text(_) => true,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            PropValue::Number(n) => Some(*n),
            PropValue::Text(_) => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(text: &str) -> Self {
        PropValue::Text(text.to_string())
    }
}

impl From<String> for PropValue {
    fn from(text: String) -> Self {
        PropValue::Text(text)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Number(n)
    }
}

impl Display for PropValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropValue::Number(n) => write!(f, "{}", n),
            PropValue::Text(text) => f.write_str(text),
        }
    }
}

/// Named block properties. Ordered so that serialized documents are stable.
pub type Props = BTreeMap<String, PropValue>;

/// Builds a [`Props`] map from `(name, value)` pairs.
pub fn props<K, V, I>(pairs: I) -> Props
where
    K: Into<String>,
    V: Into<PropValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.into(), value.into()))
        .collect()
}

/// One visual element of a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub kind: BlockType,
    #[serde(default)]
    pub props: Props,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
}

impl Block {
    /// Visits this block and all nested blocks, depth first.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Block)) {
        visit(self);
        for child in self.children.iter().flatten() {
            child.walk(visit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_block_type_parses_every_tag() {
        for kind in BlockType::ALL {
            assert_eq!(kind.tag().parse::<BlockType>(), Ok(kind));
        }
        assert!("carousel".parse::<BlockType>().is_err());
    }

    #[test]
    fn test_block_wire_shape() {
        let block = Block {
            id: BlockId::from("b1"),
            kind: BlockType::Heading,
            props: props([("heading", PropValue::from("Hi")), ("fontSize", 32.0.into())]),
            children: None,
        };

        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "b1",
                "type": "heading",
                "props": { "fontSize": 32.0, "heading": "Hi" }
            })
        );

        let back: Block = serde_json::from_value(value).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_walk_visits_nested_blocks() {
        let leaf = Block {
            id: BlockId::from("leaf"),
            kind: BlockType::Text,
            props: Props::new(),
            children: None,
        };
        let root = Block {
            id: BlockId::from("root"),
            kind: BlockType::Section,
            props: Props::new(),
            children: Some(vec![leaf]),
        };

        let mut seen = Vec::new();
        root.walk(&mut |b| seen.push(b.id.as_str()));
        assert_eq!(seen, vec!["root", "leaf"]);
    }
}

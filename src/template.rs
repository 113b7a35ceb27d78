//! # Block Library
//!
//! Fixed mapping from a [`BlockType`] to the default shape of a new block.
//!
//! Every call builds a brand new [`BlockTemplate`]: no two instantiations share
//! any data, so editing one block can never leak into a sibling's defaults.

use crate::model::{props, Block, BlockId, BlockType, PropValue, Props};

/// A block as produced by the library, before it has been given an id.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockTemplate {
    pub kind: BlockType,
    pub props: Props,
    pub children: Option<Vec<Block>>,
}

impl BlockTemplate {
    /// Attaches an identity, turning the template into a placeable block.
    pub fn into_block(self, id: BlockId) -> Block {
        Block {
            id,
            kind: self.kind,
            props: self.props,
            children: self.children,
        }
    }
}

/// Returns the canonical defaults for `kind`.
pub fn instantiate(kind: BlockType) -> BlockTemplate {
    let text = |s: &str| PropValue::from(s);
    let num = PropValue::Number;

    let props = match kind {
        BlockType::Section => props([("backgroundColor", text("#ffffff")), ("padding", num(40.0))]),
        BlockType::Columns => props([("columns", num(2.0)), ("gap", num(24.0))]),
        BlockType::Heading => props([
            ("heading", text("Your heading")),
            ("fontSize", num(32.0)),
            ("textColor", text("#111827")),
        ]),
        BlockType::Text => props([
            ("content", text("Write something here.")),
            ("fontSize", num(16.0)),
            ("textColor", text("#374151")),
        ]),
        BlockType::Image => props([
            ("src", text("https://placehold.co/800x400")),
            ("alt", text("Image")),
            ("width", num(100.0)),
        ]),
        BlockType::Button => props([
            ("label", text("Get started")),
            ("href", text("#")),
            ("backgroundColor", text("#2563eb")),
            ("textColor", text("#ffffff")),
        ]),
        BlockType::Hero => props([
            ("title", text("Grow your business in Israel")),
            ("subtitle", text("We help companies enter the Israeli market.")),
            ("backgroundImage", text("")),
            ("buttonText", text("Contact us")),
            ("buttonLink", text("#contact")),
        ]),
        BlockType::Pricing => props([
            ("title", text("Starter")),
            ("price", text("€490")),
            ("features", text("Market study\nPartner introductions\nEmail support")),
        ]),
        BlockType::Spacer => props([("height", num(40.0))]),
        BlockType::Divider => props([("color", text("#e5e7eb")), ("thickness", num(1.0))]),
    };

    let children = kind.is_container().then(Vec::new);

    BlockTemplate {
        kind,
        props,
        children,
    }
}

/// Looks up a template by its wire tag. Unknown tags produce no template.
pub fn instantiate_tag(tag: &str) -> Option<BlockTemplate> {
    tag.parse::<BlockType>().ok().map(instantiate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::panel::fields_for;

    #[test]
    fn test_every_type_has_a_template() {
        for kind in BlockType::ALL {
            let template = instantiate(kind);
            assert_eq!(template.kind, kind);
            assert_eq!(template.children.is_some(), kind.is_container());
        }
    }

    #[test]
    fn test_defaults_match_declared_fields() {
        for kind in BlockType::ALL {
            let template = instantiate(kind);
            let declared: Vec<&str> = fields_for(kind).iter().map(|f| f.name).collect();
            let mut present: Vec<&str> = template.props.keys().map(String::as_str).collect();
            let mut expected = declared.clone();
            present.sort_unstable();
            expected.sort_unstable();
            assert_eq!(present, expected, "defaults for {kind}");
        }
    }

    #[test]
    fn test_instances_do_not_share_props() {
        let mut first = instantiate(BlockType::Heading);
        let second = instantiate(BlockType::Heading);

        first
            .props
            .insert("heading".to_string(), PropValue::from("Changed"));

        assert_eq!(
            second.props.get("heading"),
            Some(&PropValue::from("Your heading"))
        );
        assert_ne!(first.props, second.props);
    }

    #[test]
    fn test_instances_do_not_share_children() {
        let mut first = instantiate(BlockType::Section);
        let second = instantiate(BlockType::Section);

        if let Some(children) = first.children.as_mut() {
            children.push(instantiate(BlockType::Text).into_block(BlockId::from("t1")));
        }

        assert_eq!(second.children, Some(Vec::new()));
    }

    #[test]
    fn test_unknown_tag_yields_nothing() {
        assert!(instantiate_tag("carousel").is_none());
        assert_eq!(
            instantiate_tag("pricing").map(|t| t.kind),
            Some(BlockType::Pricing)
        );
    }
}

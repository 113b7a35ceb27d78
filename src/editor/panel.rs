//! # Properties Panel
//!
//! Binds the editable field set of the selected block's type to
//! [`EditorController::update_block_props`].
//!
//! The field list per type is fixed. A prop that is not declared for a type is
//! never shown, even if it exists in the block's property bag.

use thiserror::Error;

use super::controller::EditorController;
use crate::model::{BlockId, BlockType, PropValue, Props};

/// Which input affordance a field uses. Storage is always text or number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    ShortText,
    LongText,
    /// Hex-like string such as `#1f2937`.
    Color,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, label, kind }
}

use FieldKind::{Color, LongText, Number, ShortText};

const SECTION: &[FieldSpec] = &[
    field("backgroundColor", "Background", Color),
    field("padding", "Padding", Number),
];
const COLUMNS: &[FieldSpec] = &[
    field("columns", "Columns", Number),
    field("gap", "Gap", Number),
];
const HEADING: &[FieldSpec] = &[
    field("heading", "Heading", ShortText),
    field("fontSize", "Font size", Number),
    field("textColor", "Text color", Color),
];
const TEXT: &[FieldSpec] = &[
    field("content", "Content", LongText),
    field("fontSize", "Font size", Number),
    field("textColor", "Text color", Color),
];
const IMAGE: &[FieldSpec] = &[
    field("src", "Image URL", ShortText),
    field("alt", "Alt text", ShortText),
    field("width", "Width (%)", Number),
];
const BUTTON: &[FieldSpec] = &[
    field("label", "Label", ShortText),
    field("href", "Link", ShortText),
    field("backgroundColor", "Background", Color),
    field("textColor", "Text color", Color),
];
const HERO: &[FieldSpec] = &[
    field("title", "Title", ShortText),
    field("subtitle", "Subtitle", LongText),
    field("backgroundImage", "Background image", ShortText),
    field("buttonText", "Button text", ShortText),
    field("buttonLink", "Button link", ShortText),
];
const PRICING: &[FieldSpec] = &[
    field("title", "Plan", ShortText),
    field("price", "Price", ShortText),
    field("features", "Features (one per line)", LongText),
];
const SPACER: &[FieldSpec] = &[field("height", "Height", Number)];
const DIVIDER: &[FieldSpec] = &[
    field("color", "Color", Color),
    field("thickness", "Thickness", Number),
];

/// The editable fields declared for a block type.
pub fn fields_for(kind: BlockType) -> &'static [FieldSpec] {
    match kind {
        BlockType::Section => SECTION,
        BlockType::Columns => COLUMNS,
        BlockType::Heading => HEADING,
        BlockType::Text => TEXT,
        BlockType::Image => IMAGE,
        BlockType::Button => BUTTON,
        BlockType::Hero => HERO,
        BlockType::Pricing => PRICING,
        BlockType::Spacer => SPACER,
        BlockType::Divider => DIVIDER,
    }
}

/// One row of the panel: a declared field and its current value, if set.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelField {
    pub spec: FieldSpec,
    pub value: Option<PropValue>,
}

/// What the panel shows for the selected block.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub block_id: BlockId,
    pub kind: BlockType,
    pub fields: Vec<PanelField>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PanelError {
    #[error("No block is selected")]
    NoSelection,

    #[error("Field `{field}` is not editable on {kind} blocks")]
    UnknownField { kind: BlockType, field: String },

    #[error("Field `{field}` expects a number, got `{input}`")]
    InvalidNumber { field: String, input: String },
}

/// Builds the panel for the current selection.
pub fn view(editor: &EditorController) -> Option<PanelView> {
    let block = editor.selected_block()?;
    let fields = fields_for(block.kind)
        .iter()
        .map(|spec| PanelField {
            spec: *spec,
            value: block.props.get(spec.name).cloned(),
        })
        .collect();
    Some(PanelView {
        block_id: block.id.clone(),
        kind: block.kind,
        fields,
    })
}

/// Applies raw input from a panel field to the selected block.
pub fn edit(editor: &mut EditorController, field: &str, input: &str) -> Result<(), PanelError> {
    let kind = editor.selected_block().ok_or(PanelError::NoSelection)?.kind;
    let spec = fields_for(kind)
        .iter()
        .find(|spec| spec.name == field)
        .ok_or_else(|| PanelError::UnknownField {
            kind,
            field: field.to_string(),
        })?;

    let value = match spec.kind {
        FieldKind::Number => input
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(PropValue::Number)
            .ok_or_else(|| PanelError::InvalidNumber {
                field: field.to_string(),
                input: input.to_string(),
            })?,
        FieldKind::ShortText | FieldKind::LongText | FieldKind::Color => {
            PropValue::Text(input.to_string())
        }
    };

    let mut partial = Props::new();
    partial.insert(spec.name.to_string(), value);
    editor.update_block_props(partial);
    Ok(())
}

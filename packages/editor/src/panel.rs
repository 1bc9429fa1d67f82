//! Properties panel and toolbar views handed to the host UI.

use crate::document::{BlockId, BlockInstance};
use pagebuilder_blocks::{escape_html, BlockRegistry};
use serde::Serialize;

/// Id of the element the incremental validation refresh targets
pub const VALIDATION_ELEMENT_ID: &str = "pb-validation";

/// Full properties panel content for the current selection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PropertiesPanel {
    /// Nothing selected
    Empty,
    Block(BlockPanel),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockPanel {
    pub id: BlockId,
    pub block_type: String,
    pub name: String,
    pub icon: String,
    /// Generated form; inputs carry `data-prop` / `data-type`
    pub form: String,
    pub validation: Option<String>,
}

impl PropertiesPanel {
    pub fn for_selection(selected: Option<&BlockInstance>, registry: &BlockRegistry) -> Self {
        let Some(block) = selected else {
            return PropertiesPanel::Empty;
        };

        match registry.get(&block.block_type) {
            Some(descriptor) => PropertiesPanel::Block(BlockPanel {
                id: block.id,
                block_type: block.block_type.clone(),
                name: descriptor.name().to_string(),
                icon: descriptor.icon().to_string(),
                form: descriptor.render_editor(&block.props),
                validation: descriptor.validate(&block.props),
            }),
            None => PropertiesPanel::Block(BlockPanel {
                id: block.id,
                block_type: block.block_type.clone(),
                name: block.block_type.clone(),
                icon: String::new(),
                form: String::new(),
                validation: Some(format!("Unknown block type: {}", block.block_type)),
            }),
        }
    }

    pub fn to_html(&self) -> String {
        match self {
            PropertiesPanel::Empty => {
                "<div class=\"pb-panel-empty\">Select a block to edit its properties.</div>".to_string()
            }
            PropertiesPanel::Block(panel) => format!(
                "<div class=\"pb-panel\" data-element-id=\"{id}\">\
                 <div class=\"pb-panel-header\"><span class=\"pb-panel-icon\">{icon}</span> {name}</div>\
                 {validation}\
                 <div class=\"pb-panel-form\">{form}</div>\
                 <button type=\"button\" class=\"pb-panel-delete\" data-action=\"delete\" data-element-id=\"{id}\">Delete block</button>\
                 </div>",
                id = panel.id,
                icon = escape_html(&panel.icon),
                name = escape_html(&panel.name),
                validation = validation_html(panel.validation.as_deref()),
                form = panel.form,
            ),
        }
    }
}

/// Markup for the validation slot, refreshed on each property edit
pub fn validation_html(message: Option<&str>) -> String {
    match message {
        Some(msg) => format!(
            "<div id=\"{VALIDATION_ELEMENT_ID}\" class=\"pb-validation pb-validation-error\">{}</div>",
            escape_html(msg)
        ),
        None => format!("<div id=\"{VALIDATION_ELEMENT_ID}\" class=\"pb-validation\"></div>"),
    }
}

/// One "add block" button
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolbarButton {
    pub key: String,
    pub name: String,
    pub icon: String,
}

pub fn toolbar(registry: &BlockRegistry) -> Vec<ToolbarButton> {
    registry
        .iter()
        .map(|(key, descriptor)| ToolbarButton {
            key: key.to_string(),
            name: descriptor.name().to_string(),
            icon: descriptor.icon().to_string(),
        })
        .collect()
}

pub fn toolbar_html(buttons: &[ToolbarButton]) -> String {
    buttons
        .iter()
        .map(|b| {
            format!(
                "<button type=\"button\" class=\"pb-add-block\" data-action=\"add\" data-block-type=\"{}\">\
                 <span class=\"pb-add-icon\">{}</span> {}</button>",
                escape_html(&b.key),
                escape_html(&b.icon),
                escape_html(&b.name)
            )
        })
        .collect()
}

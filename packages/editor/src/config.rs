//! Editor configuration, as supplied by the host page (camelCase JSON).
//!
//! ```json
//! {
//!   "containerId": "builder",
//!   "blocks": ["heading", "paragraph"],
//!   "initialContent": [{ "type": "heading", "props": { "text": "Hi" } }],
//!   "surface": { "enableDrag": true, "extraStyles": "h1 { color: teal }" },
//!   "template": { "head": { "title": "Landing" } }
//! }
//! ```

use crate::document::BlockId;
use crate::errors::EditorError;
use pagebuilder_template::PartialTemplateConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Id of the host element the editor mounts into
    pub container_id: String,

    /// Enabled block type keys, in toolbar order. `None` enables all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<String>>,

    /// Blocks present when the editor opens
    pub initial_content: Vec<BlockSeed>,

    pub surface: SurfaceOptions,

    pub template: PartialTemplateConfig,
}

impl EditorConfig {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A pre-seeded block. `props` are merged over the type's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSeed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BlockId>,

    #[serde(rename = "type")]
    pub block_type: String,

    #[serde(default)]
    pub props: serde_json::Value,
}

impl BlockSeed {
    pub fn new(block_type: impl Into<String>, props: serde_json::Value) -> Self {
        Self {
            id: None,
            block_type: block_type.into(),
            props,
        }
    }
}

/// Preview surface behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurfaceOptions {
    pub enable_drag: bool,
    pub enable_selection: bool,

    /// CSS appended after the base preview styles
    pub extra_styles: String,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            enable_drag: true,
            enable_selection: true,
            extra_styles: String::new(),
        }
    }
}

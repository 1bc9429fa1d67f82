use crate::props::Props;
use crate::value::PropertyError;
use std::fmt::Debug;

/// Capability contract every block kind implements.
///
/// All methods are pure. `render` must escape user-supplied text;
/// `validate` reports a problem without preventing the block from rendering.
pub trait BlockType: Debug + Send + Sync {
    /// Display name shown in the toolbar and properties panel
    fn name(&self) -> &str;

    /// Short glyph shown next to the name
    fn icon(&self) -> &str;

    /// Properties of a freshly created instance
    fn default_props(&self) -> Props;

    /// Read stored/seeded properties, filling gaps from the defaults
    fn decode_props(&self, value: serde_json::Value) -> Result<Props, PropertyError>;

    /// Output markup for the exported page
    fn render(&self, props: &Props) -> String;

    /// Property form fragment for the properties panel
    fn render_editor(&self, props: &Props) -> String;

    /// `Some(message)` when the instance is currently invalid
    fn validate(&self, props: &Props) -> Option<String>;
}

/// Message used when a descriptor receives another kind's properties.
pub(crate) fn foreign_props(block: &str, props: &Props) -> String {
    tracing::warn!(block, found = props.kind_name(), "Block received foreign properties");
    format!("{} block cannot use {} properties", block, props.kind_name())
}

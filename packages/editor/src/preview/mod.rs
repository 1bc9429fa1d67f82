//! # Isolated Preview
//!
//! Mirrors the document into a sandboxed surface and relays gestures back.
//!
//! ```text
//! Document ──render_preview_body──▶ PreviewSurface::replace_body
//!                                          │ (bootstrap script)
//! Editor::process_events ◀── EventReceiver ◀┘ SurfaceEvent
//! ```
//!
//! Every model change re-renders the whole body; nothing is diffed.

mod bootstrap;
mod protocol;
mod surface;

pub use bootstrap::{BASE_STYLES, BOOTSTRAP_SCRIPT};
pub use protocol::{channel, EventReceiver, EventSender, ProtocolError, SurfaceEvent};
pub use surface::{
    HeadlessSurface, PreviewSurface, SurfaceError, HEADLESS_GAP, HEADLESS_HEIGHT, HEADLESS_TOP,
};

use crate::config::SurfaceOptions;
use crate::document::{BlockInstance, Document};
use pagebuilder_blocks::{escape_html, BlockRegistry};
use tracing::warn;

/// Shown instead of an empty container
pub const EMPTY_MESSAGE: &str = "Add a block from the toolbar to start building your page.";

/// Body markup for the preview surface: every block in its editing wrapper
pub fn render_preview_body(
    document: &Document,
    registry: &BlockRegistry,
    options: &SurfaceOptions,
) -> String {
    if document.is_empty() {
        return format!("<div class=\"pb-empty\">{}</div>", escape_html(EMPTY_MESSAGE));
    }

    document
        .blocks()
        .iter()
        .map(|block| {
            let selected = document.selected_id() == Some(block.id);
            render_wrapper(block, registry, options, selected)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_wrapper(
    block: &BlockInstance,
    registry: &BlockRegistry,
    options: &SurfaceOptions,
    selected: bool,
) -> String {
    let (content, error) = match registry.get(&block.block_type) {
        Some(descriptor) => (descriptor.render(&block.props), descriptor.validate(&block.props)),
        None => {
            warn!(id = %block.id, block_type = %block.block_type, "Previewing block of unregistered type");
            (String::new(), Some(format!("Unknown block type: {}", block.block_type)))
        }
    };

    let mut class = String::from("pb-element");
    if selected {
        class.push_str(" selected");
    }
    if error.is_some() {
        class.push_str(" pb-element-error");
    }

    let message = error
        .map(|msg| format!("<div class=\"pb-element-error-message\">{}</div>", escape_html(&msg)))
        .unwrap_or_default();

    format!(
        "<div class=\"{class}\" data-element-id=\"{id}\" draggable=\"{draggable}\">{message}{content}\
         <button type=\"button\" class=\"pb-delete\" data-action=\"delete\" data-element-id=\"{id}\" title=\"Delete block\">×</button></div>",
        id = block.id,
        draggable = options.enable_drag,
    )
}

/// Complete document loaded into the surface once at mount
pub fn preview_document(body: &str, options: &SurfaceOptions) -> String {
    let flags = format!(
        "window.__pagebuilder = {{ drag: {}, selection: {} }};",
        options.enable_drag, options.enable_selection
    );

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"UTF-8\">\n\
         <style>{BASE_STYLES}</style>\n<style>{extra}</style>\n</head>\n<body>\n\
         <div id=\"pb-root\">{body}</div>\n<script>{flags}{BOOTSTRAP_SCRIPT}</script>\n</body>\n</html>\n",
        extra = sanitize_styles(&options.extra_styles),
    )
}

/// Host CSS goes inside `<style>`; it must not be able to close it
fn sanitize_styles(css: &str) -> String {
    css.replace("</", "<\\/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BlockSeed;
    use pagebuilder_blocks::BlockRegistry;
    use serde_json::json;

    fn document(seeds: Vec<BlockSeed>) -> (Document, BlockRegistry) {
        let registry = BlockRegistry::get_all();
        let doc = Document::seed(&seeds, &registry).unwrap();
        (doc, registry)
    }

    #[test]
    fn test_empty_document_placeholder() {
        let (doc, registry) = document(vec![]);
        let body = render_preview_body(&doc, &registry, &SurfaceOptions::default());
        assert!(body.starts_with("<div class=\"pb-empty\">"));
        assert!(!body.contains("data-element-id"));
    }

    #[test]
    fn test_wrapper_bindings() {
        let (doc, registry) = document(vec![BlockSeed {
            id: Some(crate::BlockId(12)),
            ..BlockSeed::new("heading", json!({ "text": "Hi", "level": 1 }))
        }]);
        let body = render_preview_body(&doc, &registry, &SurfaceOptions::default());

        assert!(body.starts_with(
            "<div class=\"pb-element\" data-element-id=\"12\" draggable=\"true\"><h1>Hi</h1>"
        ));
        assert!(body.contains("data-action=\"delete\" data-element-id=\"12\""));
    }

    #[test]
    fn test_invalid_block_still_renders_with_message() {
        let (doc, registry) = document(vec![BlockSeed::new("list", json!({ "items": [] }))]);
        let body = render_preview_body(&doc, &registry, &SurfaceOptions::default());

        assert!(body.contains("class=\"pb-element pb-element-error\""));
        assert!(body.contains("List must have at least one item"));
        assert!(body.contains("<ul></ul>"));
    }

    #[test]
    fn test_drag_disabled() {
        let (doc, registry) = document(vec![BlockSeed::new("paragraph", json!({}))]);
        let options = SurfaceOptions {
            enable_drag: false,
            ..Default::default()
        };
        let body = render_preview_body(&doc, &registry, &options);
        assert!(body.contains("draggable=\"false\""));

        let html = preview_document(&body, &options);
        assert!(html.contains("window.__pagebuilder = { drag: false, selection: true };"));
    }

    #[test]
    fn test_extra_styles_cannot_close_style_tag() {
        let options = SurfaceOptions {
            extra_styles: "h1 { color: red }</style><script>alert(1)</script>".to_string(),
            ..Default::default()
        };
        let html = preview_document("", &options);
        assert!(html.contains("h1 { color: red }<\\/style><script>alert(1)<\\/script>"));
        assert_eq!(html.matches("</style>").count(), 2);
    }
}

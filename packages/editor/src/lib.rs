//! # Pagebuilder Editor
//!
//! Editing engine for the page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ blocks: BlockType contract + registry       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + mutations      │
//! │  - Add / select / update / delete / reorder │
//! │  - Drag geometry (reorder engine)           │
//! │  - Isolated preview + surface events        │
//! │  - Properties panel, tabs, copy             │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ template: body markup → full HTML document  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Document is source of truth**: preview markup and panels are derived views
//! 2. **Mutations are data**: every change is a [`Mutation`] that can be replayed
//! 3. **One surface protocol**: every gesture from the preview is a [`SurfaceEvent`]
//! 4. **Advisory validation**: invalid blocks still render and export
//!
//! ## Usage
//!
//! ```rust
//! use pagebuilder_editor::{
//!     Editor, EditorConfig, FlakyClipboard, HeadlessHost, PropValue, RecordingUi,
//! };
//!
//! let mut host = HeadlessHost::new().with_container("builder");
//! let mut editor = Editor::mount(
//!     EditorConfig::new("builder"),
//!     &mut host,
//!     RecordingUi::new(),
//!     FlakyClipboard::new(),
//! )?;
//!
//! editor.add_block("heading")?;
//! editor.update_property("text", PropValue::from("Hello"))?;
//!
//! assert_eq!(editor.export_body(), "<h2>Hello</h2>");
//! assert!(editor.export_document().contains("<body>"));
//! # Ok::<(), pagebuilder_editor::EditorError>(())
//! ```

mod clipboard;
mod config;
mod document;
mod editor;
mod errors;
mod host;
mod mutations;
mod panel;
pub mod preview;
pub mod reorder;

pub use clipboard::{Clipboard, ClipboardError, FlakyClipboard, NullClipboard};
pub use config::{BlockSeed, EditorConfig, SurfaceOptions};
pub use document::{BlockId, BlockInstance, Document, IdGenerator, MAX_BLOCK_ID};
pub use editor::{Editor, COPY_FAILURE_MESSAGE, COPY_SUCCESS_MESSAGE};
pub use errors::EditorError;
pub use host::{
    EditorTab, HeadlessHost, HostPage, HostUi, Notification, NotificationKind, NullUi,
    RecordingUi, UiCall, NOTIFICATION_DURATION_MS,
};
pub use mutations::{Mutation, MutationError, MutationResult};
pub use panel::{
    toolbar, toolbar_html, validation_html, BlockPanel, PropertiesPanel, ToolbarButton,
    VALIDATION_ELEMENT_ID,
};
pub use preview::{EventSender, HeadlessSurface, PreviewSurface, SurfaceError, SurfaceEvent};
pub use reorder::{drag_after_element, CandidateBox};

// Re-export common types for convenience
pub use pagebuilder_blocks::{BlockRegistry, BlockType, PropKind, PropValue, Props};
pub use pagebuilder_template::{PartialTemplateConfig, TemplateConfig};

//! # Editor Facade
//!
//! Owns the document, registry and template configuration and keeps the
//! preview surface and host UI in step with them.
//!
//! Each operation builds a [`Mutation`], applies it to the document and
//! then runs the view updates that mutation calls for:
//!
//! | mutation        | preview   | properties panel         | validation slot |
//! |-----------------|-----------|--------------------------|-----------------|
//! | AddBlock        | re-render | full render              |                 |
//! | SelectBlock     | re-render | full render              |                 |
//! | UpdateProperty  | re-render |                          | refresh         |
//! | DeleteBlock     | re-render | if selection was cleared |                 |
//! | Reorder         | re-render | if selection was cleared |                 |
//!
//! While the code tab is showing, the exported document is refreshed after
//! every effective change.

use crate::clipboard::{Clipboard, ClipboardError};
use crate::config::{EditorConfig, SurfaceOptions};
use crate::document::{BlockId, Document};
use crate::errors::EditorError;
use crate::host::{EditorTab, HostPage, HostUi, Notification};
use crate::mutations::{Mutation, MutationResult};
use crate::panel::{toolbar, PropertiesPanel};
use crate::preview::{
    channel, preview_document, render_preview_body, EventReceiver, EventSender, PreviewSurface,
    SurfaceEvent,
};
use crate::reorder::{candidates, drag_after_element};
use pagebuilder_blocks::{BlockRegistry, BlockType, PropKind, PropValue};
use pagebuilder_template::{assemble_with, AssembleOptions, PartialTemplateConfig, TemplateConfig};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const COPY_SUCCESS_MESSAGE: &str = "HTML copied to clipboard";
pub const COPY_FAILURE_MESSAGE: &str = "Could not copy to clipboard";

/// The mounted page builder
pub struct Editor<S, U, C> {
    registry: BlockRegistry,
    document: Document,
    template: TemplateConfig,
    options: SurfaceOptions,

    surface: S,
    ui: U,
    clipboard: C,

    tab: EditorTab,

    /// Block being dragged on the surface
    dragging: Option<BlockId>,

    sender: EventSender,
    events: EventReceiver,
}

impl<S, U, C> Editor<S, U, C>
where
    S: PreviewSurface,
    U: HostUi,
    C: Clipboard,
{
    /// Mount with the built-in block types
    pub fn mount<H>(config: EditorConfig, host: &mut H, ui: U, clipboard: C) -> Result<Self, EditorError>
    where
        H: HostPage<Surface = S>,
    {
        Self::mount_with_registry(config, BlockRegistry::get_all(), host, ui, clipboard)
    }

    /// Mount with a caller-supplied registry (e.g. extended via `register`)
    pub fn mount_with_registry<H>(
        config: EditorConfig,
        registry: BlockRegistry,
        host: &mut H,
        ui: U,
        clipboard: C,
    ) -> Result<Self, EditorError>
    where
        H: HostPage<Surface = S>,
    {
        let surface = host
            .create_surface(&config.container_id)
            .ok_or_else(|| EditorError::ContainerNotFound(config.container_id.clone()))?;

        let registry = match &config.blocks {
            Some(keys) => registry.restrict(keys)?,
            None => registry,
        };
        let document = Document::seed(&config.initial_content, &registry)?;
        let (sender, events) = channel();

        let mut editor = Self {
            registry,
            document,
            template: TemplateConfig::from_partial(&config.template),
            options: config.surface,
            surface,
            ui,
            clipboard,
            tab: EditorTab::Design,
            dragging: None,
            sender,
            events,
        };

        let body = editor.preview_body();
        editor
            .surface
            .load_document(&preview_document(&body, &editor.options))?;
        editor.ui.render_toolbar(&toolbar(&editor.registry));
        editor.render_properties();
        editor.ui.show_tab(editor.tab);

        info!(
            container = %config.container_id,
            blocks = editor.document.len(),
            types = editor.registry.len(),
            "Mounted page builder"
        );
        Ok(editor)
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Append a block of type `key` and select it
    pub fn add_block(&mut self, key: &str) -> Result<BlockId, EditorError> {
        let result = self.apply(Mutation::AddBlock {
            block_type: key.to_string(),
        })?;
        result
            .created
            .ok_or_else(|| EditorError::UnknownType(key.to_string()))
    }

    /// Select `id`, or clear the selection if it is not in the document
    pub fn select_block(&mut self, id: BlockId) -> Result<(), EditorError> {
        self.apply(Mutation::SelectBlock { id }).map(|_| ())
    }

    /// Set `key` on the selected block; no-op when nothing is selected
    pub fn update_property(&mut self, key: &str, value: PropValue) -> Result<(), EditorError> {
        self.apply(Mutation::UpdateProperty {
            key: key.to_string(),
            value,
        })
        .map(|_| ())
    }

    /// Form-input flavour of [`Editor::update_property`]: `data_type` is the
    /// input's `data-type` attribute, `raw` its current value
    pub fn update_property_input(&mut self, key: &str, data_type: &str, raw: &str) -> Result<(), EditorError> {
        let kind = PropKind::parse(data_type)?;
        let value = PropValue::from_input(kind, raw)?;
        self.update_property(key, value)
    }

    /// Remove `id`; absent ids are ignored
    pub fn delete_block(&mut self, id: BlockId) -> Result<(), EditorError> {
        self.apply(Mutation::DeleteBlock { id }).map(|_| ())
    }

    /// Make the document the given sequence of existing ids
    pub fn reorder(&mut self, order: &[BlockId]) -> Result<(), EditorError> {
        self.apply(Mutation::Reorder {
            order: order.to_vec(),
        })
        .map(|_| ())
    }

    /// Apply a mutation and update the views it affects
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let result = self.document.apply(&mutation, &self.registry)?;
        debug!(?mutation, revision = result.revision, changed = result.changed, "Applied mutation");

        match &mutation {
            Mutation::AddBlock { .. } | Mutation::SelectBlock { .. } => {
                self.render_preview()?;
                self.render_properties();
            }
            Mutation::UpdateProperty { .. } => {
                if result.changed {
                    self.render_preview()?;
                    self.refresh_validation();
                }
            }
            Mutation::DeleteBlock { .. } | Mutation::Reorder { .. } => {
                if result.changed || result.selection_changed {
                    self.render_preview()?;
                }
                if result.selection_changed {
                    self.render_properties();
                }
            }
        }

        if result.changed && self.tab == EditorTab::Code {
            let code = self.export_document();
            self.ui.show_code(&code);
        }

        Ok(result)
    }

    /// Register a block type at runtime; the toolbar is re-rendered
    pub fn register_block(&mut self, key: impl Into<String>, descriptor: Arc<dyn BlockType>) {
        let key = key.into();
        self.registry = self.registry.register(key.clone(), descriptor);
        self.ui.render_toolbar(&toolbar(&self.registry));
        info!(block_type = %key, "Registered block type");
    }

    /// Layer `partial` over the current template configuration
    pub fn configure_template(&mut self, partial: &PartialTemplateConfig) {
        self.template = self.template.clone().merged(partial);
        if self.tab == EditorTab::Code {
            let code = self.export_document();
            self.ui.show_code(&code);
        }
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Concatenated block markup, in order; empty for an empty document
    pub fn export_body(&self) -> String {
        self.document.render_body(&self.registry)
    }

    /// Full HTML document using the current template configuration
    pub fn export_document(&self) -> String {
        let html = assemble_with(&self.export_body(), &self.template, AssembleOptions::default());
        info!(blocks = self.document.len(), bytes = html.len(), "Exported document");
        html
    }

    // ------------------------------------------------------------------
    // Tabs and clipboard
    // ------------------------------------------------------------------

    pub fn switch_tab(&mut self, tab: EditorTab) {
        self.tab = tab;
        self.ui.show_tab(tab);
        if tab == EditorTab::Code {
            let code = self.export_document();
            self.ui.show_code(&code);
        }
    }

    /// Copy the exported document, falling back to the synchronous path
    pub fn copy_code(&mut self) -> Result<(), EditorError> {
        let code = self.export_document();
        let primary = self.clipboard.write_text(&code);
        self.finish_copy(&code, primary)
    }

    /// Settle a copy of `code` once the primary write's outcome is known.
    ///
    /// Hosts whose clipboard write completes asynchronously call this after
    /// it settles; a failed write falls back to the synchronous path.
    pub fn finish_copy(
        &mut self,
        code: &str,
        primary: Result<(), ClipboardError>,
    ) -> Result<(), EditorError> {
        if let Err(e) = primary {
            warn!(error = %e, "Clipboard write failed; using fallback copy");
            if let Err(e) = self.clipboard.fallback_copy(code) {
                self.ui.notify(&Notification::error(COPY_FAILURE_MESSAGE));
                return Err(e.into());
            }
        }

        self.ui.notify(&Notification::success(COPY_SUCCESS_MESSAGE));
        Ok(())
    }

    // ------------------------------------------------------------------
    // Surface events
    // ------------------------------------------------------------------

    /// Sender for the surface glue to post gestures into
    pub fn event_sender(&self) -> EventSender {
        self.sender.clone()
    }

    /// Handle every queued surface event, in arrival order.
    ///
    /// Later events are still handled if one fails; the first error is
    /// returned.
    pub fn process_events(&mut self) -> Result<usize, EditorError> {
        let mut handled = 0;
        let mut first_error = None;

        while let Some(event) = self.events.try_next() {
            handled += 1;
            if let Err(e) = self.handle_event(event) {
                warn!(error = %e, "Surface event failed");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(handled),
        }
    }

    /// Handle a single surface event
    pub fn handle_event(&mut self, event: SurfaceEvent) -> Result<(), EditorError> {
        debug!(?event, "Surface event");

        match event {
            SurfaceEvent::SurfaceReady => self.render_preview(),

            SurfaceEvent::SelectElement { element_id } => {
                if !self.options.enable_selection {
                    return Ok(());
                }
                self.select_block(element_id)
            }

            SurfaceEvent::DeleteElement { element_id } => self.delete_block(element_id),

            SurfaceEvent::DragStart { element_id } => {
                if !self.options.enable_drag {
                    return Ok(());
                }
                if !self.document.contains(element_id) {
                    warn!(id = %element_id, "Drag started on unknown element");
                    return Ok(());
                }
                self.dragging = Some(element_id);
                self.surface.set_dragging(Some(element_id))?;
                Ok(())
            }

            SurfaceEvent::DragOver { y } => {
                let Some(dragged) = self.dragging else {
                    return Ok(());
                };
                let boxes = candidates(&self.surface.element_boxes(), dragged);
                let before = drag_after_element(y, &boxes);
                self.surface.move_element(dragged, before)?;
                Ok(())
            }

            SurfaceEvent::Drop => {
                let Some(dragged) = self.dragging.take() else {
                    return Ok(());
                };
                self.surface.set_dragging(None)?;

                let order: Vec<BlockId> = self.surface.element_boxes().iter().map(|b| b.id).collect();
                debug!(%dragged, ?order, "Committing drag order");
                self.reorder(&order)
            }

            SurfaceEvent::DragEnd => {
                self.surface.set_dragging(None)?;
                // No drop: the surface moved things the model never saw
                if self.dragging.take().is_some() {
                    debug!("Drag cancelled; restoring document order");
                    self.render_preview()?;
                }
                Ok(())
            }
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn template(&self) -> &TemplateConfig {
        &self.template
    }

    pub fn surface_options(&self) -> &SurfaceOptions {
        &self.options
    }

    pub fn selected_id(&self) -> Option<BlockId> {
        self.document.selected_id()
    }

    pub fn tab(&self) -> EditorTab {
        self.tab
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    // ------------------------------------------------------------------
    // View updates
    // ------------------------------------------------------------------

    fn preview_body(&self) -> String {
        render_preview_body(&self.document, &self.registry, &self.options)
    }

    fn render_preview(&mut self) -> Result<(), EditorError> {
        let body = self.preview_body();
        self.surface.replace_body(&body)?;
        debug!(revision = self.document.revision, "Re-rendered preview");
        Ok(())
    }

    fn render_properties(&mut self) {
        let panel = PropertiesPanel::for_selection(self.document.selected(), &self.registry);
        self.ui.render_properties(&panel);
    }

    fn refresh_validation(&mut self) {
        let message = self.document.selected().and_then(|block| {
            self.registry
                .get(&block.block_type)
                .and_then(|descriptor| descriptor.validate(&block.props))
        });
        self.ui.refresh_validation(message.as_deref());
    }
}

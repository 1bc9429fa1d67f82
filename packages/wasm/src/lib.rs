//! Browser bindings for the page builder.
//!
//! ```js
//! import init, { PageBuilder } from "pagebuilder-wasm";
//!
//! await init();
//! const builder = new PageBuilder(JSON.stringify({ containerId: "builder" }), {
//!   renderToolbar(buttons, html) { ... },
//!   renderProperties(panel, html) { ... },
//!   notify({ message, kind, durationMs }) { ... },
//! });
//! builder.addBlock("heading");
//! ```

mod callbacks;
mod surface;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Promise, JSON};
use pagebuilder_blocks::{BlockRegistry, PropValue};
use pagebuilder_editor::{
    BlockId, Document, Editor, EditorConfig, EditorError, EditorTab, Mutation, MAX_BLOCK_ID,
};
use pagebuilder_template::{assemble, PartialTemplateConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::future_to_promise;
use web_sys::MessageEvent;

use callbacks::settle;

pub use callbacks::{JsClipboard, JsUi, WriteOutcome};
pub use surface::{BrowserHost, IframeSurface};

type BrowserEditor = Editor<IframeSurface, JsUi, JsClipboard>;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Block ids cross the boundary as JS numbers
fn block_id(raw: f64) -> Result<BlockId, JsValue> {
    if raw.is_finite() && raw >= 0.0 && raw.fract() == 0.0 && raw <= MAX_BLOCK_ID as f64 {
        Ok(BlockId(raw as u64))
    } else {
        Err(JsValue::from_str(&format!("Invalid block id: {}", raw)))
    }
}

fn stringify_json(value: &JsValue) -> Result<String, JsValue> {
    JSON::stringify(value)?
        .as_string()
        .ok_or_else(|| JsValue::from_str("Value is not JSON-serializable"))
}

/// Surface messages arrive either pre-serialized or as plain objects
fn message_text(value: &JsValue) -> Result<String, JsValue> {
    match value.as_string() {
        Some(s) => Ok(s),
        None => stringify_json(value),
    }
}

/// Render a saved document without mounting an editor
pub fn export_document_from_json(blocks_json: &str, template_json: &str) -> Result<String, EditorError> {
    let registry = BlockRegistry::get_all();
    let document = Document::from_json(blocks_json, &registry)?;
    let template = if template_json.trim().is_empty() {
        PartialTemplateConfig::default()
    } else {
        PartialTemplateConfig::from_json(template_json)?
    };

    Ok(assemble(&document.render_body(&registry), &template))
}

#[wasm_bindgen(js_name = exportDocument)]
pub fn export_document_js(blocks_json: &str, template_json: &str) -> Result<String, JsValue> {
    export_document_from_json(blocks_json, template_json).map_err(js_error)
}

/// An editor mounted into a container element of the current page
#[wasm_bindgen]
pub struct PageBuilder {
    editor: Rc<RefCell<BrowserEditor>>,
    listener: Closure<dyn FnMut(MessageEvent)>,
}

#[wasm_bindgen]
impl PageBuilder {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str, callbacks: JsValue) -> Result<PageBuilder, JsValue> {
        let config = EditorConfig::from_json(config_json).map_err(js_error)?;
        let mut host = BrowserHost;
        let editor = Editor::mount(
            config,
            &mut host,
            JsUi::new(callbacks.clone()),
            JsClipboard::new(callbacks),
        )
        .map_err(js_error)?;
        let editor = Rc::new(RefCell::new(editor));

        let sender = editor.borrow().event_sender();
        let weak = Rc::downgrade(&editor);
        let listener = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
            let Ok(json) = message_text(&event.data()) else {
                return;
            };
            // Messages from other frames or scripts share the window
            if sender.post_message(&json).is_err() {
                return;
            }
            let Some(editor) = weak.upgrade() else {
                return;
            };
            // Re-entrant dispatch leaves the event queued for the next drain
            if let Ok(mut editor) = editor.try_borrow_mut() {
                if let Err(e) = editor.process_events() {
                    web_sys::console::warn_1(&js_error(e));
                }
            };
        });

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        window.add_event_listener_with_callback("message", listener.as_ref().unchecked_ref())?;

        Ok(PageBuilder { editor, listener })
    }

    #[wasm_bindgen(js_name = addBlock)]
    pub fn add_block(&self, block_type: &str) -> Result<f64, JsValue> {
        self.with_editor(|editor| editor.add_block(block_type))
            .map(|id| id.0 as f64)
    }

    #[wasm_bindgen(js_name = selectBlock)]
    pub fn select_block(&self, id: f64) -> Result<(), JsValue> {
        let id = block_id(id)?;
        self.with_editor(|editor| editor.select_block(id))
    }

    /// Update a property of the selected block with a typed JS value
    #[wasm_bindgen(js_name = updateProperty)]
    pub fn update_property(&self, key: &str, value: JsValue) -> Result<(), JsValue> {
        let value: PropValue = serde_json::from_str(&stringify_json(&value)?).map_err(js_error)?;
        self.with_editor(|editor| editor.update_property(key, value))
    }

    /// Update a property from a raw form control value
    #[wasm_bindgen(js_name = updatePropertyInput)]
    pub fn update_property_input(&self, key: &str, data_type: &str, raw: &str) -> Result<(), JsValue> {
        self.with_editor(|editor| editor.update_property_input(key, data_type, raw))
    }

    #[wasm_bindgen(js_name = deleteBlock)]
    pub fn delete_block(&self, id: f64) -> Result<(), JsValue> {
        let id = block_id(id)?;
        self.with_editor(|editor| editor.delete_block(id))
    }

    pub fn reorder(&self, order: Vec<f64>) -> Result<(), JsValue> {
        let order = order
            .into_iter()
            .map(block_id)
            .collect::<Result<Vec<_>, _>>()?;
        self.with_editor(|editor| editor.reorder(&order))
    }

    /// Apply a serialized mutation, e.g. `{"type":"addBlock","blockType":"image"}`
    pub fn apply(&self, mutation_json: &str) -> Result<(), JsValue> {
        let mutation: Mutation = serde_json::from_str(mutation_json).map_err(js_error)?;
        self.with_editor(|editor| editor.apply(mutation).map(|_| ()))
    }

    #[wasm_bindgen(js_name = exportBody)]
    pub fn export_body(&self) -> Result<String, JsValue> {
        self.with_editor(|editor| Ok(editor.export_body()))
    }

    #[wasm_bindgen(js_name = exportDocument)]
    pub fn export_document(&self) -> Result<String, JsValue> {
        self.with_editor(|editor| Ok(editor.export_document()))
    }

    #[wasm_bindgen(js_name = switchTab)]
    pub fn switch_tab(&self, tab: &str) -> Result<(), JsValue> {
        let tab: EditorTab = tab.parse().map_err(|e: String| JsValue::from_str(&e))?;
        self.with_editor(|editor| {
            editor.switch_tab(tab);
            Ok(())
        })
    }

    /// Copy the exported document; resolves once the clipboard write settles
    #[wasm_bindgen(js_name = copyCode)]
    pub fn copy_code(&self) -> Result<Promise, JsValue> {
        let (code, outcome) = self.with_editor(|editor| {
            let code = editor.export_document();
            let outcome = editor.clipboard().begin_write(&code);
            Ok((code, outcome))
        })?;
        let editor = Rc::clone(&self.editor);

        Ok(future_to_promise(async move {
            let primary = settle(outcome).await;
            let mut editor = editor
                .try_borrow_mut()
                .map_err(|_| JsValue::from_str("Editor is busy"))?;
            editor.finish_copy(&code, primary).map_err(js_error)?;
            Ok(JsValue::UNDEFINED)
        }))
    }

    #[wasm_bindgen(js_name = configureTemplate)]
    pub fn configure_template(&self, template_json: &str) -> Result<(), JsValue> {
        let partial = PartialTemplateConfig::from_json(template_json).map_err(js_error)?;
        self.with_editor(|editor| {
            editor.configure_template(&partial);
            Ok(())
        })
    }

    /// Current document as `[{ id, type, props }, ...]` JSON
    pub fn blocks(&self) -> Result<String, JsValue> {
        self.with_editor(|editor| Ok(editor.document().to_json().to_string()))
    }

    #[wasm_bindgen(js_name = selectedId)]
    pub fn selected_id(&self) -> Result<Option<f64>, JsValue> {
        self.with_editor(|editor| Ok(editor.selected_id().map(|id| id.0 as f64)))
    }

    /// Feed a surface message directly, bypassing the window listener
    #[wasm_bindgen(js_name = postMessage)]
    pub fn post_message(&self, message_json: &str) -> Result<usize, JsValue> {
        self.with_editor(|editor| {
            editor.event_sender().post_message(message_json)?;
            editor.process_events()
        })
    }
}

impl PageBuilder {
    fn with_editor<T>(
        &self,
        f: impl FnOnce(&mut BrowserEditor) -> Result<T, EditorError>,
    ) -> Result<T, JsValue> {
        let mut editor = self
            .editor
            .try_borrow_mut()
            .map_err(|_| JsValue::from_str("Editor is busy"))?;
        f(&mut editor).map_err(js_error)
    }
}

impl Drop for PageBuilder {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            let _ = window.remove_event_listener_with_callback(
                "message",
                self.listener.as_ref().unchecked_ref(),
            );
        }
    }
}

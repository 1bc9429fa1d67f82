//! Host page callbacks.
//!
//! The embedding page passes one object whose optional methods receive the
//! editor's view updates. Missing methods are skipped.

use js_sys::{Function, Promise, Reflect, JSON};
use pagebuilder_editor::{
    toolbar_html, Clipboard, ClipboardError, EditorTab, HostUi, Notification, PropertiesPanel,
    ToolbarButton,
};
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlDocument, HtmlTextAreaElement};

fn method(target: &JsValue, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_json::to_string(value)
        .ok()
        .and_then(|json| JSON::parse(&json).ok())
        .unwrap_or(JsValue::NULL)
}

fn report(name: &str, err: JsValue) {
    web_sys::console::error_2(
        &JsValue::from_str(&format!("pagebuilder: `{}` callback threw", name)),
        &err,
    );
}

/// Forwards view updates to the host's callback object
#[derive(Debug, Clone)]
pub struct JsUi {
    callbacks: JsValue,
}

impl JsUi {
    pub fn new(callbacks: JsValue) -> Self {
        Self { callbacks }
    }

    fn call1(&self, name: &str, arg: &JsValue) {
        if let Some(f) = method(&self.callbacks, name) {
            if let Err(e) = f.call1(&self.callbacks, arg) {
                report(name, e);
            }
        }
    }

    fn call2(&self, name: &str, a: &JsValue, b: &JsValue) {
        if let Some(f) = method(&self.callbacks, name) {
            if let Err(e) = f.call2(&self.callbacks, a, b) {
                report(name, e);
            }
        }
    }
}

impl HostUi for JsUi {
    fn render_toolbar(&mut self, buttons: &[ToolbarButton]) {
        self.call2(
            "renderToolbar",
            &to_js(&buttons),
            &JsValue::from_str(&toolbar_html(buttons)),
        );
    }

    fn render_properties(&mut self, panel: &PropertiesPanel) {
        self.call2(
            "renderProperties",
            &to_js(panel),
            &JsValue::from_str(&panel.to_html()),
        );
    }

    fn refresh_validation(&mut self, message: Option<&str>) {
        let arg = message.map(JsValue::from_str).unwrap_or(JsValue::NULL);
        self.call1("refreshValidation", &arg);
    }

    fn show_tab(&mut self, tab: EditorTab) {
        self.call1("showTab", &JsValue::from_str(tab.as_str()));
    }

    fn show_code(&mut self, code: &str) {
        self.call1("showCode", &JsValue::from_str(code));
    }

    fn notify(&mut self, notification: &Notification) {
        self.call1("notify", &to_js(notification));
    }
}

/// Result of calling the host's `writeText`
pub enum WriteOutcome {
    Done,
    /// `navigator.clipboard.writeText` style: settles later, fails by rejecting
    Pending(JsFuture),
}

/// Clipboard backed by the host's `writeText` callback, falling back to
/// `document.execCommand("copy")` on a detached textarea
#[derive(Debug, Clone)]
pub struct JsClipboard {
    callbacks: JsValue,
}

impl JsClipboard {
    pub fn new(callbacks: JsValue) -> Self {
        Self { callbacks }
    }

    pub fn begin_write(&self, text: &str) -> Result<WriteOutcome, ClipboardError> {
        let f = method(&self.callbacks, "writeText").ok_or(ClipboardError::Unavailable)?;
        let result = f
            .call1(&self.callbacks, &JsValue::from_str(text))
            .map_err(|e| ClipboardError::Rejected(format!("{:?}", e)))?;

        if let Some(promise) = result.dyn_ref::<Promise>() {
            return Ok(WriteOutcome::Pending(JsFuture::from(promise.clone())));
        }
        // Hosts signal refusal by returning `false`
        if result.as_bool() == Some(false) {
            return Err(ClipboardError::Rejected("writeText returned false".to_string()));
        }
        Ok(WriteOutcome::Done)
    }
}

/// Wait for the primary write to settle
pub async fn settle(outcome: Result<WriteOutcome, ClipboardError>) -> Result<(), ClipboardError> {
    match outcome? {
        WriteOutcome::Done => Ok(()),
        WriteOutcome::Pending(future) => future
            .await
            .map(|_| ())
            .map_err(|e| ClipboardError::Rejected(format!("{:?}", e))),
    }
}

impl Clipboard for JsClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        match self.begin_write(text)? {
            WriteOutcome::Done => Ok(()),
            // A synchronous caller cannot see the Promise settle, so it never counts as copied
            WriteOutcome::Pending(_) => Err(ClipboardError::Rejected(
                "writeText settles asynchronously".to_string(),
            )),
        }
    }

    fn fallback_copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        let document: HtmlDocument = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into().ok())
            .ok_or(ClipboardError::Unavailable)?;
        let body = document.body().ok_or(ClipboardError::Unavailable)?;

        let area: HtmlTextAreaElement = document
            .create_element("textarea")
            .map_err(|e| ClipboardError::Rejected(format!("{:?}", e)))?
            .dyn_into()
            .map_err(|_| ClipboardError::Unavailable)?;
        area.set_value(text);
        area.set_attribute("readonly", "")
            .map_err(|e| ClipboardError::Rejected(format!("{:?}", e)))?;
        body.append_child(&area)
            .map_err(|e| ClipboardError::Rejected(format!("{:?}", e)))?;
        area.select();

        let copied = document.exec_command("copy");
        area.remove();

        match copied {
            Ok(true) => Ok(()),
            Ok(false) => Err(ClipboardError::Rejected("copy command refused".to_string())),
            Err(e) => Err(ClipboardError::Rejected(format!("{:?}", e))),
        }
    }
}

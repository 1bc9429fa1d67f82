//! Browser tests; run with `wasm-pack test --headless --chrome packages/wasm`

#![cfg(target_arch = "wasm32")]

use js_sys::{Object, Reflect};
use pagebuilder_wasm::{export_document_js, PageBuilder};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn container(id: &str) {
    let document = web_sys::window().unwrap().document().unwrap();
    let div = document.create_element("div").unwrap();
    div.set_id(id);
    document.body().unwrap().append_child(&div).unwrap();
}

fn builder(id: &str) -> PageBuilder {
    container(id);
    PageBuilder::new(&format!(r#"{{"containerId":"{id}"}}"#), Object::new().into()).unwrap()
}

#[wasm_bindgen_test]
fn mounts_sandboxed_frame() {
    let _builder = builder("mount-test");
    let document = web_sys::window().unwrap().document().unwrap();
    let frame = document
        .query_selector("#mount-test iframe")
        .unwrap()
        .expect("preview frame");

    assert_eq!(
        frame.get_attribute("sandbox").as_deref(),
        Some("allow-same-origin allow-scripts")
    );
}

#[wasm_bindgen_test]
fn missing_container_is_an_error() {
    assert!(PageBuilder::new(r#"{"containerId":"nowhere"}"#, JsValue::NULL).is_err());
}

#[wasm_bindgen_test]
fn edits_flow_into_export() {
    let builder = builder("edit-test");
    builder.add_block("heading").unwrap();
    builder.update_property("text", JsValue::from_str("Hello")).unwrap();

    assert_eq!(builder.export_body().unwrap(), "<h2>Hello</h2>");
}

#[wasm_bindgen_test]
fn surface_messages_delete_blocks() {
    let builder = builder("message-test");
    let id = builder.add_block("paragraph").unwrap();

    let handled = builder
        .post_message(&format!(r#"{{"type":"deleteElement","elementId":{id}}}"#))
        .unwrap();

    assert_eq!(handled, 1);
    assert_eq!(builder.export_body().unwrap(), "");
}

fn recording_callbacks(write_text: &str) -> (Object, js_sys::Array) {
    let callbacks = Object::new();
    let seen = js_sys::Array::new();
    let notify = js_sys::Function::new_with_args("n", "this.seen.push(n.message)");
    let write = js_sys::Function::new_with_args("text", write_text);
    Reflect::set(&callbacks, &"seen".into(), &seen).unwrap();
    Reflect::set(&callbacks, &"notify".into(), &notify).unwrap();
    Reflect::set(&callbacks, &"writeText".into(), &write).unwrap();
    (callbacks, seen)
}

#[wasm_bindgen_test]
async fn copy_waits_for_resolved_write() {
    container("notify-test");
    let (callbacks, seen) = recording_callbacks("return Promise.resolve()");

    let builder = PageBuilder::new(r#"{"containerId":"notify-test"}"#, callbacks.into()).unwrap();
    let copied = JsFuture::from(builder.copy_code().unwrap()).await;

    assert!(copied.is_ok());
    assert_eq!(seen.length(), 1);
    assert_eq!(
        seen.get(0).as_string().as_deref(),
        Some("HTML copied to clipboard")
    );
}

#[wasm_bindgen_test]
async fn rejected_write_never_reports_a_silent_success() {
    container("reject-test");
    let (callbacks, seen) = recording_callbacks("return Promise.reject(new Error('denied'))");

    let builder = PageBuilder::new(r#"{"containerId":"reject-test"}"#, callbacks.into()).unwrap();
    let promise = builder.copy_code().unwrap();
    // Nothing is reported until the write settles
    assert_eq!(seen.length(), 0);

    // The fallback copy may or may not be allowed without a user gesture
    let copied = JsFuture::from(promise).await;
    assert_eq!(seen.length(), 1);
    let message = seen.get(0).as_string().unwrap();
    assert_eq!(message == "HTML copied to clipboard", copied.is_ok());
}

#[wasm_bindgen_test]
fn standalone_export() {
    let html = export_document_js(r#"[{"type":"paragraph","props":{"text":"Hi"}}]"#, "").unwrap();
    assert!(html.contains("<p>Hi</p>"));
}

//! Integration tests for the editor facade

use pagebuilder_blocks::{escape_html, HeadingProps, PropertyError, PropertyMap};
use pagebuilder_editor::{
    BlockId, BlockSeed, BlockType, ClipboardError, Editor, EditorConfig, EditorError, EditorTab,
    FlakyClipboard, HeadlessHost, HeadlessSurface, NotificationKind, NullClipboard, NullUi,
    PartialTemplateConfig, PropValue, PropertiesPanel, Props, RecordingUi, UiCall,
    COPY_SUCCESS_MESSAGE,
};
use pagebuilder_template::PartialHeadConfig;
use serde_json::json;
use std::sync::Arc;

type TestEditor = Editor<HeadlessSurface, RecordingUi, FlakyClipboard>;

fn mount(config: EditorConfig) -> TestEditor {
    mount_with_clipboard(config, FlakyClipboard::new())
}

fn mount_with_clipboard(config: EditorConfig, clipboard: FlakyClipboard) -> TestEditor {
    let mut host = HeadlessHost::new().with_container("builder");
    Editor::mount(config, &mut host, RecordingUi::new(), clipboard).unwrap()
}

fn seeded(types: &[&str]) -> TestEditor {
    let mut config = EditorConfig::new("builder");
    config.initial_content = types
        .iter()
        .enumerate()
        .map(|(i, t)| BlockSeed {
            id: Some(BlockId(i as u64 + 1)),
            ..BlockSeed::new(*t, serde_json::Value::Null)
        })
        .collect();
    mount(config)
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn test_mount_requires_container() {
    let mut host = HeadlessHost::new().with_container("builder");
    let err = Editor::mount(EditorConfig::new("missing"), &mut host, NullUi, NullClipboard)
        .err()
        .unwrap();

    assert!(matches!(err, EditorError::ContainerNotFound(id) if id == "missing"));
}

#[test]
fn test_mount_rejects_unknown_enabled_block() {
    let mut config = EditorConfig::new("builder");
    config.blocks = Some(vec!["heading".to_string(), "video".to_string()]);

    let mut host = HeadlessHost::new().with_container("builder");
    let err = Editor::mount(config, &mut host, NullUi, NullClipboard).err().unwrap();
    assert!(err.is_unknown_type());
}

#[test]
fn test_mount_rejects_out_of_range_seed_id() {
    let mut config = EditorConfig::new("builder");
    config.initial_content = vec![
        BlockSeed {
            id: Some(BlockId(u64::MAX)),
            ..BlockSeed::new("paragraph", json!({}))
        },
        BlockSeed::new("paragraph", json!({})),
    ];

    let mut host = HeadlessHost::new().with_container("builder");
    let err = Editor::mount(config, &mut host, NullUi, NullClipboard).err().unwrap();
    assert!(matches!(err, EditorError::InvalidBlockId(BlockId(u64::MAX))));
}

#[test]
fn test_mount_renders_initial_views() {
    let editor = mount(EditorConfig::new("builder"));

    assert_eq!(editor.surface().loads, 1);
    let document = editor.surface().document.as_deref().unwrap();
    assert!(document.contains("<div class=\"pb-empty\">"));
    assert!(document.contains("postMessage"));

    let calls = &editor.ui().calls;
    assert!(matches!(calls[0], UiCall::Toolbar(ref buttons) if buttons.len() == 4));
    assert_eq!(calls[1], UiCall::Properties(PropertiesPanel::Empty));
    assert_eq!(calls[2], UiCall::Tab(EditorTab::Design));
}

#[test]
fn test_add_block_grows_document_with_default_copy() {
    let mut editor = mount(EditorConfig::new("builder"));
    let id = editor.add_block("heading").unwrap();

    assert_eq!(editor.document().len(), 1);
    assert_eq!(editor.selected_id(), Some(id));

    let descriptor = Arc::clone(editor.registry().get("heading").unwrap());
    assert_eq!(editor.document().get(id).unwrap().props, descriptor.default_props());

    editor.update_property("text", PropValue::from("Changed")).unwrap();
    assert_eq!(
        descriptor.default_props(),
        Props::Heading(HeadingProps::default())
    );

    assert!(matches!(
        editor.ui().last_panel(),
        Some(PropertiesPanel::Block(panel)) if panel.id == id
    ));
    assert!(editor.surface().body.contains("pb-element selected"));
}

#[test]
fn test_add_unknown_block_keeps_length() {
    let mut editor = seeded(&["heading"]);
    let err = editor.add_block("video").unwrap_err();

    assert!(err.is_unknown_type());
    assert_eq!(editor.document().len(), 1);
}

#[test]
fn test_select_absent_clears_selection() {
    let mut editor = seeded(&["heading", "paragraph"]);
    editor.select_block(BlockId(2)).unwrap();
    assert_eq!(editor.selected_id(), Some(BlockId(2)));

    editor.select_block(BlockId(99)).unwrap();
    assert_eq!(editor.selected_id(), None);
    assert_eq!(editor.ui().last_panel(), Some(&PropertiesPanel::Empty));
}

#[test]
fn test_update_property_refreshes_validation_only() {
    let mut editor = seeded(&["heading"]);
    editor.select_block(BlockId(1)).unwrap();
    let renders = editor.surface().renders;
    editor.ui_mut().clear();

    editor.update_property("text", PropValue::from("")).unwrap();

    assert_eq!(editor.surface().renders, renders + 1);
    assert_eq!(
        editor.ui().calls,
        vec![UiCall::Validation(Some("Heading text cannot be empty".to_string()))]
    );
    assert!(editor.surface().body.contains("pb-element-error"));

    // Invalid blocks still export
    assert_eq!(editor.export_body(), "<h2></h2>");
}

#[test]
fn test_update_without_selection_is_noop() {
    let mut editor = seeded(&["heading"]);
    let revision = editor.document().revision;

    editor.update_property("text", PropValue::from("Nope")).unwrap();

    assert_eq!(editor.document().revision, revision);
    assert_eq!(editor.export_body(), "<h2>New Heading</h2>");
}

#[test]
fn test_form_inputs_are_coerced() {
    let mut editor = mount(EditorConfig::new("builder"));

    editor.add_block("image").unwrap();
    editor.update_property_input("width", "int", "320").unwrap();
    assert!(editor.export_body().contains("width=\"320\""));

    editor.add_block("list").unwrap();
    editor.update_property_input("ordered", "boolean", "on").unwrap();
    editor.update_property_input("items", "string", "One\nTwo").unwrap();
    assert!(editor.export_body().ends_with("<ol><li>One</li><li>Two</li></ol>"));

    assert!(editor.update_property_input("ordered", "float", "1").is_err());
    assert!(editor.update_property_input("width", "int", "wide").is_err());
}

#[test]
fn test_list_validation_through_panel() {
    let mut editor = mount(EditorConfig::new("builder"));
    editor.add_block("list").unwrap();
    editor.ui_mut().clear();

    for (items, expected) in [
        ("", Some("List must have at least one item")),
        ("\na", Some("List items cannot be empty")),
        ("a\nb", None),
    ] {
        editor.update_property("items", PropValue::from(items)).unwrap();
        assert_eq!(
            editor.ui().calls.last(),
            Some(&UiCall::Validation(expected.map(str::to_string)))
        );
    }
}

#[test]
fn test_delete_selected_clears_selection() {
    let mut editor = seeded(&["heading", "paragraph"]);
    editor.select_block(BlockId(1)).unwrap();

    editor.delete_block(BlockId(1)).unwrap();

    assert_eq!(editor.document().ids(), vec![BlockId(2)]);
    assert_eq!(editor.selected_id(), None);
    assert_eq!(editor.ui().last_panel(), Some(&PropertiesPanel::Empty));
}

#[test]
fn test_delete_absent_keeps_length() {
    let mut editor = seeded(&["heading", "paragraph"]);
    let renders = editor.surface().renders;

    editor.delete_block(BlockId(42)).unwrap();

    assert_eq!(editor.document().len(), 2);
    assert_eq!(editor.surface().renders, renders);
}

#[test]
fn test_reorder_permutations() {
    let mut editor = seeded(&["heading", "paragraph", "list"]);
    let (a, b, c) = (BlockId(1), BlockId(2), BlockId(3));

    for permutation in [vec![c, a, b], vec![b, c, a], vec![a, b, c], vec![c, b, a]] {
        editor.reorder(&permutation).unwrap();
        assert_eq!(editor.document().ids(), permutation);
        assert_eq!(editor.surface().order(), permutation.as_slice());
    }

    editor.reorder(&[c, BlockId(77)]).unwrap();
    assert_eq!(editor.document().ids(), vec![c]);
}

#[test]
fn test_export_body() {
    let mut editor = mount(EditorConfig::new("builder"));
    assert_eq!(editor.export_body(), "");

    editor.add_block("heading").unwrap();
    editor.add_block("paragraph").unwrap();
    assert_eq!(
        editor.export_body(),
        "<h2>New Heading</h2><p>Write your paragraph text here.</p>"
    );
}

#[test]
fn test_export_escapes_user_text() {
    let mut editor = mount(EditorConfig::new("builder"));
    editor.add_block("heading").unwrap();
    editor
        .update_property("text", PropValue::from("<script>x</script>"))
        .unwrap();

    assert_eq!(editor.export_body(), "<h2>&lt;script&gt;x&lt;/script&gt;</h2>");
    assert!(!editor.surface().body.contains("<script>x"));
}

#[test]
fn test_export_document_structure() {
    let mut editor = seeded(&["heading", "image", "list"]);
    let plain = editor.export_document();

    editor.configure_template(&PartialTemplateConfig {
        head: Some(PartialHeadConfig {
            custom_head: Some("<style>h2 { color: red }</style>".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    });
    let styled = editor.export_document();
    assert!(styled.contains("<style>h2 { color: red }</style>"));

    for html in [plain, styled] {
        assert_eq!(count(&html, "<html"), 1);
        assert_eq!(count(&html, "<head>"), 1);
        assert_eq!(count(&html, "</head>"), 1);
        assert_eq!(count(&html, "<body"), 1);
        assert_eq!(count(&html, "</body>"), 1);
    }
}

#[test]
fn test_template_from_config() {
    let config = EditorConfig::from_json(
        r#"{
            "containerId": "builder",
            "initialContent": [{ "type": "paragraph", "props": { "text": "Hi" } }],
            "template": {
                "htmlAttributes": { "lang": "nl" },
                "head": { "title": "Landing & more" }
            }
        }"#,
    )
    .unwrap();
    let editor = mount(config);

    let html = editor.export_document();
    assert!(html.contains("<html lang=\"nl\">"));
    assert!(html.contains(&format!("<title>{}</title>", escape_html("Landing & more"))));
    assert!(html.contains("    <p>Hi</p>\n"));
}

#[test]
fn test_export_document_keeps_multiline_body() {
    let mut editor = mount(EditorConfig::new("builder"));
    editor.add_block("heading").unwrap();
    editor
        .update_property("text", PropValue::from("Hello\n   World"))
        .unwrap();
    editor.add_block("paragraph").unwrap();

    let body = editor.export_body();
    assert!(body.contains("Hello\n   World"));
    assert!(editor.export_document().contains(&body));
}

#[test]
fn test_code_tab_tracks_changes() {
    let mut editor = mount(EditorConfig::new("builder"));
    editor.switch_tab(EditorTab::Code);
    assert_eq!(editor.tab(), EditorTab::Code);

    editor.add_block("heading").unwrap();

    let code_views: Vec<&String> = editor
        .ui()
        .calls
        .iter()
        .filter_map(|call| match call {
            UiCall::Code(code) => Some(code),
            _ => None,
        })
        .collect();
    assert_eq!(code_views.len(), 2);
    assert!(code_views[1].contains("<h2>New Heading</h2>"));

    editor.switch_tab(EditorTab::Design);
    editor.ui_mut().clear();
    editor.add_block("list").unwrap();
    assert_eq!(editor.ui().count(|c| matches!(c, UiCall::Code(_))), 0);
}

#[test]
fn test_copy_code_uses_clipboard() {
    let mut editor = seeded(&["heading"]);
    editor.copy_code().unwrap();

    assert_eq!(editor.clipboard().contents.as_deref(), Some(editor.export_document().as_str()));
    assert!(!editor.clipboard().fallback_used);
}

#[test]
fn test_copy_code_falls_back_with_same_notification() {
    let mut primary = seeded(&["heading"]);
    primary.copy_code().unwrap();

    let mut config = EditorConfig::new("builder");
    config.initial_content = vec![BlockSeed::new("heading", json!({}))];
    let mut fallback = mount_with_clipboard(config, FlakyClipboard::failing());
    fallback.copy_code().unwrap();

    assert!(fallback.clipboard().fallback_used);
    assert_eq!(fallback.clipboard().contents, primary.clipboard().contents);
    assert_eq!(fallback.ui().notifications(), primary.ui().notifications());

    let notification = fallback.ui().notifications()[0];
    assert_eq!(notification.message, COPY_SUCCESS_MESSAGE);
    assert_eq!(notification.kind, NotificationKind::Success);
    assert_eq!(notification.duration_ms, 3000);
}

#[test]
fn test_copy_code_reports_total_failure() {
    let mut editor = mount_with_clipboard(EditorConfig::new("builder"), FlakyClipboard::broken());
    let err = editor.copy_code().unwrap_err();

    assert!(matches!(err, EditorError::Clipboard(_)));
    assert_eq!(editor.ui().notifications()[0].kind, NotificationKind::Error);
}

#[test]
fn test_late_rejection_falls_back_before_notifying() {
    let mut editor = seeded(&["heading"]);
    let code = editor.export_document();

    // The primary write settled later with a rejection
    editor
        .finish_copy(&code, Err(ClipboardError::Rejected("NotAllowedError".to_string())))
        .unwrap();

    assert!(editor.clipboard().fallback_used);
    assert_eq!(editor.clipboard().contents.as_deref(), Some(code.as_str()));
    let notifications = editor.ui().notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].message, COPY_SUCCESS_MESSAGE);
}

#[test]
fn test_late_success_skips_fallback() {
    let mut editor = seeded(&["heading"]);
    let code = editor.export_document();
    editor.finish_copy(&code, Ok(())).unwrap();

    assert!(!editor.clipboard().fallback_used);
    assert_eq!(editor.ui().notifications()[0].kind, NotificationKind::Success);
}

/// Call-to-action button kept in a free-form property map
#[derive(Debug)]
struct Button;

impl BlockType for Button {
    fn name(&self) -> &str {
        "Button"
    }

    fn icon(&self) -> &str {
        "▭"
    }

    fn default_props(&self) -> Props {
        let mut map = PropertyMap::new();
        map.insert("label".to_string(), PropValue::from("Click me"));
        Props::Custom(map)
    }

    fn decode_props(&self, _value: serde_json::Value) -> Result<Props, PropertyError> {
        Ok(self.default_props())
    }

    fn render(&self, props: &Props) -> String {
        match props.as_custom().and_then(|m| m.get("label")) {
            Some(PropValue::Str(label)) => format!("<button>{}</button>", escape_html(label)),
            _ => "<button></button>".to_string(),
        }
    }

    fn render_editor(&self, _props: &Props) -> String {
        String::new()
    }

    fn validate(&self, _props: &Props) -> Option<String> {
        None
    }
}

#[test]
fn test_register_block_at_runtime() {
    let mut editor = mount(EditorConfig::new("builder"));
    assert!(editor.add_block("button").is_err());

    editor.register_block("button", Arc::new(Button));
    editor.add_block("button").unwrap();
    editor.update_property("label", PropValue::from("Buy")).unwrap();

    assert_eq!(editor.export_body(), "<button>Buy</button>");
    assert!(matches!(
        editor.ui().calls.iter().rev().find(|c| matches!(c, UiCall::Toolbar(_))),
        Some(UiCall::Toolbar(buttons)) if buttons.len() == 5
    ));
}

#[test]
fn test_enabled_blocks_restrict_toolbar() {
    let mut config = EditorConfig::new("builder");
    config.blocks = Some(vec!["list".to_string(), "heading".to_string()]);
    let mut editor = mount(config);

    let keys: Vec<&str> = editor.registry().keys().collect();
    assert_eq!(keys, vec!["list", "heading"]);
    assert!(editor.add_block("image").unwrap_err().is_unknown_type());
}

//! Surface event sequences: drag lifecycles, gestures relayed from the
//! preview, and ordering guarantees of the event channel.

use pagebuilder_editor::{
    BlockId, BlockSeed, Editor, EditorConfig, FlakyClipboard, HeadlessHost, HeadlessSurface,
    PropertiesPanel, RecordingUi, SurfaceEvent, SurfaceOptions,
};

type TestEditor = Editor<HeadlessSurface, RecordingUi, FlakyClipboard>;

fn editor_with(ids: &[u64], surface: SurfaceOptions) -> TestEditor {
    let mut config = EditorConfig::new("builder");
    config.surface = surface;
    config.initial_content = ids
        .iter()
        .map(|id| BlockSeed {
            id: Some(BlockId(*id)),
            ..BlockSeed::new("paragraph", serde_json::json!({ "text": format!("Block {id}") }))
        })
        .collect();

    let mut host = HeadlessHost::new().with_container("builder");
    Editor::mount(config, &mut host, RecordingUi::new(), FlakyClipboard::new()).unwrap()
}

fn editor(ids: &[u64]) -> TestEditor {
    editor_with(ids, SurfaceOptions::default())
}

fn ids(raw: &[u64]) -> Vec<BlockId> {
    raw.iter().copied().map(BlockId).collect()
}

fn drag(editor: &mut TestEditor, id: u64, ys: &[f64], drop: bool) {
    let sender = editor.event_sender();
    sender
        .send(SurfaceEvent::DragStart {
            element_id: BlockId(id),
        })
        .unwrap();
    for y in ys {
        sender.send(SurfaceEvent::DragOver { y: *y }).unwrap();
    }
    if drop {
        sender.send(SurfaceEvent::Drop).unwrap();
    }
    sender.send(SurfaceEvent::DragEnd).unwrap();
    editor.process_events().unwrap();
}

#[test]
fn test_drag_to_top_commits_on_drop() {
    let mut editor = editor(&[1, 2, 3]);
    // Layout midpoints: 35, 105, 175
    drag(&mut editor, 3, &[10.0], true);

    assert_eq!(editor.document().ids(), ids(&[3, 1, 2]));
    assert_eq!(editor.surface().order(), ids(&[3, 1, 2]).as_slice());
    assert!(!editor.is_dragging());
}

#[test]
fn test_drag_below_last_appends() {
    let mut editor = editor(&[1, 2, 3]);
    drag(&mut editor, 1, &[200.0], true);

    assert_eq!(editor.document().ids(), ids(&[2, 3, 1]));
}

#[test]
fn test_drag_over_recomputes_each_time() {
    let mut editor = editor(&[1, 2, 3]);
    // 1 goes to the end ([2,3,1]); with midpoints now 35 and 105 for 2 and 3,
    // y=60 puts it back in front of 3
    drag(&mut editor, 1, &[200.0, 60.0], true);

    assert_eq!(editor.document().ids(), ids(&[2, 1, 3]));
}

#[test]
fn test_model_untouched_until_drop() {
    let mut editor = editor(&[1, 2, 3]);
    let sender = editor.event_sender();
    sender
        .send(SurfaceEvent::DragStart {
            element_id: BlockId(3),
        })
        .unwrap();
    sender.send(SurfaceEvent::DragOver { y: 10.0 }).unwrap();
    editor.process_events().unwrap();

    assert!(editor.is_dragging());
    assert_eq!(editor.surface().dragging, Some(BlockId(3)));
    assert_eq!(editor.surface().order(), ids(&[3, 1, 2]).as_slice());
    assert_eq!(editor.document().ids(), ids(&[1, 2, 3]));
}

#[test]
fn test_cancelled_drag_restores_document_order() {
    let mut editor = editor(&[1, 2, 3]);
    let revision = editor.document().revision;

    drag(&mut editor, 3, &[10.0], false);

    assert_eq!(editor.document().ids(), ids(&[1, 2, 3]));
    assert_eq!(editor.surface().order(), ids(&[1, 2, 3]).as_slice());
    assert_eq!(editor.document().revision, revision);
    assert_eq!(editor.surface().dragging, None);
}

#[test]
fn test_single_block_never_reorders() {
    let mut editor = editor(&[1]);
    let revision = editor.document().revision;

    drag(&mut editor, 1, &[0.0, 500.0], true);

    assert_eq!(editor.document().ids(), ids(&[1]));
    assert_eq!(editor.document().revision, revision);
}

#[test]
fn test_drag_disabled_ignores_drag_events() {
    let mut editor = editor_with(
        &[1, 2],
        SurfaceOptions {
            enable_drag: false,
            ..Default::default()
        },
    );
    assert!(editor.surface().body.contains("draggable=\"false\""));

    drag(&mut editor, 2, &[10.0], true);

    assert!(!editor.is_dragging());
    assert_eq!(editor.document().ids(), ids(&[1, 2]));
    assert_eq!(editor.surface().moves, 0);
}

#[test]
fn test_drag_of_unknown_element_is_ignored() {
    let mut editor = editor(&[1, 2]);
    drag(&mut editor, 9, &[10.0], true);

    assert_eq!(editor.document().ids(), ids(&[1, 2]));
    assert_eq!(editor.surface().moves, 0);
}

#[test]
fn test_select_from_surface() {
    let mut editor = editor(&[1, 2]);
    editor
        .event_sender()
        .post_message(r#"{"type":"selectElement","elementId":2}"#)
        .unwrap();
    editor.process_events().unwrap();

    assert_eq!(editor.selected_id(), Some(BlockId(2)));
    assert!(matches!(
        editor.ui().last_panel(),
        Some(PropertiesPanel::Block(panel)) if panel.id == BlockId(2)
    ));
}

#[test]
fn test_selection_disabled_ignores_select_events() {
    let mut editor = editor_with(
        &[1, 2],
        SurfaceOptions {
            enable_selection: false,
            ..Default::default()
        },
    );
    editor
        .event_sender()
        .send(SurfaceEvent::SelectElement {
            element_id: BlockId(1),
        })
        .unwrap();
    editor.process_events().unwrap();

    assert_eq!(editor.selected_id(), None);
}

#[test]
fn test_delete_message_from_surface() {
    let mut editor = editor(&[1, 2, 3]);
    editor.select_block(BlockId(2)).unwrap();

    editor
        .event_sender()
        .post_message(r#"{ "type": "deleteElement", "elementId": 2 }"#)
        .unwrap();
    assert_eq!(editor.process_events().unwrap(), 1);

    assert_eq!(editor.document().ids(), ids(&[1, 3]));
    assert_eq!(editor.selected_id(), None);
    assert!(!editor.surface().body.contains("data-element-id=\"2\""));
}

#[test]
fn test_delete_message_for_absent_block() {
    let mut editor = editor(&[1]);
    editor
        .event_sender()
        .post_message(r#"{"type":"deleteElement","elementId":5}"#)
        .unwrap();
    editor.process_events().unwrap();

    assert_eq!(editor.document().len(), 1);
}

#[test]
fn test_events_drain_in_arrival_order() {
    let mut editor = editor(&[1, 2]);
    let sender = editor.event_sender();
    sender
        .send(SurfaceEvent::SelectElement {
            element_id: BlockId(1),
        })
        .unwrap();
    sender
        .send(SurfaceEvent::DeleteElement {
            element_id: BlockId(1),
        })
        .unwrap();
    sender
        .send(SurfaceEvent::SelectElement {
            element_id: BlockId(2),
        })
        .unwrap();

    assert_eq!(editor.process_events().unwrap(), 3);
    assert_eq!(editor.document().ids(), ids(&[2]));
    assert_eq!(editor.selected_id(), Some(BlockId(2)));
    assert_eq!(editor.process_events().unwrap(), 0);
}

#[test]
fn test_surface_ready_rerenders() {
    let mut editor = editor(&[1]);
    let renders = editor.surface().renders;

    editor.event_sender().send(SurfaceEvent::SurfaceReady).unwrap();
    editor.process_events().unwrap();

    assert_eq!(editor.surface().renders, renders + 1);
}

#[test]
fn test_malformed_message_is_rejected() {
    let editor = editor(&[1]);
    assert!(editor
        .event_sender()
        .post_message(r#"{"type":"deleteElement","elementId":"two"}"#)
        .is_err());
}

#[test]
fn test_emptying_document_shows_placeholder() {
    let mut editor = editor(&[1]);
    editor
        .handle_event(SurfaceEvent::DeleteElement {
            element_id: BlockId(1),
        })
        .unwrap();

    assert!(editor.document().is_empty());
    assert!(editor.surface().body.starts_with("<div class=\"pb-empty\">"));
    assert_eq!(editor.export_body(), "");
}

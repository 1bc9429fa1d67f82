//! Static assets loaded into the preview surface.

/// Base styles for the preview document
pub const BASE_STYLES: &str = r#"
body { margin: 0; padding: 16px; font-family: system-ui, sans-serif; color: #222; }
img { max-width: 100%; }
.pb-empty { padding: 48px 16px; text-align: center; color: #888; border: 2px dashed #ddd; border-radius: 8px; }
.pb-element { position: relative; margin: 0 0 20px; padding: 8px; border: 1px dashed transparent; border-radius: 4px; cursor: pointer; }
.pb-element:hover { border-color: #9ab; }
.pb-element.selected { border: 1px solid #3b82f6; box-shadow: 0 0 0 2px rgba(59, 130, 246, 0.2); }
.pb-element.dragging { opacity: 0.4; }
.pb-element-error { border-color: #ef4444; }
.pb-element-error-message { font-size: 12px; color: #b91c1c; margin-bottom: 4px; }
.pb-delete { position: absolute; top: 4px; right: 4px; display: none; border: 0; border-radius: 3px; background: #ef4444; color: #fff; cursor: pointer; }
.pb-element:hover .pb-delete, .pb-element.selected .pb-delete { display: block; }
"#;

/// Relays gestures to the parent window as surface event messages.
///
/// Bindings are resolved from `data-action` / `data-element-id`, so the
/// script needs nothing from the embedding page.
pub const BOOTSTRAP_SCRIPT: &str = r#"
(function () {
  var options = window.__pagebuilder || {};
  function post(message) { window.parent.postMessage(message, '*'); }
  function idOf(el) { return Number(el.getAttribute('data-element-id')); }
  function wrapperOf(target) { return target.closest ? target.closest('.pb-element') : null; }

  document.addEventListener('click', function (e) {
    var action = e.target.closest ? e.target.closest('[data-action="delete"]') : null;
    if (action) {
      e.preventDefault();
      e.stopPropagation();
      post({ type: 'deleteElement', elementId: idOf(action) });
      return;
    }
    var el = wrapperOf(e.target);
    if (el && options.selection !== false) {
      post({ type: 'selectElement', elementId: idOf(el) });
    }
  });

  if (options.drag !== false) {
    document.addEventListener('dragstart', function (e) {
      var el = wrapperOf(e.target);
      if (!el) { return; }
      if (e.dataTransfer) { e.dataTransfer.effectAllowed = 'move'; }
      post({ type: 'dragStart', elementId: idOf(el) });
    });
    document.addEventListener('dragover', function (e) {
      e.preventDefault();
      post({ type: 'dragOver', y: e.clientY });
    });
    document.addEventListener('drop', function (e) {
      e.preventDefault();
      post({ type: 'drop' });
    });
    document.addEventListener('dragend', function () {
      post({ type: 'dragEnd' });
    });
  }

  post({ type: 'surfaceReady' });
})();
"#;

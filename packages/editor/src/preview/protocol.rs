//! Surface event protocol.
//!
//! Every gesture inside the preview crosses the isolation boundary as one
//! JSON message, e.g. `{ "type": "deleteElement", "elementId": 42 }`. The
//! surface glue posts them into an [`EventSender`]; the editor drains its
//! receiver in arrival order.
//!
//! Message origin is not checked. Hosts embedding untrusted content next
//! to the editor should filter before calling [`EventSender::post_message`].

use crate::document::BlockId;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Malformed surface message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Surface channel is closed")]
    Closed,
}

/// A gesture reported by the preview surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SurfaceEvent {
    /// Bootstrap script finished loading
    SurfaceReady,

    SelectElement {
        #[serde(rename = "elementId")]
        element_id: BlockId,
    },

    DragStart {
        #[serde(rename = "elementId")]
        element_id: BlockId,
    },

    /// Pointer position in surface coordinates
    DragOver { y: f64 },

    DragEnd,

    Drop,

    DeleteElement {
        #[serde(rename = "elementId")]
        element_id: BlockId,
    },
}

impl SurfaceEvent {
    pub fn from_json(json: &str) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Posting end of the surface channel
#[derive(Debug, Clone)]
pub struct EventSender(mpsc::UnboundedSender<SurfaceEvent>);

impl EventSender {
    pub fn send(&self, event: SurfaceEvent) -> Result<(), ProtocolError> {
        self.0.send(event).map_err(|_| ProtocolError::Closed)
    }

    /// Decode a raw message from the surface and queue it
    pub fn post_message(&self, json: &str) -> Result<(), ProtocolError> {
        self.send(SurfaceEvent::from_json(json)?)
    }
}

/// Draining end, owned by the editor
#[derive(Debug)]
pub struct EventReceiver(mpsc::UnboundedReceiver<SurfaceEvent>);

impl EventReceiver {
    /// Next queued event, if any
    pub fn try_next(&mut self) -> Option<SurfaceEvent> {
        self.0.try_recv().ok()
    }
}

pub fn channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSender(tx), EventReceiver(rx))
}

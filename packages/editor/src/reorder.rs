//! # Reorder Engine
//!
//! Pure geometry for drag-and-drop. While a block is dragged, every
//! `dragOver` asks which sibling the pointer sits above; the dragged block
//! is moved in front of it (or to the end). The model is only touched on
//! drop, when the surface's final order is committed.

use crate::document::BlockId;
use serde::{Deserialize, Serialize};

/// Vertical extent of a draggable element on the surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateBox {
    pub id: BlockId,
    pub top: f64,
    pub height: f64,
}

impl CandidateBox {
    pub fn new(id: BlockId, top: f64, height: f64) -> Self {
        Self { id, top, height }
    }

    /// Signed distance from the box's vertical midpoint to `y`
    pub fn offset(&self, y: f64) -> f64 {
        y - self.top - self.height / 2.0
    }
}

/// Boxes that can serve as anchors: everything except the dragged element
pub fn candidates(boxes: &[CandidateBox], dragged: BlockId) -> Vec<CandidateBox> {
    boxes.iter().copied().filter(|b| b.id != dragged).collect()
}

/// The element the dragged one should be inserted before, or `None` to append.
///
/// Picks the candidate whose midpoint lies below `y` and closest to it.
/// On a tie the earliest candidate wins.
pub fn drag_after_element(y: f64, candidates: &[CandidateBox]) -> Option<BlockId> {
    let mut closest: Option<(f64, BlockId)> = None;

    for candidate in candidates {
        let offset = candidate.offset(y);
        if offset >= 0.0 {
            continue;
        }
        match closest {
            Some((best, _)) if offset <= best => {}
            _ => closest = Some((offset, candidate.id)),
        }
    }

    closest.map(|(_, id)| id)
}

use crate::document::BlockId;
use crate::reorder::CandidateBox;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("Surface is not loaded")]
    NotLoaded,

    #[error("Surface element not found: {0}")]
    ElementNotFound(BlockId),

    #[error("Surface operation failed: {0}")]
    Dom(String),
}

/// The isolated rendering surface the preview is mirrored into.
///
/// Implementations hold only the rendered projection. During a drag the
/// surface's element order runs ahead of the document and is read back on
/// drop.
pub trait PreviewSurface {
    /// Load a complete preview document (styles, bootstrap script, body)
    fn load_document(&mut self, html: &str) -> Result<(), SurfaceError>;

    /// Replace the rendered body wholesale
    fn replace_body(&mut self, body: &str) -> Result<(), SurfaceError>;

    /// Draggable elements in their current on-surface order
    fn element_boxes(&self) -> Vec<CandidateBox>;

    /// Move `id` in front of `before`, or to the end when `before` is `None`
    fn move_element(&mut self, id: BlockId, before: Option<BlockId>) -> Result<(), SurfaceError>;

    /// Mark the element being dragged, or clear the mark
    fn set_dragging(&mut self, id: Option<BlockId>) -> Result<(), SurfaceError>;
}

/// Synthetic layout used by [`HeadlessSurface`]
pub const HEADLESS_TOP: f64 = 10.0;
pub const HEADLESS_HEIGHT: f64 = 50.0;
pub const HEADLESS_GAP: f64 = 20.0;

fn wrapper_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r#"class="pb-element[^"]*" data-element-id="(\d+)" draggable="(true|false)""#).ok()
        })
        .as_ref()
}

/// In-memory surface for tests and server-side use.
///
/// Lays draggable elements out in a fixed column: the first starts at
/// [`HEADLESS_TOP`], each is [`HEADLESS_HEIGHT`] tall and separated by
/// [`HEADLESS_GAP`].
#[derive(Debug, Default, Clone)]
pub struct HeadlessSurface {
    pub document: Option<String>,
    pub body: String,
    order: Vec<BlockId>,
    pub dragging: Option<BlockId>,

    /// Number of full document loads
    pub loads: usize,

    /// Number of body replacements
    pub renders: usize,

    /// Number of moves applied during drags
    pub moves: usize,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current on-surface order of draggable elements
    pub fn order(&self) -> &[BlockId] {
        &self.order
    }

    fn scan(&mut self) {
        let Some(pattern) = wrapper_pattern() else {
            self.order.clear();
            return;
        };
        self.order = pattern
            .captures_iter(&self.body)
            .filter(|caps| &caps[2] == "true")
            .filter_map(|caps| caps[1].parse().ok())
            .collect();
    }
}

impl PreviewSurface for HeadlessSurface {
    fn load_document(&mut self, html: &str) -> Result<(), SurfaceError> {
        self.document = Some(html.to_string());
        self.body = html.to_string();
        self.loads += 1;
        self.scan();
        Ok(())
    }

    fn replace_body(&mut self, body: &str) -> Result<(), SurfaceError> {
        if self.document.is_none() {
            return Err(SurfaceError::NotLoaded);
        }
        self.body = body.to_string();
        self.renders += 1;
        self.scan();
        Ok(())
    }

    fn element_boxes(&self) -> Vec<CandidateBox> {
        self.order
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let top = HEADLESS_TOP + index as f64 * (HEADLESS_HEIGHT + HEADLESS_GAP);
                CandidateBox::new(*id, top, HEADLESS_HEIGHT)
            })
            .collect()
    }

    fn move_element(&mut self, id: BlockId, before: Option<BlockId>) -> Result<(), SurfaceError> {
        let from = self
            .order
            .iter()
            .position(|x| *x == id)
            .ok_or(SurfaceError::ElementNotFound(id))?;
        let moved = self.order.remove(from);

        let to = match before {
            Some(anchor) => match self.order.iter().position(|x| *x == anchor) {
                Some(index) => index,
                None => {
                    self.order.insert(from, moved);
                    return Err(SurfaceError::ElementNotFound(anchor));
                }
            },
            None => self.order.len(),
        };

        self.order.insert(to, moved);
        self.moves += 1;
        Ok(())
    }

    fn set_dragging(&mut self, id: Option<BlockId>) -> Result<(), SurfaceError> {
        self.dragging = id;
        Ok(())
    }
}

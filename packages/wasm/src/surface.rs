//! Sandboxed `<iframe>` preview surface.

use pagebuilder_editor::reorder::CandidateBox;
use pagebuilder_editor::{BlockId, HostPage, PreviewSurface, SurfaceError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlIFrameElement};

const SANDBOX: &str = "allow-same-origin allow-scripts";
const ROOT_ID: &str = "pb-root";

fn dom_error(e: JsValue) -> SurfaceError {
    SurfaceError::Dom(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

/// Resolves container ids against the current page
#[derive(Debug, Default)]
pub struct BrowserHost;

impl HostPage for BrowserHost {
    type Surface = IframeSurface;

    fn create_surface(&mut self, container_id: &str) -> Option<IframeSurface> {
        let document = web_sys::window()?.document()?;
        let container = document.get_element_by_id(container_id)?;

        match IframeSurface::mount(&document, &container) {
            Ok(surface) => Some(surface),
            Err(e) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!(
                    "Could not create preview frame: {}",
                    e
                )));
                None
            }
        }
    }
}

/// Preview rendered into a sandboxed iframe's `srcdoc`
#[derive(Debug)]
pub struct IframeSurface {
    frame: HtmlIFrameElement,
}

impl IframeSurface {
    fn mount(document: &Document, container: &Element) -> Result<Self, SurfaceError> {
        let frame: HtmlIFrameElement = document
            .create_element("iframe")
            .map_err(dom_error)?
            .dyn_into()
            .map_err(|_| SurfaceError::Dom("created element is not an iframe".to_string()))?;

        frame.set_attribute("sandbox", SANDBOX).map_err(dom_error)?;
        frame.set_attribute("class", "pb-preview-frame").map_err(dom_error)?;
        frame.set_attribute("title", "Page preview").map_err(dom_error)?;
        container.append_child(&frame).map_err(dom_error)?;

        Ok(Self { frame })
    }

    pub fn frame(&self) -> &HtmlIFrameElement {
        &self.frame
    }

    fn content(&self) -> Result<Document, SurfaceError> {
        self.frame.content_document().ok_or(SurfaceError::NotLoaded)
    }

    fn root(&self) -> Result<Element, SurfaceError> {
        self.content()?
            .get_element_by_id(ROOT_ID)
            .ok_or(SurfaceError::NotLoaded)
    }

    fn wrapper(&self, id: BlockId) -> Result<Element, SurfaceError> {
        self.content()?
            .query_selector(&format!(".pb-element[data-element-id=\"{}\"]", id))
            .map_err(dom_error)?
            .ok_or(SurfaceError::ElementNotFound(id))
    }

    fn draggable(&self) -> Vec<Element> {
        let Ok(document) = self.content() else {
            return Vec::new();
        };
        let Ok(nodes) = document.query_selector_all(".pb-element[draggable=\"true\"]") else {
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

impl PreviewSurface for IframeSurface {
    fn load_document(&mut self, html: &str) -> Result<(), SurfaceError> {
        self.frame.set_srcdoc(html);
        Ok(())
    }

    fn replace_body(&mut self, body: &str) -> Result<(), SurfaceError> {
        match self.root() {
            Ok(root) => {
                root.set_inner_html(body);
                Ok(())
            }
            // Still loading: the surfaceReady message triggers a fresh render
            Err(SurfaceError::NotLoaded) => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn element_boxes(&self) -> Vec<CandidateBox> {
        self.draggable()
            .into_iter()
            .filter_map(|el| {
                let id = el.get_attribute("data-element-id")?.parse().ok()?;
                let rect = el.get_bounding_client_rect();
                Some(CandidateBox::new(id, rect.top(), rect.height()))
            })
            .collect()
    }

    fn move_element(&mut self, id: BlockId, before: Option<BlockId>) -> Result<(), SurfaceError> {
        let root = self.root()?;
        let moved = self.wrapper(id)?;
        let anchor = before.map(|b| self.wrapper(b)).transpose()?;

        root.insert_before(&moved, anchor.as_deref())
            .map_err(dom_error)?;
        Ok(())
    }

    fn set_dragging(&mut self, id: Option<BlockId>) -> Result<(), SurfaceError> {
        for el in self.draggable() {
            el.class_list().remove_1("dragging").map_err(dom_error)?;
        }
        if let Some(id) = id {
            self.wrapper(id)?
                .class_list()
                .add_1("dragging")
                .map_err(dom_error)?;
        }
        Ok(())
    }
}

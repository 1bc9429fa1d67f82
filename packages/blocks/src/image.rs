use crate::block_type::{foreign_props, BlockType};
use crate::escape::{escape_html, is_valid_url};
use crate::form;
use crate::props::{decode_over, Props};
use crate::value::{PropValue, PropertyError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageProps {
    pub src: String,
    pub alt: String,
    /// Rendered width in pixels; natural size when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self {
            src: "https://placehold.co/600x300".to_string(),
            alt: "Placeholder image".to_string(),
            width: None,
        }
    }
}

impl ImageProps {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            width: None,
        }
    }

    pub fn set(&mut self, key: &str, value: PropValue) -> Result<(), PropertyError> {
        match key {
            "src" => self.src = value.into_string(key)?,
            "alt" => self.alt = value.into_string(key)?,
            "width" => {
                let width = value.into_int(key)?;
                self.width = (width > 0).then_some(width);
            }
            _ => {
                return Err(PropertyError::UnknownKey {
                    block: "image".to_string(),
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Image;

impl BlockType for Image {
    fn name(&self) -> &str {
        "Image"
    }

    fn icon(&self) -> &str {
        "🖼"
    }

    fn default_props(&self) -> Props {
        Props::Image(ImageProps::default())
    }

    fn decode_props(&self, value: serde_json::Value) -> Result<Props, PropertyError> {
        decode_over(&ImageProps::default(), value).map(Props::Image)
    }

    fn render(&self, props: &Props) -> String {
        let Some(p) = props.as_image() else {
            foreign_props(self.name(), props);
            return String::new();
        };

        let mut html = String::from("<img");
        // Unsafe sources are dropped rather than emitted; validate() reports them
        if is_valid_url(&p.src) {
            html.push_str(&format!(" src=\"{}\"", escape_html(p.src.trim())));
        }
        html.push_str(&format!(" alt=\"{}\"", escape_html(&p.alt)));
        if let Some(width) = p.width {
            html.push_str(&format!(" width=\"{width}\""));
        }
        html.push('>');
        html
    }

    fn render_editor(&self, props: &Props) -> String {
        let Some(p) = props.as_image() else {
            return String::new();
        };

        [
            form::text_input("Image URL", "src", &p.src, "https://"),
            form::text_input("Alt text", "alt", &p.alt, "Describe the image"),
            form::number_input("Width (px)", "width", p.width, 1),
        ]
        .concat()
    }

    fn validate(&self, props: &Props) -> Option<String> {
        let Some(p) = props.as_image() else {
            return Some(foreign_props(self.name(), props));
        };

        if p.src.trim().is_empty() {
            Some("Image URL is required".to_string())
        } else if !is_valid_url(&p.src) {
            Some("Image URL must be an http(s), relative or data:image URL".to_string())
        } else if p.alt.trim().is_empty() {
            Some("Alt text is required for accessibility".to_string())
        } else {
            None
        }
    }
}

use crate::block_type::{foreign_props, BlockType};
use crate::escape::escape_html;
use crate::form;
use crate::props::{decode_over, Props};
use crate::value::{PropValue, PropertyError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphProps {
    pub text: String,
}

impl Default for ParagraphProps {
    fn default() -> Self {
        Self {
            text: "Write your paragraph text here.".to_string(),
        }
    }
}

impl ParagraphProps {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn set(&mut self, key: &str, value: PropValue) -> Result<(), PropertyError> {
        match key {
            "text" => self.text = value.into_string(key)?,
            _ => {
                return Err(PropertyError::UnknownKey {
                    block: "paragraph".to_string(),
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }
}

/// Body text; line breaks in the source become `<br>`
#[derive(Debug, Default, Clone, Copy)]
pub struct Paragraph;

impl BlockType for Paragraph {
    fn name(&self) -> &str {
        "Paragraph"
    }

    fn icon(&self) -> &str {
        "¶"
    }

    fn default_props(&self) -> Props {
        Props::Paragraph(ParagraphProps::default())
    }

    fn decode_props(&self, value: serde_json::Value) -> Result<Props, PropertyError> {
        decode_over(&ParagraphProps::default(), value).map(Props::Paragraph)
    }

    fn render(&self, props: &Props) -> String {
        let Some(p) = props.as_paragraph() else {
            foreign_props(self.name(), props);
            return String::new();
        };

        let body = escape_html(&p.text).replace('\n', "<br>");
        format!("<p>{body}</p>")
    }

    fn render_editor(&self, props: &Props) -> String {
        props
            .as_paragraph()
            .map(|p| form::text_area("Text", "text", &p.text, 5))
            .unwrap_or_default()
    }

    fn validate(&self, props: &Props) -> Option<String> {
        let Some(p) = props.as_paragraph() else {
            return Some(foreign_props(self.name(), props));
        };

        if p.text.trim().is_empty() {
            Some("Paragraph text cannot be empty".to_string())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_breaks_lines_after_escaping() {
        let props = Props::Paragraph(ParagraphProps::new("a < b\nsecond"));
        assert_eq!(Paragraph.render(&props), "<p>a &lt; b<br>second</p>");
    }

    #[test]
    fn test_empty_text_is_invalid_but_renders() {
        let props = Props::Paragraph(ParagraphProps::new(""));
        assert!(Paragraph.validate(&props).is_some());
        assert_eq!(Paragraph.render(&props), "<p></p>");
    }

    #[test]
    fn test_foreign_props_are_reported() {
        let props = Props::Custom(Default::default());
        assert_eq!(Paragraph.render(&props), "");
        assert!(Paragraph.validate(&props).unwrap().contains("custom"));
    }
}

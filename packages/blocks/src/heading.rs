use crate::block_type::{foreign_props, BlockType};
use crate::escape::escape_html;
use crate::form;
use crate::props::{decode_over, Props};
use crate::value::{PropValue, PropertyError};
use serde::{Deserialize, Serialize};

pub const MIN_LEVEL: i64 = 1;
pub const MAX_LEVEL: i64 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingProps {
    pub text: String,
    pub level: i64,
}

impl Default for HeadingProps {
    fn default() -> Self {
        Self {
            text: "New Heading".to_string(),
            level: 2,
        }
    }
}

impl HeadingProps {
    pub fn new(text: impl Into<String>, level: i64) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }

    pub fn set(&mut self, key: &str, value: PropValue) -> Result<(), PropertyError> {
        match key {
            "text" => self.text = value.into_string(key)?,
            "level" => self.level = value.into_int(key)?,
            _ => return Err(unknown(key)),
        }
        Ok(())
    }
}

/// Section heading, `<h1>` through `<h6>`
#[derive(Debug, Default, Clone, Copy)]
pub struct Heading;

impl BlockType for Heading {
    fn name(&self) -> &str {
        "Heading"
    }

    fn icon(&self) -> &str {
        "H"
    }

    fn default_props(&self) -> Props {
        Props::Heading(HeadingProps::default())
    }

    fn decode_props(&self, value: serde_json::Value) -> Result<Props, PropertyError> {
        decode_over(&HeadingProps::default(), value).map(Props::Heading)
    }

    fn render(&self, props: &Props) -> String {
        let Some(p) = props.as_heading() else {
            foreign_props(self.name(), props);
            return String::new();
        };

        // Out-of-range levels are reported by validate; render the nearest tag
        let level = p.level.clamp(MIN_LEVEL, MAX_LEVEL);
        format!("<h{level}>{}</h{level}>", escape_html(&p.text))
    }

    fn render_editor(&self, props: &Props) -> String {
        let Some(p) = props.as_heading() else {
            return String::new();
        };

        let levels: Vec<(i64, String)> = (MIN_LEVEL..=MAX_LEVEL)
            .map(|level| (level, format!("H{level}")))
            .collect();
        let options: Vec<(i64, &str)> = levels.iter().map(|(l, c)| (*l, c.as_str())).collect();

        [
            form::text_input("Text", "text", &p.text, "Heading text"),
            form::int_select("Level", "level", p.level, &options),
        ]
        .concat()
    }

    fn validate(&self, props: &Props) -> Option<String> {
        let Some(p) = props.as_heading() else {
            return Some(foreign_props(self.name(), props));
        };

        if p.text.trim().is_empty() {
            return Some("Heading text cannot be empty".to_string());
        }
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&p.level) {
            return Some(format!(
                "Heading level must be between {MIN_LEVEL} and {MAX_LEVEL}"
            ));
        }
        None
    }
}

fn unknown(key: &str) -> PropertyError {
    PropertyError::UnknownKey {
        block: "heading".to_string(),
        key: key.to_string(),
    }
}

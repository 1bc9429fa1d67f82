use crate::block_type::{foreign_props, BlockType};
use crate::escape::escape_html;
use crate::form;
use crate::props::{decode_over, Props};
use crate::value::{PropValue, PropertyError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListProps {
    pub items: Vec<String>,
    #[serde(default)]
    pub ordered: bool,
}

impl Default for ListProps {
    fn default() -> Self {
        Self {
            items: vec![
                "First item".to_string(),
                "Second item".to_string(),
                "Third item".to_string(),
            ],
            ordered: false,
        }
    }
}

impl ListProps {
    pub fn new<I, S>(items: I, ordered: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            ordered,
        }
    }

    /// `items` is edited as one line per item
    pub fn set(&mut self, key: &str, value: PropValue) -> Result<(), PropertyError> {
        match key {
            "items" => {
                let text = value.into_string(key)?;
                self.items = if text.is_empty() {
                    Vec::new()
                } else {
                    text.split('\n').map(|line| line.trim_end_matches('\r').to_string()).collect()
                };
            }
            "ordered" => self.ordered = value.into_bool(key)?,
            _ => {
                return Err(PropertyError::UnknownKey {
                    block: "list".to_string(),
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }
}

/// Bulleted or numbered list
#[derive(Debug, Default, Clone, Copy)]
pub struct List;

impl BlockType for List {
    fn name(&self) -> &str {
        "List"
    }

    fn icon(&self) -> &str {
        "☰"
    }

    fn default_props(&self) -> Props {
        Props::List(ListProps::default())
    }

    fn decode_props(&self, value: serde_json::Value) -> Result<Props, PropertyError> {
        decode_over(&ListProps::default(), value).map(Props::List)
    }

    fn render(&self, props: &Props) -> String {
        let Some(p) = props.as_list() else {
            foreign_props(self.name(), props);
            return String::new();
        };

        let tag = if p.ordered { "ol" } else { "ul" };
        let items: String = p
            .items
            .iter()
            .map(|item| format!("<li>{}</li>", escape_html(item)))
            .collect();
        format!("<{tag}>{items}</{tag}>")
    }

    fn render_editor(&self, props: &Props) -> String {
        let Some(p) = props.as_list() else {
            return String::new();
        };

        [
            form::text_area("Items (one per line)", "items", &p.items.join("\n"), 6),
            form::checkbox("Numbered list", "ordered", p.ordered),
        ]
        .concat()
    }

    fn validate(&self, props: &Props) -> Option<String> {
        let Some(p) = props.as_list() else {
            return Some(foreign_props(self.name(), props));
        };

        if p.items.is_empty() {
            Some("List must have at least one item".to_string())
        } else if p.items.iter().any(|item| item.trim().is_empty()) {
            Some("List items cannot be empty".to_string())
        } else {
            None
        }
    }
}

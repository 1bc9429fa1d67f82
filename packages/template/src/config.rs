//! Template configuration: doctype, `<html>`/`<body>` attributes and head content.
//!
//! [`TemplateConfig`] is always complete. Hosts usually supply a
//! [`PartialTemplateConfig`] (e.g. from JSON) which [`TemplateConfig::merged`]
//! layers over the defaults one field at a time.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Invalid template configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Attribute value: text, a number, or a boolean flag (`true` renders the bare name)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Flag(bool),
    Number(i64),
    Text(String),
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Flag(b)
    }
}

/// Attributes in source order
pub type Attributes = IndexMap<String, AttrValue>;

/// Build an [`Attributes`] map from `(name, value)` pairs
pub fn attributes<I, K, V>(pairs: I) -> Attributes
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<AttrValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// A `<script>` entry. With `content` it renders inline, otherwise it is
/// expected to carry a `src` attribute.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScriptTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl ScriptTag {
    pub fn external(src: impl Into<String>) -> Self {
        let src: String = src.into();
        Self {
            content: None,
            attributes: attributes([("src", src)]),
        }
    }

    pub fn inline(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            attributes: Attributes::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadConfig {
    pub title: String,
    pub meta: Vec<Attributes>,
    pub links: Vec<Attributes>,
    pub scripts: Vec<ScriptTag>,
    /// Raw markup appended to `<head>` unescaped
    pub custom_head: String,
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            title: "My Page".to_string(),
            meta: vec![
                attributes([("charset", "UTF-8")]),
                attributes([
                    ("name", "viewport"),
                    ("content", "width=device-width, initial-scale=1.0"),
                ]),
            ],
            links: Vec::new(),
            scripts: Vec::new(),
            custom_head: String::new(),
        }
    }
}

/// Complete template configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfig {
    pub doctype: String,
    pub html_attributes: Attributes,
    pub head: HeadConfig,
    pub body_attributes: Attributes,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            doctype: "<!DOCTYPE html>".to_string(),
            html_attributes: attributes([("lang", "en")]),
            head: HeadConfig::default(),
            body_attributes: Attributes::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialHeadConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Vec<Attributes>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Attributes>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scripts: Option<Vec<ScriptTag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_head: Option<String>,
}

/// Host-supplied configuration; every field optional
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialTemplateConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_attributes: Option<Attributes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<PartialHeadConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_attributes: Option<Attributes>,
}

impl PartialTemplateConfig {
    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TemplateConfig {
    /// Layer `partial` over the defaults
    pub fn from_partial(partial: &PartialTemplateConfig) -> Self {
        Self::default().merged(partial)
    }

    /// Layer `partial` over `self`.
    ///
    /// Attribute maps merge key by key. `meta`, `links` and `scripts` are
    /// replaced wholesale when present.
    pub fn merged(mut self, partial: &PartialTemplateConfig) -> Self {
        if let Some(doctype) = &partial.doctype {
            self.doctype = doctype.clone();
        }
        if let Some(attrs) = &partial.html_attributes {
            merge_attributes(&mut self.html_attributes, attrs);
        }
        if let Some(attrs) = &partial.body_attributes {
            merge_attributes(&mut self.body_attributes, attrs);
        }
        if let Some(head) = &partial.head {
            if let Some(title) = &head.title {
                self.head.title = title.clone();
            }
            if let Some(meta) = &head.meta {
                self.head.meta = meta.clone();
            }
            if let Some(links) = &head.links {
                self.head.links = links.clone();
            }
            if let Some(scripts) = &head.scripts {
                self.head.scripts = scripts.clone();
            }
            if let Some(custom) = &head.custom_head {
                self.head.custom_head = custom.clone();
            }
        }
        self
    }
}

fn merge_attributes(base: &mut Attributes, overrides: &Attributes) {
    for (name, value) in overrides {
        base.insert(name.clone(), value.clone());
    }
}

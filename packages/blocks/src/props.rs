//! Property records for block instances.
//!
//! Built-in kinds each own a structured record. Kinds registered at runtime
//! keep their properties in an ordered [`PropertyMap`].

use crate::heading::HeadingProps;
use crate::image::ImageProps;
use crate::list::ListProps;
use crate::paragraph::ParagraphProps;
use crate::value::{PropValue, PropertyError};
use indexmap::IndexMap;
use serde::Serialize;

/// Free-form properties of a custom block kind
pub type PropertyMap = IndexMap<String, PropValue>;

/// Properties of one block instance
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Props {
    Heading(HeadingProps),
    Paragraph(ParagraphProps),
    Image(ImageProps),
    List(ListProps),
    Custom(PropertyMap),
}

impl Props {
    /// Write one property, as bound by a form input's `data-prop`
    pub fn set(&mut self, key: &str, value: PropValue) -> Result<(), PropertyError> {
        match self {
            Props::Heading(p) => p.set(key, value),
            Props::Paragraph(p) => p.set(key, value),
            Props::Image(p) => p.set(key, value),
            Props::List(p) => p.set(key, value),
            Props::Custom(map) => {
                map.insert(key.to_string(), value);
                Ok(())
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    pub fn as_heading(&self) -> Option<&HeadingProps> {
        match self {
            Props::Heading(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_paragraph(&self) -> Option<&ParagraphProps> {
        match self {
            Props::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageProps> {
        match self {
            Props::Image(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListProps> {
        match self {
            Props::List(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_custom(&self) -> Option<&PropertyMap> {
        match self {
            Props::Custom(map) => Some(map),
            _ => None,
        }
    }

    /// Short label for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Props::Heading(_) => "heading",
            Props::Paragraph(_) => "paragraph",
            Props::Image(_) => "image",
            Props::List(_) => "list",
            Props::Custom(_) => "custom",
        }
    }
}

/// Decode `value` as a partial record layered over `defaults`.
///
/// Keys present in `value` win; missing keys keep their default.
pub(crate) fn decode_over<T>(defaults: &T, value: serde_json::Value) -> Result<T, PropertyError>
where
    T: Serialize + serde::de::DeserializeOwned,
{
    let mut merged = serde_json::to_value(defaults).map_err(|e| PropertyError::Decode(e.to_string()))?;

    match (merged.as_object_mut(), value) {
        (Some(base), serde_json::Value::Object(overrides)) => {
            for (key, v) in overrides {
                base.insert(key, v);
            }
        }
        (_, serde_json::Value::Null) => {}
        (_, other) => {
            return Err(PropertyError::Decode(format!(
                "expected an object, found {}",
                other
            )))
        }
    }

    serde_json::from_value(merged).map_err(|e| PropertyError::Decode(e.to_string()))
}

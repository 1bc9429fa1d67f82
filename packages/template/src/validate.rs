//! Advisory checks on a template configuration.
//!
//! A violation never blocks assembly; callers log it and carry on.

use crate::config::{AttrValue, Attributes, TemplateConfig};
use thiserror::Error;

pub const MAX_TITLE_LENGTH: usize = 200;

/// Meta entries must carry at least one of these
const META_KEYS: &[&str] = &["charset", "name", "property", "http-equiv"];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateViolation {
    #[error("Doctype must contain a DOCTYPE declaration: {0}")]
    InvalidDoctype(String),

    #[error("Title is {length} characters; the limit is 200")]
    TitleTooLong { length: usize },

    #[error("Meta entry {index} needs one of charset, name, property or http-equiv")]
    MetaMissingKey { index: usize },

    #[error("Link entry {index} is missing rel")]
    LinkMissingRel { index: usize },

    #[error("Stylesheet link {index} is missing href")]
    StylesheetMissingHref { index: usize },
}

/// Check `config`, returning the first rule it breaks
pub fn validate(config: &TemplateConfig) -> Result<(), TemplateViolation> {
    if !config.doctype.to_ascii_lowercase().contains("doctype") {
        return Err(TemplateViolation::InvalidDoctype(config.doctype.clone()));
    }

    let length = config.head.title.chars().count();
    if length > MAX_TITLE_LENGTH {
        return Err(TemplateViolation::TitleTooLong { length });
    }

    for (index, meta) in config.head.meta.iter().enumerate() {
        if !META_KEYS.iter().any(|key| has_value(meta, key)) {
            return Err(TemplateViolation::MetaMissingKey { index });
        }
    }

    for (index, link) in config.head.links.iter().enumerate() {
        let Some(rel) = text(link, "rel") else {
            return Err(TemplateViolation::LinkMissingRel { index });
        };
        let is_stylesheet = rel
            .split_whitespace()
            .any(|token| token.eq_ignore_ascii_case("stylesheet"));
        if is_stylesheet && !has_value(link, "href") {
            return Err(TemplateViolation::StylesheetMissingHref { index });
        }
    }

    Ok(())
}

fn has_value(attrs: &Attributes, key: &str) -> bool {
    match attrs.get(key) {
        Some(AttrValue::Text(s)) => !s.trim().is_empty(),
        Some(AttrValue::Number(_)) | Some(AttrValue::Flag(true)) => true,
        Some(AttrValue::Flag(false)) | None => false,
    }
}

fn text<'a>(attrs: &'a Attributes, key: &str) -> Option<&'a str> {
    match attrs.get(key) {
        Some(AttrValue::Text(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

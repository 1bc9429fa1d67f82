//! # Pagebuilder Template
//!
//! Turns exported body markup into a complete HTML document.
//!
//! ```text
//! PartialTemplateConfig ──merge──▶ TemplateConfig ──validate (advisory)
//!                                         │
//! body markup ────────────────────────────┴──▶ assemble ──▶ <!DOCTYPE html>…
//! ```
//!
//! Title, meta and link values are escaped. `customHead` is the one raw
//! fragment and is inserted as written.

mod assembler;
mod config;
mod validate;


pub use assembler::{assemble, assemble_with, render_attributes, AssembleOptions};
pub use config::{
    attributes, AttrValue, Attributes, HeadConfig, PartialHeadConfig, PartialTemplateConfig,
    ScriptTag, TemplateConfig, TemplateError,
};
pub use validate::{validate, TemplateViolation, MAX_TITLE_LENGTH};

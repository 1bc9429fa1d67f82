pub mod blocks;
pub mod check;
pub mod export;

pub use blocks::{blocks, BlocksArgs};
pub use check::{check, CheckArgs};
pub use export::{export, ExportArgs};

use crate::config::{resolve, Config};
use anyhow::{Context, Result};
use pagebuilder_blocks::BlockRegistry;
use pagebuilder_editor::Document;
use std::path::Path;

/// Read a saved block list with the project's enabled blocks
pub(crate) fn load_document(cwd: &str, path: &Path, config: &Config) -> Result<(Document, BlockRegistry)> {
    let path = resolve(cwd, path);
    let registry = config.registry()?;
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let document = Document::from_json(&json, &registry)
        .with_context(|| format!("Invalid document {}", path.display()))?;

    Ok((document, registry))
}

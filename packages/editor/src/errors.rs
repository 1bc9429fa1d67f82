//! Error types for the editor

use crate::clipboard::ClipboardError;
use crate::document::BlockId;
use crate::mutations::MutationError;
use crate::preview::{ProtocolError, SurfaceError};
use pagebuilder_blocks::{PropertyError, RegistryError};
use pagebuilder_template::TemplateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Unknown block type: {0}")]
    UnknownType(String),

    #[error("Block id {0} is out of range")]
    InvalidBlockId(BlockId),

    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("Property error: {0}")]
    Property(#[from] PropertyError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    #[error("Surface message error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),
}

impl From<RegistryError> for EditorError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::UnknownType(key) => EditorError::UnknownType(key),
        }
    }
}

impl EditorError {
    /// True for both the config-time and the `AddBlock` flavour
    pub fn is_unknown_type(&self) -> bool {
        matches!(
            self,
            EditorError::UnknownType(_) | EditorError::Mutation(MutationError::UnknownType(_))
        )
    }
}

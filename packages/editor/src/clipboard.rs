//! Clipboard collaborator.
//!
//! Writes may fail (permissions, insecure context). The editor then falls
//! back to the synchronous select-and-copy path and reports success the
//! same way.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClipboardError {
    #[error("Clipboard write rejected: {0}")]
    Rejected(String),

    #[error("Clipboard is unavailable")]
    Unavailable,
}

pub trait Clipboard {
    /// Preferred asynchronous-style write
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Synchronous fallback (temporary text area, select, copy)
    fn fallback_copy(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Discards everything; for hosts without a clipboard
#[derive(Debug, Default, Clone, Copy)]
pub struct NullClipboard;

impl Clipboard for NullClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Ok(())
    }

    fn fallback_copy(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Ok(())
    }
}

/// In-memory clipboard whose primary write can be made to fail
#[derive(Debug, Default, Clone)]
pub struct FlakyClipboard {
    /// Reject `write_text`
    pub fail_primary: bool,

    /// Reject `fallback_copy` as well
    pub fail_fallback: bool,

    pub contents: Option<String>,
    pub fallback_used: bool,
}

impl FlakyClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_primary: true,
            ..Default::default()
        }
    }

    pub fn broken() -> Self {
        Self {
            fail_primary: true,
            fail_fallback: true,
            ..Default::default()
        }
    }
}

impl Clipboard for FlakyClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail_primary {
            return Err(ClipboardError::Rejected("permission denied".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }

    fn fallback_copy(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.fallback_used = true;
        if self.fail_fallback {
            return Err(ClipboardError::Unavailable);
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

//! Rendering related error types

use thiserror::Error;

/// Errors raised while turning a descriptor tree into text
#[derive(Error, Debug)]
pub enum RenderError {
    /// The XML writer rejected an event
    #[error("Failed to write element '{element}': {message}")]
    Write { element: String, message: String },

    /// Writer output was not UTF-8
    #[error("Rendered document is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

impl RenderError {
    /// Create a write error for the named element
    pub fn write(element: &str, message: impl ToString) -> Self {
        Self::Write {
            element: element.to_string(),
            message: message.to_string(),
        }
    }
}

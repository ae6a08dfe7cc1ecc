//! Error types for the NFO generation core
//!
//! Errors are split by the stage that raises them: name validation while an
//! episode record is assembled, and rendering while a descriptor document is
//! turned into text.

use thiserror::Error;

pub mod render;
pub mod validation;

pub use self::render::RenderError;
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the core library
#[derive(Error, Debug)]
pub enum Error {
    /// Input could not be turned into a valid value
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Descriptor document could not be rendered
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl Error {
    /// Whether the error was caused by the input name rather than by rendering
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

//! Rendering errors.

use thiserror::Error;

/// Result alias for rendering.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors raised while producing HTML.
///
/// Bad input data never fails a render; only template machinery can.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A template failed to render
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

//! Rendering error types.

use thiserror::Error;

/// Errors that can occur while preparing render-side data.
#[derive(Error, Debug, PartialEq)]
pub enum RenderError {
    /// No color map with this name is registered.
    #[error("color map '{0}' not found")]
    ColorMapNotFound(String),

    /// A color map index past the end of the registry.
    #[error("color map index {index} out of range ({len} color maps)")]
    ColorMapIndexOutOfRange { index: usize, len: usize },

    /// Histogram values and weights differ in length.
    #[error("histogram has {values} values but {weights} weights")]
    WeightCountMismatch { values: usize, weights: usize },
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;

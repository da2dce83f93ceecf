//! Error types for the reelcrop-core library.
//!
//! Geometry itself never fails: degenerate layouts are a silent "not ready"
//! condition. Errors only come from the surface that validates host input,
//! such as building an [`EditorConfig`](crate::EditorConfig) or parsing an
//! aspect-ratio string.

use thiserror::Error;

/// Errors that can occur within the reelcrop-core library.
#[derive(Error, Debug)]
pub enum EditorError {
    /// Configuration value out of range or not finite.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A fixed aspect ratio must be a positive, finite number.
    #[error("Invalid aspect ratio: {0}")]
    InvalidAspectRatio(f64),

    /// An aspect ratio string could not be parsed.
    #[error("Cannot parse aspect ratio from {0:?} (expected \"free\", \"W:H\" or a number)")]
    InvalidRatioSpec(String),

    /// A media-space rectangle handed to the editor has no area.
    #[error("Crop area is empty or invalid")]
    EmptySelection,

    /// Scenario script deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EditorError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a ratio parsing error for the given input.
    pub fn ratio_spec(input: impl Into<String>) -> Self {
        Self::InvalidRatioSpec(input.into())
    }
}

/// A convenient alias for Result with [`EditorError`].
pub type Result<T> = std::result::Result<T, EditorError>;

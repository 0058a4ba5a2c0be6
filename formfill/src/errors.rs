use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AutomationError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Platform-specific error: {0}")]
    PlatformError(String),

    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Failures raised while turning a spreadsheet into [`crate::DataRow`]s.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Source file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to open source file '{}': {reason}", path.display())]
    Open { path: PathBuf, reason: String },

    #[error("Sheet '{sheet}' not found in '{}'.", path.display())]
    SheetNotFound { path: PathBuf, sheet: String },

    #[error("Failed to read rows: {0}")]
    Read(String),
}

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// A specialized `Result` type for bot operations.
pub type BotResult<T> = Result<T, BotError>;

/// The error type for everything that can stop a dance run.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("Window '{title}' not found. Is the game running?")]
    WindowNotFound { title: String },

    #[error("Failed to read client area of window '{title}': {description}")]
    WindowQueryFailed { title: String, description: String },

    #[error("Template '{name}' not found at {path:?}")]
    TemplateMissing { name: String, path: PathBuf },

    #[error("Failed to load template {path:?}: {source}")]
    TemplateLoadFailed {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("No template named '{name}' is loaded")]
    UnknownTemplate { name: String },

    #[error("Template '{name}' ({template_width}x{template_height}) is larger than the {image_width}x{image_height} frame")]
    TemplateTooLarge {
        name: String,
        template_width: u32,
        template_height: u32,
        image_width: u32,
        image_height: u32,
    },

    #[error("Screen capture failed: {description}")]
    CaptureFailed { description: String },

    #[error("Captured frame is {actual_width}x{actual_height}, expected {width}x{height}")]
    FrameSizeMismatch {
        width: u32,
        height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("Input injection failed: {description}")]
    InputFailed { description: String },

    #[error("Timed out after {duration:?} waiting for {}", .templates.join(", "))]
    Timeout {
        duration: Duration,
        templates: Vec<String>,
    },

    #[error("Snack slot {slot} is out of range (1..={available})")]
    SnackSlotOutOfRange { slot: u8, available: usize },

    #[error("Worker task failed to complete: {source}")]
    JoinError {
        #[from]
        source: tokio::task::JoinError,
    },

    #[error("The desktop backend is only available on Windows")]
    UnsupportedPlatform,
}

impl BotError {
    /// Whether this error is a wait that ran out of time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, BotError::Timeout { .. })
    }
}

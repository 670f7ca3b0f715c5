/// Template matching module for locating UI elements in captured frames
///
/// This module provides:
/// - Zero-mean normalized cross-correlation scoring (0.0-1.0)
/// - Concurrent matching of several templates against one frame
/// - A named template library loaded from a resources directory
pub mod library;
pub mod matcher;
pub mod types;

pub use library::TemplateLibrary;
pub use matcher::{match_all, match_template};
pub use types::{Match, Template};

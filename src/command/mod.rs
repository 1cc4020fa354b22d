mod commands;

use thiserror::Error;

use crate::error::UnknownShape;
use crate::state::LoadState;

pub use commands::Command;

/// Result type for command operations
pub type CommandResult = Result<(), CommandError>;

/// Reasons a command was skipped.
///
/// None of these are fatal: a rejected command leaves the scene exactly as it
/// was, and callers are expected to log and carry on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The canvas only accepts edits once the background has loaded
    #[error("canvas is not interactive while {0}")]
    NotInteractive(LoadState),
    #[error("no object is selected")]
    NoSelection,
    #[error("the selected object is not text")]
    NotText,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("export is unavailable until the image has loaded")]
    ExportUnavailable,
}

impl From<UnknownShape> for CommandError {
    fn from(error: UnknownShape) -> Self {
        CommandError::InvalidArgument(error.to_string())
    }
}

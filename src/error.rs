//! Error types for Guibox
//!
//! Only failures of the launcher itself live here. A build or run that the
//! container engine reports as failed is an [`Outcome`](crate::launcher::Outcome),
//! not an error.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid image reference '{reference}': {reason}")]
    InvalidImageRef { reference: String, reason: String },

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to wait for '{program}': {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to install Ctrl+C handler: {0}")]
    Signal(String),
}

impl LaunchError {
    /// Process exit code for this error, following the shell's conventions
    /// for commands that cannot be found (127) or executed (126).
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::Spawn { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => 127,
                io::ErrorKind::PermissionDenied => 126,
                _ => 1,
            },
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, LaunchError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_error(kind: io::ErrorKind) -> LaunchError {
        LaunchError::Spawn {
            program: "docker".to_string(),
            source: io::Error::from(kind),
        }
    }

    #[test]
    fn test_missing_program_exits_127() {
        assert_eq!(spawn_error(io::ErrorKind::NotFound).exit_code(), 127);
    }

    #[test]
    fn test_unexecutable_program_exits_126() {
        assert_eq!(spawn_error(io::ErrorKind::PermissionDenied).exit_code(), 126);
    }

    #[test]
    fn test_other_errors_exit_1() {
        assert_eq!(spawn_error(io::ErrorKind::Other).exit_code(), 1);
        assert_eq!(LaunchError::Config("bad".to_string()).exit_code(), 1);
    }

    #[test]
    fn test_spawn_message_names_program() {
        let msg = spawn_error(io::ErrorKind::NotFound).to_string();
        assert!(msg.starts_with("Failed to start 'docker'"));
    }
}

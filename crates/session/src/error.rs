//! Typed error types for command submission.

use std::io;
use std::path::{Path, PathBuf};

/// Failures reported by a [`Submit`](crate::Submit) implementation.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The application refused or failed to run the command.
    #[error("command rejected: {message}")]
    Rejected {
        /// Message from the application.
        message: String,
    },

    /// No connection to the application is open.
    #[error("not connected")]
    NotConnected,

    /// Writing the command to its destination failed.
    #[error("write failed: {0}")]
    WriteFailed(#[source] io::Error),

    /// A script file could not be opened.
    #[error("cannot open script '{}'", .path.display())]
    OpenFailed {
        /// The script path.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },
}

/// Failures surfaced by a [`Session`](crate::Session).
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A command was attempted and failed. It was not retried.
    #[error("failed to submit '{command}'{}", log_hint(.log_file.as_deref()))]
    SubmissionFailed {
        /// The literal command string that was attempted.
        command: String,
        /// Where the failure was logged, if logging to a file.
        log_file: Option<PathBuf>,
        /// The submitter's error.
        #[source]
        source: SubmitError,
    },

    /// A dry-run command could not be echoed.
    #[error("failed to echo dry-run command: {0}")]
    EchoFailed(#[source] SubmitError),
}

fn log_hint(log_file: Option<&Path>) -> String {
    log_file
        .map(|p| format!(" (details in {})", p.display()))
        .unwrap_or_default()
}

// Error taxonomy for the reporting transports

use std::io;
use std::path::PathBuf;

/// Errors surfaced by the reporting SDK.
///
/// Every variant names the operation or path it came from. Nothing is retried
/// or swallowed: the caller decides whether a failed report aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The report destination cannot be used.
    #[error("invalid report destination {}: {message}", .path.display())]
    Configuration {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<io::Error>,
    },

    /// The cross-process reporter lock could not be taken.
    #[error("failed to acquire reporter lock {}", .path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A model value could not be serialized.
    #[error("failed to encode {operation} as JSON")]
    Encoding {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A payload could not be decoded back into the model.
    #[error("failed to decode {operation} from {target}")]
    Decoding {
        operation: &'static str,
        target: String,
        #[source]
        source: serde_json::Error,
    },

    /// Writing to the pipe or a report file failed.
    #[error("{operation} failed on {target}")]
    Io {
        operation: &'static str,
        target: String,
        #[source]
        source: io::Error,
    },

    /// A JUnit XML report is malformed.
    #[error("malformed JUnit XML in {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: quick_xml::DeError,
    },

    /// A pipe stream contains a malformed frame.
    #[error("invalid frame in {target}: {message}")]
    Frame { target: String, message: String },

    /// The transport was already closed.
    #[error("reporter is closed")]
    Closed,
}

impl ReportError {
    pub(crate) fn io(operation: &'static str, target: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation,
            target: target.into(),
            source,
        }
    }

    pub(crate) fn decoding(
        operation: &'static str,
        target: impl Into<String>,
        source: serde_json::Error,
    ) -> Self {
        Self::Decoding {
            operation,
            target: target.into(),
            source,
        }
    }

    pub(crate) fn frame(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Frame {
            target: target.into(),
            message: message.into(),
        }
    }

    pub(crate) fn configuration(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Configuration {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

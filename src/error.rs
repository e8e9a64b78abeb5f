//! Error types for proxy list generation

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for an output path that already exists
pub const EXIT_OUTPUT_EXISTS: i32 = 3;

/// Exit code for an input file that did not produce a usable group
pub const EXIT_GROUP_FAILED: i32 = 4;

/// Exit code for every other failure
pub const EXIT_FAILURE: i32 = 1;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("output file already exists: {}", .path.display())]
    OutputExists { path: PathBuf },

    #[error("no proxy records found in {}", .path.display())]
    EmptyGroup { path: PathBuf },

    #[error("input path is not valid UTF-8: {}", .path.display())]
    NonUtf8Path { path: PathBuf },

    #[error("malformed proxy record{}: {reason}", file_suffix(.path))]
    MalformedRecord {
        path: Option<PathBuf>,
        reason: String,
    },

    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid proxy list document")]
    Json(#[from] serde_json::Error),

    #[error("proxy list document contains no records")]
    NoRecords,
}

fn file_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

impl GeneratorError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            path: None,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach the input path to a malformed record error that lacks one
    pub(crate) fn in_file(self, file: impl Into<PathBuf>) -> Self {
        match self {
            Self::MalformedRecord { path: None, reason } => Self::MalformedRecord {
                path: Some(file.into()),
                reason,
            },
            other => other,
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::OutputExists { .. } => EXIT_OUTPUT_EXISTS,
            Self::EmptyGroup { .. } | Self::NonUtf8Path { .. } | Self::MalformedRecord { .. } => {
                EXIT_GROUP_FAILED
            }
            Self::Io { .. } | Self::Json(_) | Self::NoRecords => EXIT_FAILURE,
        }
    }
}

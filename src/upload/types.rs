use crate::utils::constants::{MSG_INVALID_FILE_TYPE, MSG_NO_FILE_SELECTED, MSG_UNEXPECTED_ERROR};
use bytes::Bytes;
use serde_json::Value;
use std::path::PathBuf;

/// A failed attempt, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
    pub details: Vec<String>,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn generic() -> Self {
        Self::new(MSG_UNEXPECTED_ERROR)
    }

    pub fn invalid_type() -> Self {
        Self::new(MSG_INVALID_FILE_TYPE)
    }

    pub fn no_file_selected() -> Self {
        Self::new(MSG_NO_FILE_SELECTED)
    }

    /// Best-effort decode of an error body: UTF-8, then JSON. Any step that
    /// fails degrades to the generic failure.
    pub fn from_error_body(body: &[u8]) -> Self {
        let Ok(text) = std::str::from_utf8(body) else {
            return Self::generic();
        };
        let Ok(parsed) = serde_json::from_str::<Value>(text) else {
            return Self::generic();
        };

        // each field falls back on its own once the body is JSON
        let message = parsed
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(MSG_UNEXPECTED_ERROR)
            .to_string();
        let details = parsed
            .get("details")
            .and_then(Value::as_array)
            .and_then(|items| {
                items
                    .iter()
                    .map(|item| item.as_str().map(String::from))
                    .collect::<Option<Vec<_>>>()
            })
            .unwrap_or_default();
        Self { message, details }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadOutcome {
    #[default]
    NotAttempted,
    InProgress,
    Succeeded {
        message: String,
        saved_to: PathBuf,
    },
    Failed(Failure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Selecting,
    Uploading,
    Succeeded,
    Failed,
}

/// The artifact returned by a successful upload.
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

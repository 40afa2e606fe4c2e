//! Report panel: type and format selection, type-specific filters and the
//! download of the rendered file.

pub mod builder;
pub mod catalog;
pub mod request;

use std::io;
use std::path::PathBuf;

pub use builder::{ReportBuilder, ReportState, SavedReport};
pub use catalog::{FilterField, FilterOption, ReportFormat, ReportKind};
pub use request::{FilterDraft, ReportPayload, ReportRequest};

use crate::api::ApiError;

pub const GENERIC_FAILURE: &str = "Failed to generate report. Please try again.";
pub const NO_RESPONSE: &str = "No response from server. Check your connection.";
pub const INVALID_FILE_TYPE: &str = "Invalid file type received";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("select a report type first")]
    NoReportSelected,
    #[error("a report is already being generated")]
    Busy,
    #[error("{field} is not a filter of the {report} report")]
    FilterNotAvailable {
        field: &'static str,
        report: ReportKind,
    },
    #[error("invalid value '{value}' for {field}")]
    InvalidFilter { field: &'static str, value: String },
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("unable to save report to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ReportError {
    /// The alert text shown when generation fails.
    pub fn user_message(&self) -> String {
        match self {
            ReportError::Api(err) => failure_message(err),
            other => other.to_string(),
        }
    }
}

/// Map a failed report call to the message the panel shows.
pub fn failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Status {
            status,
            message,
            content_type,
        } => {
            let json = content_type
                .as_deref()
                .is_some_and(|value| value.contains("application/json"));
            if json {
                message.clone().unwrap_or_else(|| GENERIC_FAILURE.to_string())
            } else {
                format!("Server error: {status}")
            }
        }
        ApiError::Transport(_) => NO_RESPONSE.to_string(),
        ApiError::UnexpectedContentType(text) => text.clone(),
        ApiError::Unauthenticated | ApiError::Cancelled => err.to_string(),
        ApiError::Decode(_) | ApiError::InvalidRequest(_) => GENERIC_FAILURE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::server_error;

    #[test]
    fn failure_messages_follow_response_kind() {
        assert_eq!(
            failure_message(&server_error(400, Some("Invalid date range"))),
            "Invalid date range"
        );
        assert_eq!(
            failure_message(&ApiError::Status {
                status: 500,
                message: None,
                content_type: Some("application/json; charset=utf-8".to_string()),
            }),
            GENERIC_FAILURE
        );
        assert_eq!(
            failure_message(&ApiError::Status {
                status: 502,
                message: None,
                content_type: Some("text/html".to_string()),
            }),
            "Server error: 502"
        );
        assert_eq!(
            failure_message(&ApiError::Transport("connection reset".to_string())),
            NO_RESPONSE
        );
        assert_eq!(
            failure_message(&ApiError::UnexpectedContentType("quota exceeded".to_string())),
            "quota exceeded"
        );
        assert_eq!(failure_message(&ApiError::Decode("eof".to_string())), GENERIC_FAILURE);
    }
}

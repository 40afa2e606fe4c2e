use serde_json::Value;

/// Failure of a single API call. Every variant is non-fatal: views turn it into a
/// message and clear their loading flag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("not signed in; run `drive-admin login` first")]
    Unauthenticated,
    #[error("request cancelled")]
    Cancelled,
    #[error("no response from server: {0}")]
    Transport(String),
    #[error("server responded with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
        content_type: Option<String>,
    },
    #[error("unable to decode response: {0}")]
    Decode(String),
    #[error("{0}")]
    UnexpectedContentType(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// The `message` field of a JSON error body, when the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Text for the single alert/banner a failed action shows.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Unauthenticated | ApiError::Cancelled => self.to_string(),
            ApiError::UnexpectedContentType(message) => message.clone(),
            _ => self
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}

/// Pull `message` out of an error body when it is JSON.
pub(crate) fn extract_message(content_type: Option<&str>, body: &[u8]) -> Option<String> {
    let is_json = content_type
        .and_then(|raw| raw.parse::<mime::Mime>().ok())
        .map(|mime| mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON))
        .unwrap_or(false);
    if !is_json {
        return None;
    }

    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

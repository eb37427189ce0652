use thiserror::Error;

/// Failure while touching persisted client storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("storage error: {0}")]
pub struct StorageError(pub String);

/// Every way a call to the remote API can fail.
///
/// The `Display` text is what ends up in the inline error message of the
/// view that started the call, so server messages are passed through as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP 401. Carries the server message unmodified.
    #[error("{0}")]
    Unauthorized(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Parse error: {0}")]
    Decode(String),

    #[error("Serialization error: {0}")]
    Encode(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Inline message for the UI, never empty.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            match self.status() {
                Some(status) => format!("Request failed (HTTP {})", status),
                None => "Request failed".to_string(),
            }
        } else {
            message
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-success status
    #[error("{status}: {}", .message.as_deref().unwrap_or("request failed"))]
    Http {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(String),
    /// Rejected locally, nothing was sent
    #[error("{0}")]
    Invalid(String),
}

impl ClientError {
    /// What to show the user: the server's own error text when it sent one,
    /// `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Http {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Invalid(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

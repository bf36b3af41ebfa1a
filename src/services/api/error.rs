use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response. `message` is the server's own text when it sent one.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }
}

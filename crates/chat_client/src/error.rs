use thiserror::Error;

pub type Result<T, E = ChatClientError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ChatClientError {
    /// The backend answered with a non-success status
    #[error("Failed to get response from server.")]
    Status { status: u16 },

    #[error("Invalid chat response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to send chat request: {0}")]
    Dispatch(#[source] reqwest::Error),

    #[error("Invalid chat endpoint '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Failure reported by a non-HTTP backend, shown verbatim
    #[error("{0}")]
    Other(String),
}

/// Errors from the persistence and object-storage layer.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("Persistence API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode row: {0}")]
    Decode(#[from] serde_json::Error),

    /// A configured credential cannot be sent as an HTTP header.
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// A write that should have returned a row returned none.
    #[error("No row returned from {0}")]
    MissingRow(&'static str),
}

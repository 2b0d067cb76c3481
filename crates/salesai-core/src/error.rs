use thiserror::Error;

pub type Result<T> = std::result::Result<T, SalesAiError>;

#[derive(Debug, Error)]
pub enum SalesAiError {
    #[error("Invalid field '{field}': expected {expected}, got {found}")]
    InvalidField {
        field: String,
        expected: &'static str,
        found: String,
    },

    #[error("Retriever error: {0}")]
    Retriever(String),
}

/// Failures talking to the remote completion service.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Completion service returned no content")]
    EmptyResponse,

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("Failed to load reference table {path}: {reason}")]
    Load { path: String, reason: String },

    #[error("Reference table {0} has no usable rows")]
    Empty(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on order record: {0}")]
    Io(#[from] std::io::Error),

    #[error("Order store lock poisoned")]
    Poisoned,

    #[error("Order store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("Webhook transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Webhook answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Webhook is enabled but no url is configured")]
    MissingUrl,
}

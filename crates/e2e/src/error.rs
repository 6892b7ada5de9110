use crate::commands::a11y::Violation;

/// Errors raised by browser test commands and fixtures.
#[derive(Debug, thiserror::Error)]
pub enum E2eError {
    /// The underlying browser driver failed.
    #[error("Browser driver error: {0}")]
    Driver(String),

    /// A wait exceeded its deadline.
    #[error("Timed out after {timeout_ms}ms waiting for {what}")]
    Timeout { what: String, timeout_ms: u64 },

    /// The page was reachable but did not look as expected.
    #[error("Assertion failed: {0}")]
    Assertion(String),

    /// The accessibility spot-check found problems.
    #[error("{} accessibility violation(s) found", .0.len())]
    Accessibility(Vec<Violation>),

    /// The driver backend cannot perform this operation.
    #[error("Not supported by this browser driver: {0}")]
    Unsupported(&'static str),

    /// `wait_for` was called with an alias no mock registered.
    #[error("No mocked route registered as '@{0}'")]
    UnknownAlias(String),

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Browser-stored JSON could not be encoded or decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A fixture query failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;

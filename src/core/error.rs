use thiserror::Error;

/// Crate-wide error type.
///
/// Hosts embedding the address form never see these directly: fetch and
/// lookup failures are absorbed into empty lists / blank fields at the
/// service boundary. The variants exist so clients and internal plumbing
/// can propagate with `?` up to that boundary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

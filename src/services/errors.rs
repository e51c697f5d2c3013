use thiserror::Error;

/// Failure kinds surfaced by the catalog service.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// A required field is missing or a field failed validation.
    #[error("{0}")]
    Validation(String),
    /// Requested product was not found.
    #[error("Product not found")]
    NotFound,
    /// The image hosting service failed.
    #[error("image upload failed: {0}")]
    Upstream(String),
    /// Input could not be decoded, e.g. a malformed id or sizes payload.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// The store is unavailable or rejected the operation.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl ServiceError {
    /// Stable machine-readable name of the failure kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound => "not_found",
            Self::Upstream(_) => "upstream",
            Self::MalformedInput(_) => "malformed_input",
            Self::Persistence(_) => "persistence",
        }
    }
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

use serde::Serialize;

use crate::dto::products::ProductDto;
use crate::services::ServiceError;

/// Acknowledgement of a successful write.
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
    pub message: String,
}

impl AckResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub success: bool,
    pub products: Vec<ProductDto>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub success: bool,
    pub product: ProductDto,
}

/// Failure body shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    /// Machine-readable failure kind.
    pub error: &'static str,
    pub message: String,
}

impl From<&ServiceError> for ErrorResponse {
    fn from(value: &ServiceError) -> Self {
        Self {
            success: false,
            error: value.kind(),
            message: value.to_string(),
        }
    }
}

//! Error conversion glue between the domain, repository and service layers.
//!
//! The domain layer must not depend on repository or service error types, so
//! the `From` impls that cross those boundaries live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::RepositoryError;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(feature = "server")]
mod server {
    use crate::domain::types::TypeConstraintError;
    use crate::forms::products::AddProductFormError;
    use crate::image_store::ImageStoreError;
    use crate::repository::RepositoryError;
    use crate::services::ServiceError;

    impl From<TypeConstraintError> for ServiceError {
        fn from(val: TypeConstraintError) -> Self {
            ServiceError::MalformedInput(val.to_string())
        }
    }

    impl From<RepositoryError> for ServiceError {
        fn from(val: RepositoryError) -> Self {
            ServiceError::Persistence(val.to_string())
        }
    }

    impl From<ImageStoreError> for ServiceError {
        fn from(val: ImageStoreError) -> Self {
            ServiceError::Upstream(val.to_string())
        }
    }

    impl From<AddProductFormError> for ServiceError {
        fn from(val: AddProductFormError) -> Self {
            match val {
                AddProductFormError::MissingRequiredFields
                | AddProductFormError::Validation(_) => ServiceError::Validation(val.to_string()),
                AddProductFormError::MalformedSizes(_) => {
                    ServiceError::MalformedInput(val.to_string())
                }
                // The spooled temp file is ours; failing to read it back is a server fault.
                AddProductFormError::Upload(_) => ServiceError::Persistence(val.to_string()),
            }
        }
    }

}

//! Error conversion glue between the domain value objects and the layers above.
//!
//! The domain layer must not depend on service/repository error types, so the
//! conversions live here instead of next to [`TypeConstraintError`].

use crate::domain::types::TypeConstraintError;
#[cfg(feature = "server")]
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;
#[cfg(feature = "server")]
use crate::services::errors::ServiceError;

#[cfg(feature = "server")]
impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::BadRequest(val.to_string())
    }
}

#[cfg(feature = "server")]
impl From<FormError> for ServiceError {
    fn from(val: FormError) -> Self {
        ServiceError::BadRequest(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

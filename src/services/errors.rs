//! Typed failures surfaced by the service layer.

use std::fmt::Display;

use thiserror::Error;

use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A unique field value is already taken.
    #[error("{0}")]
    Duplicated(String),

    /// The request violates a business or input constraint.
    #[error("{0}")]
    BadRequest(String),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn customer_not_found(id: impl Display) -> Self {
        ServiceError::NotFound(format!("Customer {id} is not found"))
    }

    pub fn phone_already_exists(phone: impl Display) -> Self {
        ServiceError::Duplicated(format!("Phone number {phone} already exists"))
    }

    pub fn customer_under_age() -> Self {
        ServiceError::BadRequest("Customer must be at least 18 years old".to_string())
    }

    pub fn invalid_page_size() -> Self {
        ServiceError::BadRequest("Page size must not be less than one".to_string())
    }

    pub fn page_out_of_range(page: usize, size: usize) -> Self {
        ServiceError::BadRequest(format!("Page {page} of size {size} is out of range"))
    }
}

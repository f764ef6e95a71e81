//! DTO modules returned by the customer API.

pub mod customer;
pub mod error;

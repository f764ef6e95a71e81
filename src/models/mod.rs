//! Database models and configuration for the customer repository.

#[cfg(feature = "server")]
pub mod config;
pub mod customer;

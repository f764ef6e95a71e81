//! Configuration model loaded from external sources.

use serde::Deserialize;

use crate::db::SqliteSettings;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Base URL advertised as the development server in the OpenAPI document.
    pub dev_url: String,
    /// Base URL advertised as the production server in the OpenAPI document.
    pub prod_url: String,
    /// Connection tuning for the SQLite store; defaults apply when omitted.
    #[serde(default)]
    pub sqlite: SqliteSettings,
}

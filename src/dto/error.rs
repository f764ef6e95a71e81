use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned with every non-2xx API response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDto {
    #[schema(example = 404)]
    pub status_code: u16,
    #[schema(example = "Not Found")]
    pub title: String,
    #[schema(example = "Customer 1 is not found")]
    pub detail: String,
}

impl ErrorDto {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            title: status.canonical_reason().unwrap_or_default().to_string(),
            detail: detail.into(),
        }
    }
}

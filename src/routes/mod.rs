//! HTTP handlers and the translation of service errors into responses.

use std::fmt::{Debug, Display};

use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};

use crate::dto::error::ErrorDto;
use crate::services::ServiceError;

pub mod customer;
pub mod main;

/// Renders a [`ServiceError`] as a status code plus [`ErrorDto`] body.
pub fn error_response(err: ServiceError) -> HttpResponse {
    let status = match &err {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Duplicated(_) => StatusCode::CONFLICT,
        ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
        ServiceError::Repository(e) => {
            log::error!("Repository failure: {e}");
            return HttpResponse::InternalServerError().json(ErrorDto::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
            ));
        }
    };

    HttpResponse::build(status).json(ErrorDto::new(status, err.to_string()))
}

/// Wraps an extractor failure into a `400` response with an [`ErrorDto`] body.
fn bad_request<E>(err: E) -> actix_web::Error
where
    E: Debug + Display + 'static,
{
    let body = ErrorDto::new(StatusCode::BAD_REQUEST, err.to_string());
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

/// Registers the `/api` scope together with its extractor configuration.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| bad_request(err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| bad_request(err)))
        .app_data(web::PathConfig::default().error_handler(|err, _req| bad_request(err)))
        .service(
            web::scope("/api")
                .service(main::hello)
                .service(customer::get_customers)
                .service(customer::create_customer)
                .service(customer::get_customer)
                .service(customer::update_customer)
                .service(customer::delete_customer),
        );
}

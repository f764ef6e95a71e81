use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::forms::customer::{CreateCustomerForm, UpdateCustomerForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::customer as customer_service;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CustomersQueryParams {
    /// Substring of the customer name; omitted matches every customer.
    pub name: Option<String>,
    /// Zero-based page index, `0` when omitted.
    pub page: Option<u32>,
    /// Number of customers per page, `20` when omitted.
    pub size: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/customers/{customer_id}",
    params(("customer_id" = i32, Path, description = "Customer identifier")),
    responses(
        (status = 200, description = "Found customer", body = crate::dto::customer::CustomerGetDto),
        (status = 404, description = "Customer not found", body = crate::dto::error::ErrorDto)
    ),
    tag = "Customer APIs"
)]
#[get("/customers/{customer_id}")]
pub async fn get_customer(
    customer_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match customer_service::get_customer_by_id(repo.get_ref(), customer_id.into_inner()) {
        Ok(customer) => HttpResponse::Ok().json(customer),
        Err(err) => error_response(err),
    }
}

#[utoipa::path(
    get,
    path = "/api/customers",
    params(CustomersQueryParams),
    responses(
        (status = 200, description = "Found customers", body = crate::dto::customer::CustomerPageDto),
        (status = 400, description = "Invalid paging parameters", body = crate::dto::error::ErrorDto)
    ),
    tag = "Customer APIs"
)]
#[get("/customers")]
pub async fn get_customers(
    params: web::Query<CustomersQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = params.into_inner();
    let name = params.name.unwrap_or_default();

    match customer_service::get_customers_by_name(
        repo.get_ref(),
        &name,
        params.page.unwrap_or(0) as usize,
        params.size.unwrap_or(DEFAULT_PAGE_SIZE) as usize,
    ) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(err),
    }
}

#[utoipa::path(
    post,
    path = "/api/customers",
    request_body = CreateCustomerForm,
    responses(
        (status = 201, description = "Created customer successfully", body = crate::dto::customer::CustomerGetDto),
        (status = 400, description = "Customer is under age or payload is invalid", body = crate::dto::error::ErrorDto),
        (status = 409, description = "Phone number already exists", body = crate::dto::error::ErrorDto)
    ),
    tag = "Customer APIs"
)]
#[post("/customers")]
pub async fn create_customer(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateCustomerForm>,
) -> impl Responder {
    match customer_service::create_customer(repo.get_ref(), form) {
        Ok(customer) => HttpResponse::Created().json(customer),
        Err(err) => error_response(err),
    }
}

#[utoipa::path(
    put,
    path = "/api/customers/{customer_id}",
    params(("customer_id" = i32, Path, description = "Customer identifier")),
    request_body = UpdateCustomerForm,
    responses(
        (status = 204, description = "Updated customer successfully"),
        (status = 400, description = "Bad request", body = crate::dto::error::ErrorDto),
        (status = 404, description = "Customer not found", body = crate::dto::error::ErrorDto),
        (status = 409, description = "Conflict", body = crate::dto::error::ErrorDto)
    ),
    tag = "Customer APIs"
)]
#[put("/customers/{customer_id}")]
pub async fn update_customer(
    customer_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateCustomerForm>,
) -> impl Responder {
    match customer_service::update_customer(repo.get_ref(), customer_id.into_inner(), form) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

#[utoipa::path(
    delete,
    path = "/api/customers/{customer_id}",
    params(("customer_id" = i32, Path, description = "Customer identifier")),
    responses(
        (status = 204, description = "Deleted customer successfully"),
        (status = 404, description = "Customer not found", body = crate::dto::error::ErrorDto)
    ),
    tag = "Customer APIs"
)]
#[delete("/customers/{customer_id}")]
pub async fn delete_customer(
    customer_id: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match customer_service::delete_customer(repo.get_ref(), customer_id.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}

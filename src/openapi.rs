//! OpenAPI document describing the customer API.

use utoipa::OpenApi;
use utoipa::openapi::server::ServerBuilder;

use crate::dto::customer::{CustomerGetDto, CustomerPageDto};
use crate::dto::error::ErrorDto;
use crate::forms::customer::{CreateCustomerForm, UpdateCustomerForm};
use crate::models::config::ServerConfig;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Customer API",
        description = "CRUD API for customer records",
        version = "1.0",
        contact(name = "Customer API maintainers", email = "customers@example.com"),
        license(
            name = "Apache License Version 2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0"
        )
    ),
    paths(
        routes::main::hello,
        routes::customer::get_customer,
        routes::customer::get_customers,
        routes::customer::create_customer,
        routes::customer::update_customer,
        routes::customer::delete_customer,
    ),
    components(schemas(
        CustomerGetDto,
        CustomerPageDto,
        CreateCustomerForm,
        UpdateCustomerForm,
        ErrorDto
    )),
    tags(
        (name = "Customer APIs", description = "Customer management"),
        (name = "Hello", description = "Hello API")
    )
)]
pub struct ApiDoc;

/// Builds the OpenAPI document with the servers advertised by `config`.
pub fn build_openapi(config: &ServerConfig) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![
        ServerBuilder::new()
            .url(config.dev_url.clone())
            .description(Some("Development server"))
            .build(),
        ServerBuilder::new()
            .url(config.prod_url.clone())
            .description(Some("Production server"))
            .build(),
    ]);
    doc
}

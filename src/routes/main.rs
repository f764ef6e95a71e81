use actix_web::{HttpResponse, Responder, get, web};
use utoipa::openapi::OpenApi;

#[utoipa::path(
    get,
    path = "/api/hello",
    responses((status = 200, description = "Say hello successfully", body = String)),
    tag = "Hello"
)]
#[get("/hello")]
pub async fn hello() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Hello World!")
}

/// Serves the generated OpenAPI document.
#[get("/api-docs/openapi.json")]
pub async fn openapi_json(doc: web::Data<OpenApi>) -> impl Responder {
    HttpResponse::Ok().json(doc.get_ref())
}

//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::analyze::analyze,
        crate::api::analyze::root,
        crate::api::health::health
    ),
    components(schemas(
        crate::model::AnalyzeRequest,
        crate::model::AnalyzeResponse,
        crate::model::SourceRef,
        crate::model::Language,
        crate::api::analyze::ApiInfo,
        crate::api::health::HealthStatus,
        crate::api::error::ErrorResponse
    )),
    tags(
        (name = "analysis", description = "Article fact-check analysis"),
        (name = "health", description = "Liveness checks")
    ),
    info(
        title = "Impact-Lens API",
        description = "Structured fact-check analysis of news articles with knowledge-lookup enrichment"
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> impl Responder {
    match ApiDoc::openapi().to_yaml() {
        Ok(yaml) => HttpResponse::Ok().content_type("text/yaml").body(yaml),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render OpenAPI YAML");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}

//! REST API endpoints for article analysis

use actix_web::{HttpResponse, Responder, get, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::error::{ApiError, ErrorResponse};
use crate::model::{AnalyzeRequest, AnalyzeResponse};
use crate::service::AnalysisService;

/// Service metadata returned by the root endpoint
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiInfo {
    pub message: String,
    pub version: String,
}

/// Analyze a news article
///
/// Produces a claim summary, critical questions with answers, impact points
/// and sources. Questions the model could not answer from the article are
/// enriched with a follow-up knowledge lookup.
#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Analysis completed", body = AnalyzeResponse),
        (status = 400, description = "Text too short for analysis", body = ErrorResponse),
        (status = 500, description = "Analysis failed", body = ErrorResponse)
    ),
    tag = "analysis"
)]
#[post("/analyze")]
pub async fn analyze(
    service: web::Data<AnalysisService>,
    request: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, ApiError> {
    let response = service.analyze(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Service metadata
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service metadata", body = ApiInfo)
    ),
    tag = "analysis"
)]
#[get("/")]
pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(ApiInfo {
        message: "Impact-Lens API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Configure analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(analyze).service(root);
}

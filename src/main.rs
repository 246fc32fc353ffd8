use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod model;
mod service;

use model::Config;
use service::{AnalysisService, GeminiClient, ModelClient};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    let Some(api_key) = config.gemini_api_key.clone() else {
        tracing::error!("GEMINI_API_KEY is not set");
        return Err(std::io::Error::other("GEMINI_API_KEY is not set"));
    };

    let model: Arc<dyn ModelClient> = Arc::new(GeminiClient::new(&api_key, &config.gemini_model));
    let analysis_service = web::Data::new(AnalysisService::new(model));

    tracing::info!(
        bind_addr = %bind_addr,
        model = %config.gemini_model,
        "Starting Impact-Lens server"
    );

    let allowed_origins = config.cors.allowed_origins.clone();

    HttpServer::new(move || {
        // Browser extension clients need CORS; open unless origins are configured
        let cors = if allowed_origins.is_empty() {
            Cors::permissive()
        } else {
            allowed_origins
                .iter()
                .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
                .allow_any_method()
                .allow_any_header()
        };

        App::new()
            .wrap(cors)
            .app_data(analysis_service.clone())
            .configure(api::analyze::configure)
            .configure(api::health::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}

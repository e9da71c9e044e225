use actix_web::{middleware::Logger, web, App, HttpServer};
use ocr_auth::auth::{AuthGate, TokenService};
use ocr_auth::config::EnvConfig;
use ocr_auth::db::postgres_service::PostgresService;
use ocr_auth::ocr::{CliOcrBackend, OcrBackend};
use ocr_auth::routes::{configure_routes, ocr::UploadLimit};
use std::io;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // no secret, no server
    let config = EnvConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let tokens = TokenService::new(&config.jwt_secret)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    info!("{config:?}");

    let postgres_service = Arc::new(
        PostgresService::new(&config.db_url)
            .await
            .map_err(io::Error::other)?
    );

    let gate = web::Data::new(AuthGate::new(tokens, postgres_service.clone()));
    let backend: Arc<dyn OcrBackend> = Arc::new(CliOcrBackend::new(config.ocr.clone()));
    let backend = web::Data::from(backend);
    let limit = web::Data::new(UploadLimit(config.max_upload_bytes));

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(Arc::clone(&postgres_service)))
            .app_data(gate.clone())
            .app_data(backend.clone())
            .app_data(limit.clone())
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}

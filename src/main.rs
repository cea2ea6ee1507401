use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;
use quotation_generator::api::{configure_routes, ApiState};
use quotation_generator::AppConfig;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    tracing::info!("Starting Quotation Generator");

    // Load configuration
    let config = AppConfig::from_env()?;
    config.prepare_dirs()?;

    tracing::info!(
        writable_dir = %config.writable_dir.display(),
        font = %config.font_path().display(),
        "configuration loaded"
    );
    if !config.font_path().is_file() {
        tracing::warn!(
            font = %config.font_path().display(),
            "PDF font file is missing; PDF export will fail until it is installed"
        );
    }

    let host = config.host.clone();
    let port = config.port;

    // Initialize application state
    let state = web::Data::new(ApiState::new(config).await?);

    tracing::info!("Starting server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(TracingLogger::default())
            .wrap(middleware::Compress::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await?;

    Ok(())
}

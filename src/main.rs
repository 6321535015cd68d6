use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use stray_rank::config::Settings;
use stray_rank::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use stray_rank::services::{ReportsClient, SnapshotCache};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    init_logging(&settings.logging.level, &settings.logging.format);

    info!("Starting Stray Rank service...");

    let reports = match ReportsClient::new(
        settings.reports.endpoint.clone(),
        settings.reports.api_key.clone(),
        settings.reports.timeout_secs,
    ) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to create reports client: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::Other, e));
        }
    };

    info!("Reports client initialized ({})", settings.reports.endpoint);

    let snapshots = Arc::new(SnapshotCache::new(settings.cache.snapshot_ttl_secs));

    info!("Snapshot cache initialized (TTL: {}s)", settings.cache.snapshot_ttl_secs);

    let engine = settings.search.engine();

    info!(
        "Ranking engine initialized (fallback: {:?}, zoom: {:?})",
        settings.search.fallback(),
        settings.search.zoom_levels()
    );

    let app_state = AppState {
        reports,
        snapshots,
        engine,
        max_limit: settings.search.max_limit,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}

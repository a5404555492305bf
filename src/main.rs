use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use audit_match::config::{DirectoryKind, Settings};
use audit_match::core::Matcher;
use audit_match::routes::{self, handle_json_payload_error, AppState};
use audit_match::services::{CachedDirectory, ProviderDirectory, RemoteDirectory, StaticDirectory};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging(settings: &Settings) {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

fn build_directory(settings: &Settings) -> std::io::Result<Arc<dyn ProviderDirectory>> {
    let directory: Arc<dyn ProviderDirectory> = match settings.directory.kind {
        DirectoryKind::Static => {
            let directory = StaticDirectory::from_toml_path(&settings.directory.providers_path)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
            Arc::new(directory)
        }
        DirectoryKind::Remote => {
            let endpoint = settings.directory.endpoint.clone().ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "directory.endpoint is required for the remote directory",
                )
            })?;
            let directory = RemoteDirectory::new(
                endpoint,
                settings.directory.api_key.clone(),
                Duration::from_secs(settings.directory.timeout_secs),
            )
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
            Arc::new(directory)
        }
    };

    if !settings.cache.enabled {
        return Ok(directory);
    }

    info!(
        "Candidate cache enabled ({} entries, TTL: {}s)",
        settings.cache.capacity, settings.cache.ttl_secs
    );
    Ok(Arc::new(CachedDirectory::new(
        directory,
        settings.cache.capacity,
        settings.cache.ttl_secs,
    )))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings);

    info!("Starting audit matching service...");

    if let Some(threads) = settings.matching.worker_threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            error!("Failed to size scoring pool to {} threads: {}", threads, e);
        }
    }

    let directory = build_directory(&settings).map_err(|e| {
        error!("Failed to initialize provider directory: {}", e);
        e
    })?;

    info!("Provider directory initialized ({})", directory.name());

    let matcher = Matcher::new(settings.matching.parallel_threshold);

    info!(
        "Matcher initialized (parallel threshold: {}, timeout: {}ms)",
        settings.matching.parallel_threshold, settings.matching.timeout_ms
    );

    let app_state = AppState {
        directory,
        matcher,
        matching: settings.matching.clone(),
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

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the memorial map.
//!
//! Serves the filtered location set as GeoJSON plus the statistics and
//! configuration the front-end needs for its legend, filter panel and
//! initial view. The engine is built once at startup and shared read-only
//! by every worker.

mod handlers;

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use memorial_map_engine::{MapConfig, MapEngine};
use memorial_map_filter::FilterSpec;

/// Shared application state.
pub struct AppState {
    /// Loaded register and location groups.
    pub engine: Arc<MapEngine>,
    /// Configuration the engine was loaded with.
    pub config: Arc<MapConfig>,
    /// Filter used for parameters a request leaves out.
    pub default_filter: FilterSpec,
}

impl AppState {
    /// Builds the state for `engine` and `config`.
    #[must_use]
    pub fn new(engine: MapEngine, config: MapConfig) -> Self {
        let default_filter = config.default_filter();
        Self {
            engine: Arc::new(engine),
            config: Arc::new(config),
            default_filter,
        }
    }
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/config", web::get().to(handlers::config))
            .route("/categories", web::get().to(handlers::categories))
            .route("/areas", web::get().to(handlers::areas))
            .route("/locations", web::get().to(handlers::locations))
            .route("/stats", web::get().to(handlers::stats))
            .route("/stats/filtered", web::get().to(handlers::filtered_stats)),
    );
}

/// Starts the memorial map API server.
///
/// Binds to `BIND_ADDR` (default `127.0.0.1`) and `PORT` (default `8080`).
/// Front-end files are served from `static_dir` when it exists. This is a
/// regular async function; the caller provides the runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(
    engine: MapEngine,
    config: MapConfig,
    static_dir: Option<PathBuf>,
) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(engine, config));

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let static_dir = static_dir.filter(|dir| {
        let exists = dir.is_dir();
        if !exists {
            log::info!(
                "Static directory {} not found, serving the API only",
                dir.display()
            );
        }
        exists
    });

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        let app = App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure);

        match &static_dir {
            // Serve frontend static files
            Some(dir) => app.service(Files::new("/", dir.clone()).index_file("index.html")),
            None => app,
        }
    })
    .bind((bind_addr, port))?
    .run()
    .await
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Memorial map API server binary.
//!
//! Configuration comes from `MEMORIAL_MAP_CONFIG` (or the built-in
//! defaults); front-end files from `STATIC_DIR` (default `public`).

use std::path::PathBuf;

use memorial_map_engine::{MapConfig, MapEngine};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = MapConfig::resolve(None)?;
    let engine = MapEngine::load(&config)?;

    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string());

    memorial_map_server::run_server(engine, config, Some(PathBuf::from(static_dir))).await?;
    Ok(())
}

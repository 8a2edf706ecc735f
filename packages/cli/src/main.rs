#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the memorial map.
//!
//! Loads the victims register and the coordinate table, then prints
//! validation results, statistics or the filtered location list, writes a
//! GeoJSON export, or starts the API server.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use memorial_map_engine::{MapConfig, MapEngine};
use memorial_map_filter::FilterSpec;
use memorial_map_generate::{date_label, write_geojson};
use memorial_map_record::RecordStore;
use memorial_map_record::validate::validate;

#[derive(Parser)]
#[command(name = "memorial_map", about = "Memorial map of the August 1944 victims")]
struct Cli {
    /// Configuration file (defaults to `MEMORIAL_MAP_CONFIG`, then the built-in one)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Victims register CSV (overrides the configuration)
    #[arg(long, global = true)]
    records: Option<PathBuf>,
    /// Coordinate table TOML (overrides the configuration)
    #[arg(long, global = true)]
    coordinates: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the register for empty fields and malformed dates
    Validate {
        /// Exit with an error if any issue is found
        #[arg(long)]
        strict: bool,
    },
    /// Print totals per category, commune and date
    Stats,
    /// List the communes available to the commune filter
    Areas,
    /// List locations without coordinates, with TOML rows to fill in
    Missing,
    /// List the locations drawn under a filter
    Visible {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Write the filtered locations as a GeoJSON `FeatureCollection`
    Geojson {
        /// Output file
        #[arg(long, short)]
        output: PathBuf,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Start the API server
    Serve {
        /// Directory of front-end files to serve
        #[arg(long, default_value = "public")]
        static_dir: PathBuf,
    },
}

/// Filter options. Omitted options keep the configured default.
#[derive(Args)]
struct FilterArgs {
    /// Comma-separated categories (executions, combats, civilians); empty selects none
    #[arg(long)]
    categories: Option<String>,
    /// Comma-separated communes; empty means all
    #[arg(long)]
    areas: Option<String>,
    /// Inclusive start date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,
    /// Inclusive end date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
}

impl FilterArgs {
    fn to_spec(&self, config: &MapConfig) -> Result<FilterSpec, memorial_map_filter::FilterError> {
        FilterSpec::from_parts(
            self.categories.as_deref(),
            self.areas.as_deref(),
            self.from.as_deref(),
            self.to.as_deref(),
            &config.default_filter(),
        )
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut config = MapConfig::resolve(cli.config.as_deref())?;
    if let Some(records) = cli.records {
        config.data.records = records;
    }
    if cli.coordinates.is_some() {
        config.data.coordinates = cli.coordinates;
    }

    log::debug!("Using records from {}", config.data.records.display());

    match cli.command {
        Commands::Validate { strict } => {
            let store = RecordStore::load(&config.data.records)?;
            let issues = validate(store.records());
            log::info!("Validated {} records", store.len());
            for issue in &issues {
                println!("{issue}");
            }
            println!("{} record(s), {} issue(s)", store.len(), issues.len());
            if strict && !issues.is_empty() {
                return Err(format!("{} validation issue(s)", issues.len()).into());
            }
        }
        Commands::Stats => {
            let engine = MapEngine::load(&config)?;
            print_stats(&engine);
        }
        Commands::Areas => {
            let engine = MapEngine::load(&config)?;
            for option in engine.area_options() {
                println!("{:<30} {}", option.area, option.count);
            }
        }
        Commands::Missing => {
            let engine = MapEngine::load(&config)?;
            let missing = engine.unresolved();
            if missing.is_empty() {
                println!("Every location has coordinates.");
            }
            for location in &missing {
                println!(
                    "# {} / {} ({} record(s))",
                    location.area, location.site, location.count
                );
                println!("{}", location.stub());
            }
        }
        Commands::Visible { filter } => {
            let spec = filter.to_spec(&config)?;
            let engine = MapEngine::load(&config)?;
            let groups = engine.renderable(&spec);
            println!(
                "{:<22} {:<45} {:<11} {:>7}  DATES",
                "COMMUNE", "LIEU-DIT", "CATEGORY", "VICTIMS"
            );
            println!("{}", "-".repeat(110));
            for group in &groups {
                println!(
                    "{:<22} {:<45} {:<11} {:>7}  {}",
                    group.area(),
                    group.site(),
                    group.category().label(),
                    group.len(),
                    date_label(group)
                );
            }
            println!("{} location(s) shown", groups.len());
        }
        Commands::Geojson { output, filter } => {
            let spec = filter.to_spec(&config)?;
            let engine = MapEngine::load(&config)?;
            let collection = engine.geojson(&spec);
            write_geojson(&output, &collection)?;
            log::info!(
                "Exported {} location(s) to {}",
                engine.renderable(&spec).len(),
                output.display()
            );
        }
        Commands::Serve { static_dir } => {
            let engine = MapEngine::load(&config)?;
            log::info!("Starting API server...");
            actix_web::rt::System::new().block_on(memorial_map_server::run_server(
                engine,
                config,
                Some(static_dir),
            ))?;
        }
    }

    Ok(())
}

fn print_stats(engine: &MapEngine) {
    let stats = engine.statistics();
    let records = engine.store().records();

    println!("Victims:   {}", stats.total);
    println!("Communes:  {}", stats.distinct_areas);
    println!("Dates:     {}", stats.distinct_dates);
    println!("Locations: {}", engine.groups().len());
    println!();

    println!("By category");
    for row in &stats.per_category {
        println!("  {:<28} {:>5}", row.category.label(), row.count);
    }
    println!();

    println!("By commune");
    for row in &stats.per_area {
        println!("  {:<28} {:>5}", row.area, row.count);
    }
    println!();

    println!("By date");
    for row in memorial_map_analytics::by_date(records) {
        println!(
            "  {:<28} {:>5}",
            memorial_map_generate::format_date_fr(&row.date),
            row.count
        );
    }
    println!();

    println!("By status");
    for row in memorial_map_analytics::by_status(records) {
        println!("  {:<28} {:>5}", row.status, row.count);
    }
}

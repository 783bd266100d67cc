//! realmap: command-line interface for realmap-core
//!
//! Inspect the bundled (or any) realm dataset from a terminal, try the search
//! ranking, walk through a selection the way the map does, or run the HTTP
//! API.
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ realmap stats
//!
//! - List the landmarks
//!   $ realmap layer landmark
//!
//! - Show the info panel of a region
//!   $ realmap feature region 7
//!
//! - Search, then select the best hit
//!   $ realmap search winter
//!   $ realmap select "the wall"
//!
//! - Serve the API on another port
//!   $ realmap serve --port 8080
//!
//! Data source
//! -----------
//!
//! By default the CLI loads `realm.json` bundled with `realmap-core`. Use
//! `--input <path>` (or `REALMAP_DATA`) to point to a custom dataset; a
//! binary cache is kept next to that file.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use realmap_core::query::{parse_id, StoreQueryService};
use realmap_core::{
    Feature, FeatureId, FeatureKey, GeoStore, InfoPanel, LayerKind, MapSession, MapView,
    QueryService,
};
use tracing_subscriber::EnvFilter;

/// Prints what a map renderer would be asked to do.
struct ConsoleMap;

impl MapView for ConsoleMap {
    fn set_layer_visible(&mut self, kind: LayerKind, visible: bool) {
        println!("map: {} layer {kind}", if visible { "show" } else { "hide" });
    }

    fn highlight_region(&mut self, region: Option<FeatureId>) {
        match region {
            Some(id) => println!("map: highlight region {id}"),
            None => println!("map: clear highlight"),
        }
    }

    fn close_popup(&mut self) {
        println!("map: close popup");
    }

    fn focus(&mut self, feature: &Feature) {
        match feature.geometry.anchor() {
            Some([lon, lat]) => println!("map: focus {} at ({lon:.3}, {lat:.3})", feature.name),
            None => println!("map: focus {}", feature.name),
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let store = match &args.input {
        Some(path) => GeoStore::load_from_path(path)
            .with_context(|| format!("loading dataset {}", path.display()))?,
        None => GeoStore::load().context("loading bundled dataset")?,
    };

    match args.command {
        Commands::Stats => {
            let stats = store.stats();
            println!("Dataset statistics:");
            println!("  Regions: {}", stats.regions);
            println!("  Locations: {}", stats.locations);
            println!("  Landmarks: {}", stats.landmarks);
        }

        Commands::Layer { kind } => {
            let features = store.features(kind);
            if features.is_empty() {
                println!("No {kind} features");
            }
            for f in features {
                println!("{:>4}  {}", f.id, f.name);
            }
        }

        Commands::Feature { kind, id } => {
            let key = FeatureKey::new(kind, parse_id(&id)?);
            let feature = store
                .feature(key)
                .cloned()
                .with_context(|| format!("no {kind} with id {}", key.id))?;
            let service = StoreQueryService::new(store);
            let detail = service.feature_detail(key).await;
            let panel = InfoPanel::resolved(feature.name.clone(), kind, detail);
            print!("{}", panel.render_text());
        }

        Commands::Search { query, limit } => {
            let mut session = MapSession::new(StoreQueryService::new(store), ConsoleMap);
            session.load_map_data().await;
            let hits = session.index().search_ranked(&query);
            if hits.is_empty() {
                println!("No features found matching: {query}");
            }
            for hit in hits.iter().take(limit) {
                println!(
                    "{:<10} {:<9} {:>4}  {}",
                    format!("{:?}", hit.rank).to_lowercase(),
                    hit.entry.layer,
                    hit.entry.feature_id,
                    hit.entry.display_name
                );
            }
        }

        Commands::Select { query } => {
            let mut session = MapSession::new(StoreQueryService::new(store), ConsoleMap);
            session.load_map_data().await;
            let Some(best) = session.search(&query).first().map(|e| (*e).clone()) else {
                println!("No features found matching: {query}");
                return Ok(());
            };
            let panel = session.select_search_result(&best).await?;
            println!();
            print!("{}", panel.render_text());
        }

        Commands::Serve { host, port } => {
            realmap_server::run_server(store, &host, port).await?;
        }
    }

    Ok(())
}

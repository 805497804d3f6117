//! Catalog API
//!
//! REST API and CLI for the read-only racing and sports catalogs.

mod catalog;
mod cli;
mod config;
mod error;
mod routes;
mod service;
mod storage;
mod types;

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::routes::AppState;
use crate::service::open_services;
use crate::types::{EventsFilter, ListRacesRequestFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging (stderr keeps CLI output clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli::load_config(&cli)?;

    match cli.command {
        Commands::Serve { host, port } => run_server(config, host, port).await,
        Commands::Init => cli::run_init(&config),
        Commands::Races {
            meeting_ids,
            visible,
            order_by,
            format,
        } => {
            let filter = ListRacesRequestFilter {
                meeting_ids,
                visible,
                order_by,
            };
            cli::run_races(&config, filter, &format)
        }
        Commands::Race { id, format } => cli::run_race(&config, id, &format),
        Commands::Events {
            name,
            sport,
            order_by,
            format,
        } => {
            let filter = EventsFilter {
                name,
                sport,
                order_by,
            };
            cli::run_events(&config, filter, &format)
        }
    }
}

/// Run the API server.
async fn run_server(
    mut config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    // Override with CLI args
    if let Some(h) = host {
        config.server.host = h;
    }
    if let Some(p) = port {
        config.server.port = p;
    }

    tracing::info!("Configuration loaded");

    // Schema and seed data are ready before the listener opens
    let (racing, sports) = open_services(&config.database)?;
    tracing::info!("Catalog databases ready");

    let state = Arc::new(AppState { racing, sports });
    let app = routes::router(state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

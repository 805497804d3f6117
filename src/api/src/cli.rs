//! CLI commands for catalog-api.
//!
//! Supports API server mode and one-shot catalog queries against the
//! configured databases.

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::service::{open_racing_reader, open_services, open_sports_reader};
use crate::types::{
    Event, EventsFilter, GetRaceRequest, ListEventsRequest, ListRacesRequest,
    ListRacesRequestFilter, Race,
};

#[derive(Parser)]
#[command(name = "catalog-api")]
#[command(version, about = "Read-only racing and sports catalog API", long_about = None)]
pub struct Cli {
    /// Racing database path override
    #[arg(long, global = true)]
    pub racing_db: Option<PathBuf>,

    /// Sports database path override
    #[arg(long, global = true)]
    pub sports_db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Create the catalog schemas and seed dummy data
    Init,

    /// List races
    Races {
        /// Meeting ids to include
        #[arg(short, long, value_delimiter = ',')]
        meeting_ids: Vec<i64>,

        /// Only visible (true) or hidden (false) races
        #[arg(long, action = clap::ArgAction::Set)]
        visible: Option<bool>,

        /// Sort column (id, meeting_id, name, advertised_start_time)
        #[arg(short, long)]
        order_by: Option<String>,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Show a single race
    Race {
        #[arg(value_name = "ID")]
        id: i64,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// List sport events
    Events {
        /// Substring of the event name
        #[arg(short, long)]
        name: Option<String>,

        /// Exact sport name
        #[arg(short, long)]
        sport: Option<String>,

        /// Sort column (id, name, sport, location, advertised_start_time)
        #[arg(short, long)]
        order_by: Option<String>,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },
}

/// Load configuration and apply database path overrides.
pub fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load()?;

    if let Some(path) = &cli.racing_db {
        config.database.racing_path = path.to_string_lossy().to_string();
    }
    if let Some(path) = &cli.sports_db {
        config.database.sports_path = path.to_string_lossy().to_string();
    }

    Ok(config)
}

/// Create schemas and seed both databases.
pub fn run_init(config: &AppConfig) -> anyhow::Result<()> {
    open_services(&config.database)?;
    eprintln!(
        "Initialized {} and {}",
        config.database.racing_path, config.database.sports_path
    );
    Ok(())
}

/// List races from the racing database.
pub fn run_races(
    config: &AppConfig,
    filter: ListRacesRequestFilter,
    format: &str,
) -> anyhow::Result<()> {
    let racing = open_racing_reader(&config.database)?;
    let response = racing.list_races(ListRacesRequest {
        filter: Some(filter),
    })?;

    if format == "table" {
        print_races_table(&response.races);
        Ok(())
    } else {
        print_json(format, &response)
    }
}

/// Show one race.
pub fn run_race(config: &AppConfig, id: i64, format: &str) -> anyhow::Result<()> {
    let racing = open_racing_reader(&config.database)?;
    let race = racing.get_race(GetRaceRequest { id })?;

    if format == "table" {
        print_races_table(std::slice::from_ref(&race));
        Ok(())
    } else {
        print_json(format, &race)
    }
}

/// List events from the sports database.
pub fn run_events(config: &AppConfig, filter: EventsFilter, format: &str) -> anyhow::Result<()> {
    let sports = open_sports_reader(&config.database)?;
    let response = sports.list_events(ListEventsRequest {
        filter: Some(filter),
    })?;

    if format == "table" {
        print_events_table(&response.events);
        Ok(())
    } else {
        print_json(format, &response)
    }
}

fn print_json<T: Serialize>(format: &str, value: &T) -> anyhow::Result<()> {
    if format != "json" {
        eprintln!("Unknown format: {}. Using JSON.", format);
    }
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print races in table format.
fn print_races_table(races: &[Race]) {
    println!(
        "  {:>5} {:>8} {:24} {:>6} {:>7} {:25} {:6}",
        "ID", "Meeting", "Name", "Number", "Visible", "Start", "Status"
    );
    println!("  {}", "-".repeat(88));
    for race in races {
        println!(
            "  {:>5} {:>8} {:24} {:>6} {:>7} {:25} {:6}",
            race.id,
            race.meeting_id,
            race.name,
            race.number,
            race.visible,
            race.advertised_start_time.to_rfc3339(),
            race.status
        );
    }
    println!();
    println!("{} races", races.len());
}

/// Print events in table format.
fn print_events_table(events: &[Event]) {
    println!(
        "  {:>5} {:32} {:12} {:10} {:25} {:6}",
        "ID", "Name", "Sport", "Location", "Start", "Status"
    );
    println!("  {}", "-".repeat(96));
    for event in events {
        println!(
            "  {:>5} {:32} {:12} {:10} {:25} {:6}",
            event.id,
            event.name,
            event.sport,
            event.location,
            event.advertised_start_time.to_rfc3339(),
            event.status
        );
    }
    println!();
    println!("{} events", events.len());
}

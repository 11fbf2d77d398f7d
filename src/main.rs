mod cli;
mod config;
mod db;
mod error;
mod models;
mod prayer_times;
mod qibla;
mod tui;
mod utils;
mod zakat;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // Commands that never touch the database
    match &cli.command {
        Some(Commands::Setup { reset }) => return handlers::handle_setup(&mut config, *reset),
        Some(Commands::Qibla { city, coords }) => {
            return handlers::handle_qibla(&config, city.as_deref(), coords, cli.json);
        }
        Some(Commands::Zakat(args)) => return handlers::handle_zakat(&config, args, cli.json),
        Some(Commands::Hijri { date }) => {
            return handlers::handle_hijri(&config, date.as_deref(), cli.json);
        }
        Some(Commands::Cities) => return handlers::handle_cities(&config, cli.json),
        Some(Commands::Events) => return handlers::handle_events(cli.json),
        Some(Commands::Quote) => return handlers::handle_quote(cli.json),
        _ => {}
    }

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;
    info!("using database {:?}", db_path);

    // Enable WAL mode for better concurrent access
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;

    match cli.command {
        Some(Commands::Times { city, coords, date }) => {
            handlers::handle_times(&conn, &config, city.as_deref(), &coords, date.as_deref(), cli.json)?;
        }
        Some(Commands::Status { action }) => {
            handlers::handle_status(&conn, &action, cli.json)?;
        }
        Some(Commands::Cache { action }) => {
            handlers::handle_cache(&conn, &action)?;
        }
        Some(_) => unreachable!(),

        // No subcommand → launch TUI
        None => {
            tui::app::run(conn, config)?;
        }
    }

    Ok(())
}

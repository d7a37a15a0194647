mod cli;
mod config;
mod db;
mod features;
mod models;
mod prayer_times;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::{SqliteStore, Storage};

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Loading config")?;

    // Commands that never touch the database
    match &cli.command {
        Some(Commands::Config { action }) => return handlers::handle_config(&config, action),
        Some(Commands::Calc { expr }) => return handlers::handle_calc(expr),
        Some(Commands::Clock { words, hour24 }) => {
            return handlers::handle_clock(&config, *words, *hour24);
        }
        _ => {}
    }

    let storage = open_storage(&config)?;

    match cli.command {
        Some(cmd) => match cmd {
            Commands::Stopwatch { action } => handlers::handle_stopwatch(&storage, &action)?,
            Commands::Tasbeeh { action } => handlers::handle_tasbeeh(&storage, &config, &action)?,
            Commands::Note { action } => handlers::handle_note(&storage, &action)?,
            Commands::Todo { action } => handlers::handle_todo(&storage, &action)?,
            Commands::Calendar { action } => handlers::handle_calendar(&storage, &action)?,
            Commands::Finance { action } => handlers::handle_finance(&storage, &action)?,
            Commands::Habit { action } => handlers::handle_habit(&storage, &action)?,
            Commands::Alarm { action } => handlers::handle_alarm(&storage, &action)?,
            Commands::Prayer { action } => handlers::handle_prayer(&storage, &config, &action)?,
            Commands::Data { action } => handlers::handle_data(&storage, &action)?,
            Commands::Config { .. } | Commands::Calc { .. } | Commands::Clock { .. } => {
                unreachable!()
            }
        },

        // No subcommand → launch TUI
        None => tui::app::run(storage, config)?,
    }

    Ok(())
}

fn open_storage(config: &AppConfig) -> Result<Storage> {
    config.ensure_data_dir()?;
    let db_path = config.db_path()?;
    log::debug!("opening store at {:?}", db_path);
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;
    Ok(Storage::new(store))
}

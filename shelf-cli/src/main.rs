//! game-shelf CLI
//!
//! Command-line interface for tracking a video game collection.

mod cli_types;
mod commands;
mod error;

use std::io::Write;

use clap::Parser;
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose, cli.json);

    if let Err(e) = run(cli) {
        log::error!("{} {}", "\u{2718}".if_supports_color(Stdout, |t| t.red()), e);
        std::process::exit(1);
    }
}

/// Set up `env_logger`. Info lines are the CLI's normal output and print
/// bare; `--verbose` adds timestamps and levels. `RUST_LOG` overrides.
fn init_logging(quiet: bool, verbose: bool, json: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| match record.level() {
            Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level, record.args()),
        });
    }
    // JSON goes to stdout untouched; everything else is chatter.
    builder.target(if json {
        env_logger::Target::Stderr
    } else {
        env_logger::Target::Stdout
    });
    builder.parse_default_env();
    builder.init();
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        db,
        memory,
        json,
        command,
        ..
    } = cli;
    let open = || commands::open_collection(db.clone(), memory);

    match command {
        Commands::Add { fields } => commands::games::run_add(&open()?, fields, json),
        Commands::List { filter } => commands::games::run_list(&open()?, filter, json),
        Commands::Show { id } => commands::games::run_show(&open()?, &id, json),
        Commands::Update { id, fields } => commands::games::run_update(&open()?, &id, fields, json),
        Commands::Delete { id } => commands::games::run_delete(&open()?, &id, json),
        Commands::Favorite { id } => commands::games::run_favorite(&open()?, &id, json),
        Commands::Stats => commands::stats::run_stats(&open()?, json),
        Commands::Filters => commands::stats::run_filters(&open()?, json),
        Commands::Export { output } => commands::transfer::run_export(&open()?, output),
        Commands::Import { path } => commands::transfer::run_import(&open()?, &path, json),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(db.clone(), memory, json),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::SetDb { path } => commands::config::run_config_set_db(path),
        },
    }
}

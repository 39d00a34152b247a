use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelf_lib::settings;

use super::print_json;
use crate::CliError;

/// Show the settings file and the database the CLI would open.
pub(crate) fn run_config_show(
    db_override: Option<PathBuf>,
    memory: bool,
    json: bool,
) -> Result<(), CliError> {
    let settings_path = settings::settings_path();
    let configured = settings::load_database_path(&settings_path);
    let source = if memory {
        "in-memory"
    } else if db_override.is_some() {
        "--db flag"
    } else if configured.is_some() {
        "settings file"
    } else {
        "default"
    };
    let database = settings::resolve_database_path(db_override);

    if json {
        return print_json(&serde_json::json!({
            "settings_path": settings_path.display().to_string(),
            "database": if memory { None } else { Some(database.display().to_string()) },
            "source": source,
        }));
    }

    log::info!("{}", "Settings".if_supports_color(Stdout, |t| t.bold()));
    if settings_path.exists() {
        log::info!(
            "  Settings file: {} {}",
            settings_path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            settings_path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    if memory {
        log::info!("  Database:      {}", "in-memory".if_supports_color(Stdout, |t| t.yellow()));
    } else {
        log::info!(
            "  Database:      {} {}",
            database.display().if_supports_color(Stdout, |t| t.cyan()),
            format!("({source})").if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    if let Some(contents) = settings::load_settings_string() {
        crate::log_blank();
        for line in contents.lines() {
            log::info!("  {}", line);
        }
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    println!("{}", settings::settings_path().display());
    Ok(())
}

/// Save (or clear) the default database path.
pub(crate) fn run_config_set_db(path: Option<PathBuf>) -> Result<(), CliError> {
    let settings_path = settings::settings_path();
    let path = path.map(std::path::absolute).transpose()?;
    settings::save_database_path(&settings_path, path.as_deref())?;

    match path {
        Some(p) => log::info!(
            "{} Database path set to {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            p.display().if_supports_color(Stdout, |t| t.cyan()),
        ),
        None => log::info!(
            "{} Database path reset to the default ({})",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            settings::default_database_path().display(),
        ),
    }
    Ok(())
}

use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelf_catalog::{load_seed, write_export};

use super::{print_json, Shelf};
use crate::CliError;

/// Export every game, oldest first, to a file or stdout.
pub(crate) fn run_export(shelf: &Shelf, output: Option<PathBuf>) -> Result<(), CliError> {
    let doc = shelf.export()?;
    match output {
        Some(path) => {
            write_export(&doc, &path)?;
            log::info!(
                "{} Exported {} game(s) to {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                doc.total_games,
                path.display().if_supports_color(Stdout, |t| t.cyan()),
            );
            Ok(())
        }
        None => print_json(&doc),
    }
}

pub(crate) fn run_import(shelf: &Shelf, path: &Path, json: bool) -> Result<(), CliError> {
    let inputs = load_seed(path)?;
    log::debug!("Loaded {} seed entries from {}", inputs.len(), path.display());
    let stats = shelf.import(inputs)?;

    if json {
        let rejected: Vec<_> = stats
            .rejected
            .iter()
            .map(|(index, title, violations)| {
                serde_json::json!({
                    "index": index,
                    "title": title,
                    "violations": violations.iter().map(|v| v.to_string()).collect::<Vec<_>>(),
                })
            })
            .collect();
        return print_json(&serde_json::json!({
            "created": stats.created,
            "rejected": rejected,
        }));
    }

    log::info!(
        "{} Imported {} game(s) from {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stats.created,
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    if !stats.rejected.is_empty() {
        log::warn!("{} entries were rejected:", stats.rejected.len());
        for (index, title, violations) in &stats.rejected {
            log::warn!("  #{} {}", index + 1, title);
            for violation in violations {
                log::warn!("    {}", violation);
            }
        }
    }
    Ok(())
}

use std::fmt::Display;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelf_catalog::GroupCount;

use super::{print_json, Shelf};
use crate::CliError;

fn print_groups<K: Display>(heading: &str, groups: &[GroupCount<K>]) {
    if groups.is_empty() {
        return;
    }
    crate::log_blank();
    log::info!("{}", heading.if_supports_color(Stdout, |t| t.bold()));
    for group in groups {
        log::info!("  {:<24} {:>6}", group.key.to_string(), group.count);
    }
}

pub(crate) fn run_stats(shelf: &Shelf, json: bool) -> Result<(), CliError> {
    let stats = shelf.stats()?;
    if json {
        return print_json(&stats);
    }

    log::info!(
        "{}",
        "Collection Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Games:          {:>8}", stats.total);
    log::info!("  Completed:      {:>8}", stats.completed);
    log::info!("  Favorites:      {:>8}", stats.favorites);
    log::info!("  Hours played:   {:>8.1}", stats.total_play_hours);
    log::info!("  Avg. score:     {:>8}", stats.avg_score);

    print_groups("By genre", &stats.by_genre);
    print_groups("By platform", &stats.by_platform);
    print_groups("By release year", &stats.by_year);
    Ok(())
}

pub(crate) fn run_filters(shelf: &Shelf, json: bool) -> Result<(), CliError> {
    let options = shelf.filter_options()?;
    if json {
        return print_json(&options);
    }

    let sections: [(&str, &[String]); 4] = [
        ("Genres", options.genres.as_slice()),
        ("Platforms", options.platforms.as_slice()),
        ("Publishers", options.publishers.as_slice()),
        ("Developers", options.developers.as_slice()),
    ];
    for (i, (heading, values)) in sections.iter().enumerate() {
        if i > 0 {
            crate::log_blank();
        }
        log::info!("{}:", heading.if_supports_color(Stdout, |t| t.bold()));
        if values.is_empty() {
            log::info!("  {}", "(none)".if_supports_color(Stdout, |t| t.dimmed()));
        }
        for value in values.iter() {
            log::info!("  {}", value);
        }
    }
    Ok(())
}

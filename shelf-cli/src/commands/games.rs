use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use shelf_catalog::{FilterSpec, Game, GameId, GameInput, GameUpdate};

use super::{print_json, truncate_str, Shelf};
use crate::cli_types::{FilterArgs, GameFieldArgs};
use crate::CliError;

/// Build a creation payload, requiring every field without a default.
fn to_input(fields: GameFieldArgs) -> Result<GameInput, CliError> {
    let mut missing = Vec::new();
    if fields.title.is_none() {
        missing.push("--title");
    }
    if fields.genres.is_none() {
        missing.push("--genres");
    }
    if fields.platforms.is_none() {
        missing.push("--platforms");
    }
    if fields.publisher.is_none() {
        missing.push("--publisher");
    }
    if fields.developer.is_none() {
        missing.push("--developer");
    }
    if fields.year.is_none() {
        missing.push("--year");
    }
    if !missing.is_empty() {
        return Err(CliError::arguments(format!(
            "missing required {}",
            missing.join(", ")
        )));
    }

    Ok(GameInput {
        title: fields.title.unwrap_or_default(),
        genres: fields.genres.unwrap_or_default(),
        platforms: fields.platforms.unwrap_or_default(),
        publisher: fields.publisher.unwrap_or_default(),
        developer: fields.developer.unwrap_or_default(),
        release_year: fields.year.unwrap_or_default(),
        metacritic_score: fields.score,
        play_hours: fields.hours.unwrap_or(0.0),
        completed: fields.completed.unwrap_or(false),
        favorite: fields.favorite.unwrap_or(false),
    })
}

fn to_update(fields: GameFieldArgs) -> GameUpdate {
    let metacritic_score = if fields.no_score {
        Some(None)
    } else {
        fields.score.map(Some)
    };
    GameUpdate {
        title: fields.title,
        genres: fields.genres,
        platforms: fields.platforms,
        publisher: fields.publisher,
        developer: fields.developer,
        release_year: fields.year,
        metacritic_score,
        play_hours: fields.hours,
        completed: fields.completed,
        favorite: fields.favorite,
    }
}

fn to_filter_spec(filter: FilterArgs) -> FilterSpec {
    FilterSpec {
        genres: filter.genres,
        platforms: filter.platforms,
        completed: filter.completed,
        favorite: filter.favorite,
        publisher: filter.publisher,
        search: filter.search,
        sort_field: filter.sort,
        sort_order: filter.order,
    }
}

/// One-line summary used by `list`.
fn print_game_line(game: &Game) {
    let score = match game.metacritic_score {
        Some(s) => format!("{s:>3}"),
        None => "  -".to_string(),
    };
    log::info!(
        "  {} {} {:<40} {:>4}  {}  {}{}",
        game.id.as_str().if_supports_color(Stdout, |t| t.dimmed()),
        score.if_supports_color(Stdout, |t| t.cyan()),
        truncate_str(&game.title, 40),
        game.release_year,
        game.platforms.join(", "),
        if game.favorite {
            format!("{} ", "\u{2605}".if_supports_color(Stdout, |t| t.yellow()))
        } else {
            String::new()
        },
        if game.completed {
            format!("{}", "\u{2714}".if_supports_color(Stdout, |t| t.green()))
        } else {
            String::new()
        },
    );
}

fn print_game_detail(game: &Game) {
    log::info!(
        "{}",
        game.title.if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Id:          {}", game.id);
    log::info!("  Genres:      {}", game.genres.join(", "));
    log::info!("  Platforms:   {}", game.platforms.join(", "));
    log::info!("  Publisher:   {}", game.publisher);
    log::info!("  Developer:   {}", game.developer);
    log::info!("  Released:    {}", game.release_year);
    match game.metacritic_score {
        Some(score) => log::info!("  Metacritic:  {}", score),
        None => log::info!(
            "  Metacritic:  {}",
            "n/a".if_supports_color(Stdout, |t| t.dimmed())
        ),
    }
    log::info!("  Play time:   {:.1} h", game.play_hours);
    log::info!("  Completed:   {}", yes_no(game.completed));
    log::info!("  Favorite:    {}", yes_no(game.favorite));
    log::info!("  Added:       {}", game.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
    log::info!("  Updated:     {}", game.updated_at.format("%Y-%m-%d %H:%M:%S UTC"));
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

pub(crate) fn run_add(shelf: &Shelf, fields: GameFieldArgs, json: bool) -> Result<(), CliError> {
    let game = shelf.create(to_input(fields)?)?;
    if json {
        return print_json(&game);
    }
    log::info!(
        "{} Added {} ({})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        game.title.if_supports_color(Stdout, |t| t.bold()),
        game.id,
    );
    Ok(())
}

pub(crate) fn run_list(shelf: &Shelf, filter: FilterArgs, json: bool) -> Result<(), CliError> {
    let games = shelf.select(&to_filter_spec(filter))?;
    if json {
        return print_json(&games);
    }
    if games.is_empty() {
        log::info!("No games match.");
        return Ok(());
    }
    for game in &games {
        print_game_line(game);
    }
    crate::log_blank();
    log::info!("{} game(s)", games.len());
    Ok(())
}

pub(crate) fn run_show(shelf: &Shelf, id: &str, json: bool) -> Result<(), CliError> {
    let game = shelf.get(&GameId::new(id))?;
    if json {
        return print_json(&game);
    }
    print_game_detail(&game);
    Ok(())
}

pub(crate) fn run_update(
    shelf: &Shelf,
    id: &str,
    fields: GameFieldArgs,
    json: bool,
) -> Result<(), CliError> {
    let update = to_update(fields);
    if update.is_empty() {
        return Err(CliError::arguments("nothing to update"));
    }
    let game = shelf.update(&GameId::new(id), &update)?;
    if json {
        return print_json(&game);
    }
    log::info!(
        "{} Updated {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        game.title.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}

pub(crate) fn run_delete(shelf: &Shelf, id: &str, json: bool) -> Result<(), CliError> {
    let game = shelf.delete(&GameId::new(id))?;
    if json {
        return print_json(&game);
    }
    log::info!(
        "{} Deleted {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        game.title.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}

pub(crate) fn run_favorite(shelf: &Shelf, id: &str, json: bool) -> Result<(), CliError> {
    let game = shelf.toggle_favorite(&GameId::new(id))?;
    if json {
        return print_json(&game);
    }
    if game.favorite {
        log::info!(
            "{} {} is now a favorite",
            "\u{2605}".if_supports_color(Stdout, |t| t.yellow()),
            game.title.if_supports_color(Stdout, |t| t.bold()),
        );
    } else {
        log::info!(
            "{} is no longer a favorite",
            game.title.if_supports_color(Stdout, |t| t.bold()),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_reports_every_missing_flag() {
        let fields = GameFieldArgs {
            title: Some("Tetris".to_string()),
            year: Some(1989),
            ..Default::default()
        };
        let err = to_input(fields).unwrap_err().to_string();
        assert!(err.contains("--genres, --platforms, --publisher, --developer"));
    }

    #[test]
    fn add_applies_defaults() {
        let fields = GameFieldArgs {
            title: Some("Tetris".to_string()),
            genres: Some(vec!["Puzzle".to_string()]),
            platforms: Some(vec!["GB".to_string()]),
            publisher: Some("Nintendo".to_string()),
            developer: Some("Nintendo R&D1".to_string()),
            year: Some(1989),
            ..Default::default()
        };
        let input = to_input(fields).unwrap();
        assert_eq!(input.metacritic_score, None);
        assert_eq!(input.play_hours, 0.0);
        assert!(!input.completed && !input.favorite);
    }

    #[test]
    fn no_score_clears_and_absent_score_is_untouched() {
        let cleared = to_update(GameFieldArgs {
            no_score: true,
            ..Default::default()
        });
        assert_eq!(cleared.metacritic_score, Some(None));

        let untouched = to_update(GameFieldArgs {
            hours: Some(3.5),
            ..Default::default()
        });
        assert_eq!(untouched.metacritic_score, None);
        assert!(!untouched.is_empty());
        assert!(to_update(GameFieldArgs::default()).is_empty());
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate_str("Ōkami HD", 20), "Ōkami HD");
        assert_eq!(truncate_str("Xenoblade Chronicles", 10), "Xenobla...");
    }
}

//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "game-shelf")]
#[command(about = "Track, filter, and summarize a video game collection", long_about = None)]
pub(crate) struct Cli {
    /// Collection database to use (overrides the configured path)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Use a throwaway in-memory collection instead of a database file
    #[arg(long, global = true, conflicts_with = "db")]
    pub memory: bool,

    /// Print machine-readable JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Fields of a game record, shared by `add` and `update`.
///
/// Every field is optional here; `add` checks that the required ones are
/// present, `update` only changes what was given.
#[derive(Args, Clone, Default)]
pub(crate) struct GameFieldArgs {
    /// Game title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Genres (e.g., RPG,Action)
    #[arg(short, long, value_delimiter = ',')]
    pub genres: Option<Vec<String>>,

    /// Platforms (e.g., SNES,PC)
    #[arg(short, long, value_delimiter = ',')]
    pub platforms: Option<Vec<String>>,

    /// Publisher name
    #[arg(long)]
    pub publisher: Option<String>,

    /// Developer name
    #[arg(long)]
    pub developer: Option<String>,

    /// Year of first release
    #[arg(short = 'y', long)]
    pub year: Option<i32>,

    /// Metacritic score, 0-100
    #[arg(long, conflicts_with = "no_score")]
    pub score: Option<i32>,

    /// Clear the Metacritic score
    #[arg(long)]
    pub no_score: bool,

    /// Hours played
    #[arg(long)]
    pub hours: Option<f64>,

    /// Mark as completed (true/false)
    #[arg(long)]
    pub completed: Option<bool>,

    /// Mark as favorite (true/false)
    #[arg(long)]
    pub favorite: Option<bool>,
}

/// Selection flags for `list`.
#[derive(Args, Clone, Default)]
pub(crate) struct FilterArgs {
    /// Keep games with any of these genres
    #[arg(short, long, value_delimiter = ',')]
    pub genres: Vec<String>,

    /// Keep games on any of these platforms
    #[arg(short, long, value_delimiter = ',')]
    pub platforms: Vec<String>,

    /// Keep games by completion state (true/false)
    #[arg(long)]
    pub completed: Option<bool>,

    /// Keep games by favorite state (true/false)
    #[arg(long)]
    pub favorite: Option<bool>,

    /// Publisher substring (case-insensitive)
    #[arg(long)]
    pub publisher: Option<String>,

    /// Search title, developer, and publisher (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort field (e.g., title, release_year, metacritic_score, created_at)
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort order: asc or desc
    #[arg(long)]
    pub order: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Add a game to the collection
    Add {
        #[command(flatten)]
        fields: GameFieldArgs,
    },

    /// List games, optionally filtered and sorted
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show one game in full
    Show {
        /// Game id
        id: String,
    },

    /// Change fields of an existing game
    Update {
        /// Game id
        id: String,

        #[command(flatten)]
        fields: GameFieldArgs,
    },

    /// Remove a game from the collection
    Delete {
        /// Game id
        id: String,
    },

    /// Toggle the favorite flag of a game
    Favorite {
        /// Game id
        id: String,
    },

    /// Show collection statistics
    Stats,

    /// List the values available for filtering
    Filters,

    /// Export the whole collection as JSON
    Export {
        /// Output file (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import games from a YAML or JSON seed file
    Import {
        /// Seed file (.yaml, .yml or .json)
        path: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and the database in use
    Show,

    /// Print the settings file path
    Path,

    /// Set (or clear) the default database path
    SetDb {
        /// Database path; omit to revert to the default location
        path: Option<PathBuf>,
    },
}

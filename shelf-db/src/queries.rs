//! Read queries: predicate compilation, selection, counts and aggregates.

use rusqlite::types::ToSql;
use rusqlite::{params_from_iter, Connection};
use shelf_catalog::{Game, GroupCount, SortField, SortOrder};
use shelf_lib::{Clause, GroupField, GroupKey, NumericField, Predicate, SortKey, TextField};

use crate::operations::{load_members, row_to_game, OperationError, GAME_COLUMNS};

/// A compiled `WHERE` clause and its positional parameters.
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<Box<dyn ToSql>>,
}

/// Compile a predicate into SQL over `games g`.
///
/// Multi-valued membership becomes an `EXISTS` over the member table;
/// substring clauses call `contains_ignore_case`.
pub fn compile_where(predicate: &Predicate) -> WhereClause {
    let mut parts: Vec<String> = Vec::new();
    let mut params: Vec<Box<dyn ToSql>> = Vec::new();

    for clause in predicate.clauses() {
        match clause {
            Clause::GenreIn(values) => {
                parts.push(membership_sql("game_genres", "genre", values.len()));
                params.extend(values.iter().map(|v| Box::new(v.clone()) as Box<dyn ToSql>));
            }
            Clause::PlatformIn(values) => {
                parts.push(membership_sql("game_platforms", "platform", values.len()));
                params.extend(values.iter().map(|v| Box::new(v.clone()) as Box<dyn ToSql>));
            }
            Clause::Completed(value) => {
                parts.push("g.completed = ?".to_string());
                params.push(Box::new(*value));
            }
            Clause::Favorite(value) => {
                parts.push("g.favorite = ?".to_string());
                params.push(Box::new(*value));
            }
            Clause::PublisherContains(text) => {
                parts.push("contains_ignore_case(g.publisher, ?)".to_string());
                params.push(Box::new(text.clone()));
            }
            Clause::Search(text) => {
                parts.push(
                    "(contains_ignore_case(g.title, ?) OR contains_ignore_case(g.developer, ?) \
                     OR contains_ignore_case(g.publisher, ?))"
                        .to_string(),
                );
                for _ in 0..3 {
                    params.push(Box::new(text.clone()));
                }
            }
        }
    }

    let sql = if parts.is_empty() {
        "1".to_string()
    } else {
        parts.join(" AND ")
    };
    WhereClause { sql, params }
}

fn membership_sql(table: &str, column: &str, n: usize) -> String {
    let placeholders = vec!["?"; n].join(", ");
    format!("EXISTS (SELECT 1 FROM {table} m WHERE m.game_id = g.id AND m.{column} IN ({placeholders}))")
}

/// `ORDER BY` for a sort key, tie-broken by natural order.
///
/// SQLite puts NULL first ascending and last descending, which is where a
/// missing Metacritic score belongs.
pub fn order_by(sort: SortKey) -> String {
    let column = match sort.field {
        SortField::Title => "g.title",
        SortField::Publisher => "g.publisher",
        SortField::Developer => "g.developer",
        SortField::ReleaseYear => "g.release_year",
        SortField::MetacriticScore => "g.metacritic_score",
        SortField::PlayHours => "g.play_hours",
        SortField::Completed => "g.completed",
        SortField::Favorite => "g.favorite",
        SortField::CreatedAt => "g.created_at",
        SortField::UpdatedAt => "g.updated_at",
    };
    let direction = match sort.order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    format!("{column} {direction}, g.seq ASC")
}

// ── Selection ───────────────────────────────────────────────────────────────

/// Games matching `predicate`, ordered by `sort`.
pub fn find_games(
    conn: &Connection,
    predicate: &Predicate,
    sort: SortKey,
) -> Result<Vec<Game>, OperationError> {
    let clause = compile_where(predicate);
    let sql = format!(
        "SELECT {GAME_COLUMNS} FROM games g WHERE {} ORDER BY {}",
        clause.sql,
        order_by(sort)
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(clause.params.iter()), row_to_game)?;
    let mut games = rows.collect::<Result<Vec<_>, _>>()?;
    for game in &mut games {
        load_members(conn, game)?;
    }
    Ok(games)
}

/// Number of games matching `predicate`.
pub fn count_games(conn: &Connection, predicate: &Predicate) -> Result<u64, OperationError> {
    let clause = compile_where(predicate);
    let sql = format!("SELECT COUNT(*) FROM games g WHERE {}", clause.sql);
    let count: i64 = conn.query_row(&sql, params_from_iter(clause.params.iter()), |r| r.get(0))?;
    Ok(count as u64)
}

// ── Aggregates ──────────────────────────────────────────────────────────────

/// Distinct values of a text field, unordered.
pub fn distinct_values(conn: &Connection, field: TextField) -> Result<Vec<String>, OperationError> {
    let sql = match field {
        TextField::Genre => "SELECT DISTINCT genre FROM game_genres",
        TextField::Platform => "SELECT DISTINCT platform FROM game_platforms",
        TextField::Publisher => "SELECT DISTINCT publisher FROM games",
        TextField::Developer => "SELECT DISTINCT developer FROM games",
    };
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], |row| row.get(0))?;
    rows.collect::<Result<Vec<String>, _>>().map_err(Into::into)
}

/// Group and count by a field.
///
/// Multi-valued fields are counted from their member tables, one row per
/// member, so a game lands in every group it belongs to. Groups are
/// returned in order of the earliest game that contributes to them (ties
/// within one game by key).
pub fn group_count(
    conn: &Connection,
    field: GroupField,
) -> Result<Vec<GroupCount<GroupKey>>, OperationError> {
    match field {
        GroupField::Genre => member_group_count(conn, "game_genres", "genre"),
        GroupField::Platform => member_group_count(conn, "game_platforms", "platform"),
        GroupField::ReleaseYear => {
            let mut stmt = conn.prepare(
                "SELECT release_year, COUNT(*) FROM games
                 GROUP BY release_year ORDER BY MIN(seq)",
            )?;
            let rows = stmt.query_map([], |row| {
                let year: i32 = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok(GroupCount::new(GroupKey::Year(year), count as u64))
            })?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        }
    }
}

fn member_group_count(
    conn: &Connection,
    table: &str,
    column: &str,
) -> Result<Vec<GroupCount<GroupKey>>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT m.{column}, COUNT(*) FROM {table} m JOIN games g ON g.id = m.game_id
         GROUP BY m.{column} ORDER BY MIN(g.seq), m.{column}"
    ))?;
    let rows = stmt.query_map([], |row| {
        let key: String = row.get(0)?;
        let count: i64 = row.get(1)?;
        Ok(GroupCount::new(GroupKey::Text(key), count as u64))
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn numeric_column(field: NumericField) -> &'static str {
    match field {
        NumericField::PlayHours => "play_hours",
        NumericField::MetacriticScore => "metacritic_score",
    }
}

/// Sum of a numeric field; 0 for an empty collection.
pub fn sum(conn: &Connection, field: NumericField) -> Result<f64, OperationError> {
    let sql = format!("SELECT TOTAL({}) FROM games", numeric_column(field));
    Ok(conn.query_row(&sql, [], |r| r.get(0))?)
}

/// Mean of a numeric field over games that have it; `None` when none do.
pub fn average(conn: &Connection, field: NumericField) -> Result<Option<f64>, OperationError> {
    let column = numeric_column(field);
    let sql = format!("SELECT AVG({column}) FROM games WHERE {column} IS NOT NULL");
    Ok(conn.query_row(&sql, [], |r| r.get(0))?)
}

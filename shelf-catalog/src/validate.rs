//! Field-level validation of create and update payloads.
//!
//! Every rule is checked and every failure reported, so callers can show
//! all problems with a payload at once.

use std::collections::HashSet;
use std::fmt;

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::types::GameInput;

/// Earliest accepted release year.
pub const MIN_RELEASE_YEAR: i32 = 1970;

/// Highest accepted Metacritic score.
pub const MAX_METACRITIC_SCORE: i32 = 100;

/// A single rejected field and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The current calendar year (UTC), the upper bound for release years.
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Validate a candidate record against the collection invariants.
///
/// On success returns the normalized input: genre and platform lists with
/// duplicates removed (first occurrence kept). On failure returns every
/// violation found.
pub fn validate_input(input: &GameInput, current_year: i32) -> Result<GameInput, Vec<Violation>> {
    let mut violations = Vec::new();

    require_text(&mut violations, "title", &input.title);
    require_text(&mut violations, "publisher", &input.publisher);
    require_text(&mut violations, "developer", &input.developer);
    require_members(&mut violations, "genres", "genre", &input.genres);
    require_members(&mut violations, "platforms", "platform", &input.platforms);

    if input.release_year < MIN_RELEASE_YEAR || input.release_year > current_year {
        violations.push(Violation::new(
            "release_year",
            format!("must be between {MIN_RELEASE_YEAR} and {current_year}"),
        ));
    }

    if input
        .metacritic_score
        .is_some_and(|score| !(0..=MAX_METACRITIC_SCORE).contains(&score))
    {
        violations.push(Violation::new(
            "metacritic_score",
            format!("must be between 0 and {MAX_METACRITIC_SCORE}"),
        ));
    }

    if !input.play_hours.is_finite() || input.play_hours < 0.0 {
        violations.push(Violation::new("play_hours", "must be a non-negative number"));
    }

    if !violations.is_empty() {
        return Err(violations);
    }

    let mut normalized = input.clone();
    normalized.genres = dedup_preserving_order(&input.genres);
    normalized.platforms = dedup_preserving_order(&input.platforms);
    Ok(normalized)
}

fn require_text(violations: &mut Vec<Violation>, field: &str, value: &str) {
    if value.trim().is_empty() {
        violations.push(Violation::new(field, "is required"));
    }
}

fn require_members(violations: &mut Vec<Violation>, field: &str, singular: &str, values: &[String]) {
    if values.is_empty() {
        violations.push(Violation::new(field, format!("at least one {singular} is required")));
    } else if values.iter().any(|v| v.trim().is_empty()) {
        violations.push(Violation::new(field, format!("{singular} names must not be blank")));
    }
}

fn dedup_preserving_order(values: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .iter()
        .filter(|v| seen.insert(v.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedup_keeps_first_occurrence() {
        let values = vec!["RPG".to_string(), "Action".to_string(), "RPG".to_string()];
        assert_eq!(dedup_preserving_order(&values), vec!["RPG", "Action"]);
    }
}

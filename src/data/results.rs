//! League results CSV ingest
//!
//! Reads the raw results export (`Data,Em casa,Visitante,Resultado`).
//! The export is a concatenation of page dumps, so blank rows and
//! repeated header rows appear mid-file and are skipped. Rows with an
//! unparseable date are dropped and reported, never silently kept.

use crate::{ClubMatch, Fixture, FutError, Result, Venue};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// What to do with a score string that matches neither separator
/// convention.
///
/// `ZeroFill` reproduces the historical exports' behavior: both goal
/// counts default to zero, the row is kept, and the substitution is
/// counted and logged. `Reject` drops the row into the skipped list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorePolicy {
    ZeroFill,
    Reject,
}

/// A row that was dropped during import, with the reason
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

/// Outcome of an import: parsed fixtures plus an account of every
/// degraded or dropped row
#[derive(Debug, Clone)]
pub struct ResultsImport {
    pub fixtures: Vec<Fixture>,
    pub skipped: Vec<SkippedRow>,
    /// Rows kept with a zero-filled score under `ScorePolicy::ZeroFill`
    pub zero_filled: usize,
}

/// Parse a score string in either separator convention: ASCII "2x1"
/// or en-dash "3–0". Surrounding whitespace is tolerated.
pub fn parse_score(raw: &str) -> Option<(u32, u32)> {
    let pattern = Regex::new(r"^\s*(\d{1,2})\s*[x–]\s*(\d{1,2})\s*$").unwrap();
    let caps = pattern.captures(raw)?;
    let home = caps.get(1)?.as_str().parse().ok()?;
    let away = caps.get(2)?.as_str().parse().ok()?;
    Some((home, away))
}

/// Parse a date field. The exports use ISO dates; day-first dates show
/// up in older files.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%Y"))
        .ok()
}

/// Read fixtures from a results export file
pub fn read_fixtures_file<P: AsRef<Path>>(path: P, policy: ScorePolicy) -> Result<ResultsImport> {
    let file = std::fs::File::open(path.as_ref())?;
    read_fixtures(file, policy)
}

/// Read fixtures from any reader carrying the results export
pub fn read_fixtures<R: Read>(reader: R, policy: ScorePolicy) -> Result<ResultsImport> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let date_idx = column(&headers, "Data")?;
    let home_idx = column(&headers, "Em casa")?;
    let away_idx = column(&headers, "Visitante")?;
    let score_idx = column(&headers, "Resultado")?;

    let mut fixtures = Vec::new();
    let mut skipped = Vec::new();
    let mut zero_filled = 0;

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        // Fully blank rows separate the concatenated page dumps
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let date_field = record.get(date_idx).unwrap_or("").trim();

        // The header row itself reappears between dumps
        if date_field == "Data" {
            continue;
        }

        let date = match parse_date(date_field) {
            Some(d) => d,
            None => {
                let err = FutError::Date {
                    line,
                    value: date_field.to_string(),
                };
                log::warn!("{}, row dropped", err);
                skipped.push(SkippedRow {
                    line,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let score_field = record.get(score_idx).unwrap_or("").trim();
        let (home_goals, away_goals) = match parse_score(score_field) {
            Some(goals) => goals,
            None => match policy {
                ScorePolicy::ZeroFill => {
                    log::warn!(
                        "line {}: unparseable score '{}', goals zero-filled",
                        line,
                        score_field
                    );
                    zero_filled += 1;
                    (0, 0)
                }
                ScorePolicy::Reject => {
                    let err = FutError::Score {
                        line,
                        value: score_field.to_string(),
                    };
                    log::warn!("{}, row dropped", err);
                    skipped.push(SkippedRow {
                        line,
                        reason: err.to_string(),
                    });
                    continue;
                }
            },
        };

        fixtures.push(Fixture {
            date,
            home_team: record.get(home_idx).unwrap_or("").trim().to_string(),
            away_team: record.get(away_idx).unwrap_or("").trim().to_string(),
            home_goals,
            away_goals,
        });
    }

    log::info!(
        "Imported {} fixtures ({} skipped, {} zero-filled scores)",
        fixtures.len(),
        skipped.len(),
        zero_filled
    );

    Ok(ResultsImport {
        fixtures,
        skipped,
        zero_filled,
    })
}

fn column(headers: &csv::StringRecord, name: &'static str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or(FutError::MissingColumn(name))
}

/// Reduce the full fixture list to one club's view, ordered by date.
///
/// Same-date fixtures keep their input order (stable sort). An unknown
/// club yields an empty view; callers that need a hard signal check for
/// emptiness and raise `FutError::EmptyInput`.
pub fn club_view(fixtures: &[Fixture], club: &str) -> Vec<ClubMatch> {
    let mut matches: Vec<ClubMatch> = fixtures
        .iter()
        .filter(|f| f.involves(club))
        .map(|f| {
            let home = f.is_home(club).unwrap_or(false);
            ClubMatch {
                date: f.date,
                venue: if home { Venue::Home } else { Venue::Away },
                opponent: f.opponent(club).unwrap_or_default().to_string(),
                goals_for: f.goals_for(club).unwrap_or(0),
                goals_against: f.goals_against(club).unwrap_or(0),
                possession: None,
                coach: None,
            }
        })
        .collect();

    matches.sort_by_key(|m| m.date);
    matches
}

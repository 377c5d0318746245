//! GPS match-day CSV ingest
//!
//! Reads the merged GPS/match export (`DATA,Local,GP,GC,Posse,Oponente,
//! Coach`). The export holds one row per athlete per session; match days
//! are the rows carrying a venue flag, and the match row repeats for
//! every athlete, so the reader deduplicates by date. Training-day rows
//! (no venue flag) are counted but not kept.

use crate::data::results::SkippedRow;
use crate::{ClubMatch, FutError, Result, Venue};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

/// Outcome of a match-day import
#[derive(Debug, Clone)]
pub struct MatchDayImport {
    /// One record per match day, in input order after deduplication
    pub matches: Vec<ClubMatch>,
    pub skipped: Vec<SkippedRow>,
    /// Rows without a venue flag (training sessions)
    pub training_rows: usize,
}

/// Read match days from the merged export file
pub fn read_match_days_file<P: AsRef<Path>>(path: P) -> Result<MatchDayImport> {
    let file = std::fs::File::open(path.as_ref())?;
    read_match_days(file)
}

/// Read match days from any reader carrying the merged export
pub fn read_match_days<R: Read>(reader: R) -> Result<MatchDayImport> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let date_idx = column(&headers, "DATA")?;
    let venue_idx = column(&headers, "Local")?;
    let gp_idx = column(&headers, "GP")?;
    let gc_idx = column(&headers, "GC")?;
    let possession_idx = headers.iter().position(|h| h.trim() == "Posse");
    let opponent_idx = headers.iter().position(|h| h.trim() == "Oponente");
    let coach_idx = headers.iter().position(|h| h.trim() == "Coach");

    let mut matches = Vec::new();
    let mut skipped = Vec::new();
    let mut training_rows = 0;
    let mut seen_dates: HashSet<NaiveDate> = HashSet::new();

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let venue_field = record.get(venue_idx).unwrap_or("").trim();
        if venue_field.is_empty() {
            training_rows += 1;
            continue;
        }

        let date_field = record.get(date_idx).unwrap_or("").trim();
        let date = match NaiveDate::parse_from_str(date_field, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => {
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

        // The match row repeats once per athlete
        if !seen_dates.insert(date) {
            continue;
        }

        let venue = match Venue::from_flag(venue_field) {
            Some(v) => v,
            None => {
                let err = FutError::VenueFlag {
                    line,
                    value: venue_field.to_string(),
                };
                log::warn!("{}, row dropped", err);
                skipped.push(SkippedRow {
                    line,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let goals_for = match parse_goals(record.get(gp_idx)) {
            Some(g) => g,
            None => {
                skipped.push(SkippedRow {
                    line,
                    reason: format!("unparseable goals '{}'", record.get(gp_idx).unwrap_or("")),
                });
                continue;
            }
        };
        let goals_against = match parse_goals(record.get(gc_idx)) {
            Some(g) => g,
            None => {
                skipped.push(SkippedRow {
                    line,
                    reason: format!("unparseable goals '{}'", record.get(gc_idx).unwrap_or("")),
                });
                continue;
            }
        };

        let possession = possession_idx
            .and_then(|i| record.get(i))
            .map(|p| p.trim().trim_end_matches('%'))
            .and_then(|p| p.parse::<f64>().ok());

        let opponent = opponent_idx
            .and_then(|i| record.get(i))
            .map(|o| o.trim())
            .unwrap_or("")
            .to_string();

        let coach = coach_idx
            .and_then(|i| record.get(i))
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(|c| c.to_string());

        matches.push(ClubMatch {
            date,
            venue,
            opponent,
            goals_for,
            goals_against,
            possession,
            coach,
        });
    }

    log::info!(
        "Imported {} match days ({} training rows, {} skipped)",
        matches.len(),
        training_rows,
        skipped.len()
    );

    Ok(MatchDayImport {
        matches,
        skipped,
        training_rows,
    })
}

fn parse_goals(field: Option<&str>) -> Option<u32> {
    let trimmed = field?.trim();
    // Goal columns come through the merge as floats ("2.0")
    if let Ok(n) = trimmed.parse::<u32>() {
        return Some(n);
    }
    let as_float: f64 = trimmed.parse().ok()?;
    if as_float >= 0.0 && as_float.fract() == 0.0 {
        Some(as_float as u32)
    } else {
        None
    }
}

fn column(headers: &csv::StringRecord, name: &'static str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or(FutError::MissingColumn(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
DATA,Local,GP,GC,Posse,Oponente,Coach
2018-08-05,,,,,,Adilson Batista
2018-08-05,,,,,,Adilson Batista
2018-08-12,Em casa,2,1,54.2,Grêmio,Adilson Batista
2018-08-12,Em casa,2,1,54.2,Grêmio,Adilson Batista
2018-08-12,Em casa,2,1,54.2,Grêmio,Adilson Batista
2018-08-19,Visitante,0.0,3.0,41,Palmeiras,Adilson Batista
2018-08-26,neutral,1,1,50,Sport,Adilson Batista
";

    #[test]
    fn test_match_days_deduplicated() {
        let import = read_match_days(SAMPLE.as_bytes()).unwrap();

        // Two training rows dropped, athlete repeats collapsed, the
        // unknown venue flag recorded.
        assert_eq!(import.matches.len(), 2);
        assert_eq!(import.training_rows, 2);
        assert_eq!(import.skipped.len(), 1);
        assert!(import.skipped[0].reason.contains("neutral"));
    }

    #[test]
    fn test_match_day_fields() {
        let import = read_match_days(SAMPLE.as_bytes()).unwrap();

        let home = &import.matches[0];
        assert_eq!(home.venue, Venue::Home);
        assert_eq!(home.goals_for, 2);
        assert_eq!(home.goals_against, 1);
        assert_eq!(home.possession, Some(54.2));
        assert_eq!(home.opponent, "Grêmio");
        assert_eq!(home.coach.as_deref(), Some("Adilson Batista"));

        // Float-formatted goals parse to integers
        let away = &import.matches[1];
        assert_eq!(away.venue, Venue::Away);
        assert_eq!(away.goals_for, 0);
        assert_eq!(away.goals_against, 3);
    }

    #[test]
    fn test_missing_goal_column() {
        let bad = "DATA,Local,Posse\n2018-08-12,Em casa,54\n";
        let err = read_match_days(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, crate::FutError::MissingColumn("GP")));
    }
}

//! Report rendering
//!
//! Turns aggregate rows into console tables, JSON arrays or CSV files.
//! Renderers take flat record slices and a writer; they never reach
//! back into the analysis internals.

use crate::analysis::{ClubRecord, CoachSummary, RestBucket, RestedMatch, VenueSplit};
use crate::Result;
use serde::Serialize;
use std::io::Write;

/// Output format for report commands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use table, json, or csv.", s)),
        }
    }
}

/// Flat export row for a rest-interval bucket
#[derive(Debug, Serialize)]
struct BucketRow {
    rest_days: i64,
    venue: String,
    total_matches: usize,
    wins: usize,
    draws: usize,
    losses: usize,
    win_rate: f64,
    points_per_match: f64,
    goals_for: u32,
    goals_against: u32,
    goal_difference: i64,
    goals_for_per_match: f64,
    goals_against_per_match: f64,
}

impl From<&RestBucket> for BucketRow {
    fn from(b: &RestBucket) -> Self {
        BucketRow {
            rest_days: b.rest_days,
            venue: b.venue.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string()),
            total_matches: b.total_matches,
            wins: b.wins,
            draws: b.draws,
            losses: b.losses,
            win_rate: b.win_rate(),
            points_per_match: b.points_per_match(),
            goals_for: b.goals_for,
            goals_against: b.goals_against,
            goal_difference: b.goal_difference(),
            goals_for_per_match: b.goals_for_per_match(),
            goals_against_per_match: b.goals_against_per_match(),
        }
    }
}

/// Render rest-interval buckets
pub fn write_buckets<W: Write>(out: &mut W, buckets: &[RestBucket], format: OutputFormat) -> Result<()> {
    let rows: Vec<BucketRow> = buckets.iter().map(BucketRow::from).collect();
    match format {
        OutputFormat::Table => {
            writeln!(out, "Performance by Rest Interval")?;
            writeln!(out, "{}", RULE)?;
            writeln!(
                out,
                "{:>4}  {:<5} {:>7} {:>4} {:>4} {:>4} {:>8} {:>7} {:>4} {:>4} {:>5} {:>6} {:>6}",
                "Rest", "Venue", "Matches", "W", "D", "L", "Win%", "Pts/M", "GF", "GA", "GD", "GF/M", "GA/M"
            )?;
            for row in &rows {
                writeln!(
                    out,
                    "{:>4}  {:<5} {:>7} {:>4} {:>4} {:>4} {:>8.2} {:>7.2} {:>4} {:>4} {:>5} {:>6.2} {:>6.2}",
                    row.rest_days,
                    row.venue,
                    row.total_matches,
                    row.wins,
                    row.draws,
                    row.losses,
                    row.win_rate,
                    row.points_per_match,
                    row.goals_for,
                    row.goals_against,
                    row.goal_difference,
                    row.goals_for_per_match,
                    row.goals_against_per_match,
                )?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json(out, &rows),
        OutputFormat::Csv => write_csv(out, &rows),
    }
}

/// Flat export row for the league table
#[derive(Debug, Serialize)]
struct LeagueRow {
    club: String,
    games: usize,
    win_rate: f64,
    home_win_rate: f64,
    away_win_rate: f64,
    home_wins: usize,
    home_draws: usize,
    home_losses: usize,
    away_wins: usize,
    away_draws: usize,
    away_losses: usize,
    goals_for: u32,
    goals_against: u32,
    goal_difference: i64,
    home_points: usize,
    away_points: usize,
    longest_win_streak: usize,
    longest_loss_streak: usize,
}

impl LeagueRow {
    fn new(club: &str, record: &ClubRecord) -> Self {
        LeagueRow {
            club: club.to_string(),
            games: record.total_games(),
            win_rate: record.win_rate(),
            home_win_rate: record.home_win_rate(),
            away_win_rate: record.away_win_rate(),
            home_wins: record.home_wins,
            home_draws: record.home_draws,
            home_losses: record.home_losses,
            away_wins: record.away_wins,
            away_draws: record.away_draws,
            away_losses: record.away_losses,
            goals_for: record.goals_for(),
            goals_against: record.goals_against(),
            goal_difference: record.goal_difference(),
            home_points: record.home_points(),
            away_points: record.away_points(),
            longest_win_streak: record.longest_win_streak,
            longest_loss_streak: record.longest_loss_streak,
        }
    }
}

/// Render the all-team season table
pub fn write_league<W: Write>(
    out: &mut W,
    table: &[(String, ClubRecord)],
    format: OutputFormat,
) -> Result<()> {
    let rows: Vec<LeagueRow> = table
        .iter()
        .map(|(club, record)| LeagueRow::new(club, record))
        .collect();
    match format {
        OutputFormat::Table => {
            writeln!(out, "Team Performance")?;
            writeln!(out, "{}", RULE)?;
            writeln!(
                out,
                "{:<22} {:>5} {:>7} {:>7} {:>7} {:>11} {:>11} {:>4} {:>4} {:>5} {:>6} {:>6}",
                "Club", "Games", "Win%", "HWin%", "AWin%", "Home W-D-L", "Away W-D-L", "GF", "GA", "GD", "WStrk", "LStrk"
            )?;
            for row in &rows {
                writeln!(
                    out,
                    "{:<22} {:>5} {:>7.2} {:>7.2} {:>7.2} {:>11} {:>11} {:>4} {:>4} {:>5} {:>6} {:>6}",
                    row.club,
                    row.games,
                    row.win_rate,
                    row.home_win_rate,
                    row.away_win_rate,
                    format!("{}-{}-{}", row.home_wins, row.home_draws, row.home_losses),
                    format!("{}-{}-{}", row.away_wins, row.away_draws, row.away_losses),
                    row.goals_for,
                    row.goals_against,
                    row.goal_difference,
                    row.longest_win_streak,
                    row.longest_loss_streak,
                )?;
            }
            Ok(())
        }
        OutputFormat::Json => write_json(out, &rows),
        OutputFormat::Csv => write_csv(out, &rows),
    }
}

/// Flat export row for a coach summary
#[derive(Debug, Serialize)]
struct CoachRow {
    coach: String,
    games: usize,
    win_rate: f64,
    home_win_rate: f64,
    away_win_rate: f64,
    goals_for_avg: f64,
    goals_against_avg: f64,
    possession_avg: Option<f64>,
}

impl From<&CoachSummary> for CoachRow {
    fn from(s: &CoachSummary) -> Self {
        CoachRow {
            coach: s.coach.clone(),
            games: s.games,
            win_rate: s.win_rate(),
            home_win_rate: s.home_win_rate(),
            away_win_rate: s.away_win_rate(),
            goals_for_avg: s.goals_for_avg(),
            goals_against_avg: s.goals_against_avg(),
            possession_avg: s.possession_avg(),
        }
    }
}

/// Render per-coach summaries
pub fn write_coaches<W: Write>(
    out: &mut W,
    summaries: &[CoachSummary],
    format: OutputFormat,
) -> Result<()> {
    let rows: Vec<CoachRow> = summaries.iter().map(CoachRow::from).collect();
    match format {
        OutputFormat::Table => {
            writeln!(out, "Performance by Coach")?;
            writeln!(out, "{}", RULE)?;
            for row in &rows {
                writeln!(out, "\n{}", row.coach)?;
                writeln!(out, "  Games:                {}", row.games)?;
                writeln!(out, "  Win rate:             {:.2}%", row.win_rate)?;
                writeln!(out, "  Home win rate:        {:.2}%", row.home_win_rate)?;
                writeln!(out, "  Away win rate:        {:.2}%", row.away_win_rate)?;
                writeln!(out, "  Goals scored (avg):   {:.2}", row.goals_for_avg)?;
                writeln!(out, "  Goals conceded (avg): {:.2}", row.goals_against_avg)?;
                if let Some(p) = row.possession_avg {
                    writeln!(out, "  Possession (avg):     {:.2}%", p)?;
                }
            }
            Ok(())
        }
        OutputFormat::Json => write_json(out, &rows),
        OutputFormat::Csv => write_csv(out, &rows),
    }
}

/// Render the home/away split over match days
pub fn write_venue_splits<W: Write>(out: &mut W, splits: &[VenueSplit]) -> Result<()> {
    writeln!(out, "Home vs Away Performance")?;
    writeln!(out, "{}", RULE)?;
    for split in splits {
        writeln!(out, "\n{}", split.venue)?;
        writeln!(out, "  Games:                {}", split.games)?;
        writeln!(out, "  Win rate:             {:.2}%", split.win_rate())?;
        writeln!(out, "  Goals scored (avg):   {:.2}", split.goals_for_avg())?;
        writeln!(out, "  Goals conceded (avg): {:.2}", split.goals_against_avg())?;
        writeln!(out, "  Goal diff (avg):      {:.2}", split.goal_difference_avg())?;
        if let Some(p) = split.possession_avg() {
            writeln!(out, "  Possession (avg):     {:.2}%", p)?;
        }
    }
    Ok(())
}

/// Render the chronological schedule with results and rest intervals
pub fn write_schedule<W: Write>(out: &mut W, rested: &[RestedMatch]) -> Result<()> {
    writeln!(out, "Match Schedule")?;
    writeln!(out, "{}", RULE)?;
    for rm in rested {
        writeln!(
            out,
            "Date: {} | {} vs {} | {}-{} ({}) | Rest: {} days",
            rm.record.date,
            rm.record.venue,
            rm.record.opponent,
            rm.record.goals_for,
            rm.record.goals_against,
            rm.record.outcome(),
            rm.rest_days,
        )?;
    }
    Ok(())
}

const RULE: &str = "────────────────────────────────────────────────────────────";

fn write_json<W: Write, T: Serialize>(out: &mut W, rows: &[T]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, rows)?;
    writeln!(out)?;
    Ok(())
}

fn write_csv<W: Write, T: Serialize>(out: &mut W, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

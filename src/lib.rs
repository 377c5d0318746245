//! Match-record aggregation for soccer-club CSV exports
//!
//! Reads league results and GPS match-day exports, derives per-match
//! outcomes and rest intervals (microcycles), and produces grouped
//! performance summaries for the reporting layer.

pub mod analysis;
pub mod data;
pub mod report;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Whether the reference club played at home or away
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    /// Parse the venue flag used by the match-day exports
    pub fn from_flag(flag: &str) -> Option<Self> {
        match flag.trim() {
            "Em casa" => Some(Venue::Home),
            "Visitante" => Some(Venue::Away),
            _ => None,
        }
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Venue::Home => write!(f, "Home"),
            Venue::Away => write!(f, "Away"),
        }
    }
}

/// Outcome of a match from the reference club's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

impl MatchOutcome {
    /// Derive the outcome from goals for and against
    pub fn from_goals(goals_for: u32, goals_against: u32) -> Self {
        match goals_for.cmp(&goals_against) {
            std::cmp::Ordering::Greater => MatchOutcome::Win,
            std::cmp::Ordering::Less => MatchOutcome::Loss,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOutcome::Win => write!(f, "W"),
            MatchOutcome::Draw => write!(f, "D"),
            MatchOutcome::Loss => write!(f, "L"),
        }
    }
}

/// A single league fixture as it appears in the results export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
}

impl Fixture {
    /// Check whether a club appears on either side of this fixture
    pub fn involves(&self, club: &str) -> bool {
        self.home_team == club || self.away_team == club
    }

    /// Check if the club was the home side
    pub fn is_home(&self, club: &str) -> Option<bool> {
        if self.home_team == club {
            Some(true)
        } else if self.away_team == club {
            Some(false)
        } else {
            None
        }
    }

    /// Goals scored by the given club
    pub fn goals_for(&self, club: &str) -> Option<u32> {
        match self.is_home(club)? {
            true => Some(self.home_goals),
            false => Some(self.away_goals),
        }
    }

    /// Goals conceded by the given club
    pub fn goals_against(&self, club: &str) -> Option<u32> {
        match self.is_home(club)? {
            true => Some(self.away_goals),
            false => Some(self.home_goals),
        }
    }

    /// The club's opponent in this fixture
    pub fn opponent(&self, club: &str) -> Option<&str> {
        match self.is_home(club)? {
            true => Some(self.away_team.as_str()),
            false => Some(self.home_team.as_str()),
        }
    }
}

/// One club's view of a single match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClubMatch {
    pub date: NaiveDate,
    pub venue: Venue,
    pub opponent: String,
    pub goals_for: u32,
    pub goals_against: u32,
    /// Ball possession percentage, where the export carries it
    pub possession: Option<f64>,
    /// Coach in charge, where the export carries it
    pub coach: Option<String>,
}

impl ClubMatch {
    pub fn outcome(&self) -> MatchOutcome {
        MatchOutcome::from_goals(self.goals_for, self.goals_against)
    }
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum FutError {
    #[error("Unparseable date '{value}' at line {line}")]
    Date { line: u64, value: String },

    #[error("Unparseable score '{value}' at line {line}")]
    Score { line: u64, value: String },

    #[error("Unknown venue flag '{value}' at line {line}")]
    VenueFlag { line: u64, value: String },

    #[error("Missing column '{0}' in CSV header")]
    MissingColumn(&'static str),

    #[error("No matches found for club '{0}'")]
    EmptyInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FutError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub data: DataConfig,
    /// Coach tenures used to attribute match days to a coach
    #[serde(default)]
    pub coaches: Vec<analysis::coach::CoachTenure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Reference club whose matches are aggregated
    pub club: String,
    /// Rest gaps of this many days or more are excluded as season breaks
    pub rest_cutoff_days: i64,
    /// What to do with unparseable score strings
    pub score_policy: data::results::ScorePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// League results export (all fixtures)
    pub results_path: String,
    /// Merged GPS/match-day export
    pub sessions_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            analysis: AnalysisConfig {
                club: "América (MG)".to_string(),
                rest_cutoff_days: 10,
                score_policy: data::results::ScorePolicy::ZeroFill,
            },
            data: DataConfig {
                results_path: "data/matches.csv".to_string(),
                sessions_path: "data/gps_matches.csv".to_string(),
            },
            coaches: vec![
                analysis::coach::CoachTenure {
                    name: "Enderson Moreira".to_string(),
                    start: NaiveDate::from_ymd_opt(2016, 7, 20).unwrap(),
                    end: NaiveDate::from_ymd_opt(2018, 6, 19).unwrap(),
                },
                analysis::coach::CoachTenure {
                    name: "Ricardo Drubscky".to_string(),
                    start: NaiveDate::from_ymd_opt(2018, 6, 20).unwrap(),
                    end: NaiveDate::from_ymd_opt(2018, 7, 23).unwrap(),
                },
                analysis::coach::CoachTenure {
                    name: "Adilson Batista".to_string(),
                    start: NaiveDate::from_ymd_opt(2018, 7, 24).unwrap(),
                    end: NaiveDate::from_ymd_opt(2018, 11, 10).unwrap(),
                },
                analysis::coach::CoachTenure {
                    name: "Givanildo Oliveira".to_string(),
                    start: NaiveDate::from_ymd_opt(2018, 11, 11).unwrap(),
                    end: NaiveDate::from_ymd_opt(2019, 5, 1).unwrap(),
                },
            ],
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FutError::Config(format!("Failed to read config file {}: {}", path, e)))?;
        toml::from_str(&content)
            .map_err(|e| FutError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FutError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_goals() {
        assert_eq!(MatchOutcome::from_goals(2, 1), MatchOutcome::Win);
        assert_eq!(MatchOutcome::from_goals(0, 0), MatchOutcome::Draw);
        assert_eq!(MatchOutcome::from_goals(1, 3), MatchOutcome::Loss);
    }

    #[test]
    fn test_fixture_perspective() {
        let fixture = Fixture {
            date: NaiveDate::from_ymd_opt(2022, 4, 10).unwrap(),
            home_team: "América (MG)".to_string(),
            away_team: "Atlético (GO)".to_string(),
            home_goals: 2,
            away_goals: 1,
        };

        assert!(fixture.involves("América (MG)"));
        assert!(!fixture.involves("Flamengo"));
        assert_eq!(fixture.is_home("América (MG)"), Some(true));
        assert_eq!(fixture.goals_for("Atlético (GO)"), Some(1));
        assert_eq!(fixture.goals_against("Atlético (GO)"), Some(2));
        assert_eq!(fixture.opponent("América (MG)"), Some("Atlético (GO)"));
        assert_eq!(fixture.opponent("Flamengo"), None);
    }

    #[test]
    fn test_venue_flag() {
        assert_eq!(Venue::from_flag("Em casa"), Some(Venue::Home));
        assert_eq!(Venue::from_flag("Visitante"), Some(Venue::Away));
        assert_eq!(Venue::from_flag("neutral"), None);
    }

    #[test]
    fn test_venue_ordering() {
        // Bucket ordering relies on Home sorting before Away
        assert!(Venue::Home < Venue::Away);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.analysis.club, config.analysis.club);
        assert_eq!(parsed.analysis.rest_cutoff_days, 10);
        assert_eq!(parsed.coaches.len(), 4);
    }
}

//! Coach attribution and per-coach performance summaries

use crate::{ClubMatch, MatchOutcome, Venue};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One coach's spell in charge, inclusive on both ends
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachTenure {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Find the coach in charge on a given date
pub fn assign(tenures: &[CoachTenure], date: NaiveDate) -> Option<&str> {
    tenures
        .iter()
        .find(|t| date >= t.start && date <= t.end)
        .map(|t| t.name.as_str())
}

/// Performance aggregate for one coach's match days
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoachSummary {
    pub coach: String,
    pub games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub goals_for: u32,
    pub goals_against: u32,
    pub home_games: usize,
    pub home_wins: usize,
    pub away_games: usize,
    pub away_wins: usize,
    possession_sum: f64,
    possession_samples: usize,
}

impl CoachSummary {
    fn add(&mut self, record: &ClubMatch) {
        self.games += 1;
        self.goals_for += record.goals_for;
        self.goals_against += record.goals_against;

        match record.outcome() {
            MatchOutcome::Win => self.wins += 1,
            MatchOutcome::Draw => self.draws += 1,
            MatchOutcome::Loss => self.losses += 1,
        }

        match record.venue {
            Venue::Home => {
                self.home_games += 1;
                if record.outcome() == MatchOutcome::Win {
                    self.home_wins += 1;
                }
            }
            Venue::Away => {
                self.away_games += 1;
                if record.outcome() == MatchOutcome::Win {
                    self.away_wins += 1;
                }
            }
        }

        if let Some(p) = record.possession {
            self.possession_sum += p;
            self.possession_samples += 1;
        }
    }

    /// Overall win rate as a percentage
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64 * 100.0
        }
    }

    pub fn home_win_rate(&self) -> f64 {
        if self.home_games == 0 {
            0.0
        } else {
            self.home_wins as f64 / self.home_games as f64 * 100.0
        }
    }

    pub fn away_win_rate(&self) -> f64 {
        if self.away_games == 0 {
            0.0
        } else {
            self.away_wins as f64 / self.away_games as f64 * 100.0
        }
    }

    pub fn goals_for_avg(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.goals_for as f64 / self.games as f64
        }
    }

    pub fn goals_against_avg(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.goals_against as f64 / self.games as f64
        }
    }

    /// Average ball possession, where the export carried it
    pub fn possession_avg(&self) -> Option<f64> {
        if self.possession_samples == 0 {
            None
        } else {
            Some(self.possession_sum / self.possession_samples as f64)
        }
    }
}

/// Group match days by coach.
///
/// The coach comes from the record itself when the export carries a
/// coach column, otherwise from the tenure table. Match days with no
/// attributable coach are left out. Summaries are ordered by each
/// coach's first match day.
pub fn summarize(matches: &[ClubMatch], tenures: &[CoachTenure]) -> Vec<CoachSummary> {
    let mut order: Vec<String> = Vec::new();
    let mut summaries: HashMap<String, CoachSummary> = HashMap::new();

    for record in matches {
        let coach = record
            .coach
            .as_deref()
            .or_else(|| assign(tenures, record.date));
        let coach = match coach {
            Some(name) => name.to_string(),
            None => {
                log::debug!("{}: no coach attributable, match day left out", record.date);
                continue;
            }
        };

        if !summaries.contains_key(&coach) {
            order.push(coach.clone());
        }
        summaries
            .entry(coach.clone())
            .or_insert_with(|| CoachSummary {
                coach,
                ..CoachSummary::default()
            })
            .add(record);
    }

    order
        .into_iter()
        .filter_map(|name| summaries.remove(&name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenures() -> Vec<CoachTenure> {
        vec![
            CoachTenure {
                name: "First Coach".to_string(),
                start: NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2018, 6, 30).unwrap(),
            },
            CoachTenure {
                name: "Second Coach".to_string(),
                start: NaiveDate::from_ymd_opt(2018, 7, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2018, 12, 31).unwrap(),
            },
        ]
    }

    fn match_day(
        date: NaiveDate,
        venue: Venue,
        goals_for: u32,
        goals_against: u32,
        possession: Option<f64>,
    ) -> ClubMatch {
        ClubMatch {
            date,
            venue,
            opponent: "Opponent".to_string(),
            goals_for,
            goals_against,
            possession,
            coach: None,
        }
    }

    #[test]
    fn test_assign_inclusive_boundaries() {
        let tenures = tenures();

        let last_day = NaiveDate::from_ymd_opt(2018, 6, 30).unwrap();
        let first_day = NaiveDate::from_ymd_opt(2018, 7, 1).unwrap();
        let outside = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();

        assert_eq!(assign(&tenures, last_day), Some("First Coach"));
        assert_eq!(assign(&tenures, first_day), Some("Second Coach"));
        assert_eq!(assign(&tenures, outside), None);
    }

    #[test]
    fn test_summarize_groups_by_tenure() {
        let matches = vec![
            match_day(
                NaiveDate::from_ymd_opt(2018, 3, 10).unwrap(),
                Venue::Home,
                2,
                0,
                Some(60.0),
            ),
            match_day(
                NaiveDate::from_ymd_opt(2018, 3, 17).unwrap(),
                Venue::Away,
                0,
                1,
                Some(40.0),
            ),
            match_day(
                NaiveDate::from_ymd_opt(2018, 8, 5).unwrap(),
                Venue::Home,
                1,
                1,
                None,
            ),
        ];

        let summaries = summarize(&matches, &tenures());

        assert_eq!(summaries.len(), 2);

        let first = &summaries[0];
        assert_eq!(first.coach, "First Coach");
        assert_eq!(first.games, 2);
        assert_eq!(first.wins, 1);
        assert_eq!(first.losses, 1);
        assert_eq!(first.home_win_rate(), 100.0);
        assert_eq!(first.away_win_rate(), 0.0);
        assert_eq!(first.possession_avg(), Some(50.0));

        let second = &summaries[1];
        assert_eq!(second.coach, "Second Coach");
        assert_eq!(second.draws, 1);
        assert_eq!(second.possession_avg(), None);
    }

    #[test]
    fn test_record_coach_column_wins_over_tenures() {
        let mut record = match_day(
            NaiveDate::from_ymd_opt(2018, 3, 10).unwrap(),
            Venue::Home,
            1,
            0,
            None,
        );
        record.coach = Some("Interim".to_string());

        let summaries = summarize(&[record], &tenures());
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].coach, "Interim");
    }

    #[test]
    fn test_unattributable_match_left_out() {
        let record = match_day(
            NaiveDate::from_ymd_opt(2019, 5, 5).unwrap(),
            Venue::Home,
            1,
            0,
            None,
        );
        assert!(summarize(&[record], &tenures()).is_empty());
    }
}

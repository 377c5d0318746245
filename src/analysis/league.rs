//! Per-team season statistics across the full fixture list
//!
//! Builds the league-wide comparison table: home/away win-draw-loss
//! splits, venue-split goal tallies and the longest win and loss
//! streaks per club.

use crate::analysis::streaks::longest_streak;
use crate::{Fixture, MatchOutcome};
use serde::Serialize;
use std::collections::HashMap;

/// Season statistics for one club
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClubRecord {
    pub home_wins: usize,
    pub home_draws: usize,
    pub home_losses: usize,
    pub away_wins: usize,
    pub away_draws: usize,
    pub away_losses: usize,
    pub home_goals_for: u32,
    pub home_goals_against: u32,
    pub away_goals_for: u32,
    pub away_goals_against: u32,
    pub longest_win_streak: usize,
    pub longest_loss_streak: usize,
}

impl ClubRecord {
    fn update(&mut self, is_home: bool, goals_for: u32, goals_against: u32) {
        let outcome = MatchOutcome::from_goals(goals_for, goals_against);
        if is_home {
            self.home_goals_for += goals_for;
            self.home_goals_against += goals_against;
            match outcome {
                MatchOutcome::Win => self.home_wins += 1,
                MatchOutcome::Draw => self.home_draws += 1,
                MatchOutcome::Loss => self.home_losses += 1,
            }
        } else {
            self.away_goals_for += goals_for;
            self.away_goals_against += goals_against;
            match outcome {
                MatchOutcome::Win => self.away_wins += 1,
                MatchOutcome::Draw => self.away_draws += 1,
                MatchOutcome::Loss => self.away_losses += 1,
            }
        }
    }

    pub fn home_games(&self) -> usize {
        self.home_wins + self.home_draws + self.home_losses
    }

    pub fn away_games(&self) -> usize {
        self.away_wins + self.away_draws + self.away_losses
    }

    pub fn total_games(&self) -> usize {
        self.home_games() + self.away_games()
    }

    pub fn wins(&self) -> usize {
        self.home_wins + self.away_wins
    }

    pub fn goals_for(&self) -> u32 {
        self.home_goals_for + self.away_goals_for
    }

    pub fn goals_against(&self) -> u32 {
        self.home_goals_against + self.away_goals_against
    }

    pub fn goal_difference(&self) -> i64 {
        self.goals_for() as i64 - self.goals_against() as i64
    }

    /// Overall win rate as a percentage
    pub fn win_rate(&self) -> f64 {
        if self.total_games() == 0 {
            0.0
        } else {
            self.wins() as f64 / self.total_games() as f64 * 100.0
        }
    }

    pub fn home_win_rate(&self) -> f64 {
        if self.home_games() == 0 {
            0.0
        } else {
            self.home_wins as f64 / self.home_games() as f64 * 100.0
        }
    }

    pub fn away_win_rate(&self) -> f64 {
        if self.away_games() == 0 {
            0.0
        } else {
            self.away_wins as f64 / self.away_games() as f64 * 100.0
        }
    }

    pub fn home_points(&self) -> usize {
        self.home_wins * 3 + self.home_draws
    }

    pub fn away_points(&self) -> usize {
        self.away_wins * 3 + self.away_draws
    }
}

/// Compute season statistics for every club in the fixture list.
///
/// Streaks are tracked independently over each club's home-game and
/// away-game sequences in date order, and the longer of the two runs is
/// reported. Output is sorted by descending win rate, ties broken by
/// name.
pub fn league_table(fixtures: &[Fixture]) -> Vec<(String, ClubRecord)> {
    let mut chronological: Vec<&Fixture> = fixtures.iter().collect();
    chronological.sort_by_key(|f| f.date);

    let mut records: HashMap<String, ClubRecord> = HashMap::new();
    let mut home_outcomes: HashMap<String, Vec<MatchOutcome>> = HashMap::new();
    let mut away_outcomes: HashMap<String, Vec<MatchOutcome>> = HashMap::new();

    for fixture in &chronological {
        records
            .entry(fixture.home_team.clone())
            .or_default()
            .update(true, fixture.home_goals, fixture.away_goals);
        records
            .entry(fixture.away_team.clone())
            .or_default()
            .update(false, fixture.away_goals, fixture.home_goals);

        home_outcomes
            .entry(fixture.home_team.clone())
            .or_default()
            .push(MatchOutcome::from_goals(fixture.home_goals, fixture.away_goals));
        away_outcomes
            .entry(fixture.away_team.clone())
            .or_default()
            .push(MatchOutcome::from_goals(fixture.away_goals, fixture.home_goals));
    }

    for (club, record) in records.iter_mut() {
        let home = home_outcomes.get(club).cloned().unwrap_or_default();
        let away = away_outcomes.get(club).cloned().unwrap_or_default();

        record.longest_win_streak = longest_streak(home.iter().copied(), MatchOutcome::Win)
            .max(longest_streak(away.iter().copied(), MatchOutcome::Win));
        record.longest_loss_streak = longest_streak(home.iter().copied(), MatchOutcome::Loss)
            .max(longest_streak(away.iter().copied(), MatchOutcome::Loss));
    }

    let mut table: Vec<(String, ClubRecord)> = records.into_iter().collect();
    table.sort_by(|a, b| {
        b.1.win_rate()
            .partial_cmp(&a.1.win_rate())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixture(day: u32, home: &str, away: &str, hg: u32, ag: u32) -> Fixture {
        Fixture {
            date: NaiveDate::from_ymd_opt(2022, 4, day).unwrap(),
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_goals: hg,
            away_goals: ag,
        }
    }

    #[test]
    fn test_venue_splits() {
        let fixtures = vec![
            fixture(1, "A", "B", 2, 0),
            fixture(8, "B", "A", 1, 1),
            fixture(15, "A", "B", 0, 1),
        ];

        let table = league_table(&fixtures);
        let (_, a) = table.iter().find(|(name, _)| name == "A").unwrap();

        assert_eq!(a.home_wins, 1);
        assert_eq!(a.home_losses, 1);
        assert_eq!(a.away_draws, 1);
        assert_eq!(a.total_games(), 3);
        assert_eq!(a.home_goals_for, 2);
        assert_eq!(a.away_goals_for, 1);
        assert_eq!(a.goal_difference(), 1);
        assert_eq!(a.home_points(), 3);
        assert_eq!(a.away_points(), 1);
    }

    #[test]
    fn test_streaks_max_over_venues() {
        // B wins twice away and once at home, interleaved so the
        // combined sequence would show a longer run than either venue
        // sequence alone.
        let fixtures = vec![
            fixture(1, "A", "B", 0, 1),  // B away win
            fixture(8, "B", "A", 2, 0),  // B home win
            fixture(15, "C", "B", 0, 3), // B away win
            fixture(22, "B", "C", 0, 1), // B home loss
        ];

        let table = league_table(&fixtures);
        let (_, b) = table.iter().find(|(name, _)| name == "B").unwrap();

        // Away sequence: W, W. Home sequence: W, L.
        assert_eq!(b.longest_win_streak, 2);
        assert_eq!(b.longest_loss_streak, 1);
    }

    #[test]
    fn test_table_sorted_by_win_rate() {
        let fixtures = vec![
            fixture(1, "A", "B", 3, 0),
            fixture(8, "C", "A", 0, 2),
            fixture(15, "B", "C", 1, 1),
        ];

        let table = league_table(&fixtures);
        assert_eq!(table[0].0, "A");
        assert_eq!(table[0].1.win_rate(), 100.0);
    }

    #[test]
    fn test_empty_fixture_list() {
        assert!(league_table(&[]).is_empty());
    }
}

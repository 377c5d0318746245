//! Home/away performance split over match days

use crate::{ClubMatch, MatchOutcome, Venue};
use serde::Serialize;

/// Aggregate for one venue over a set of match days
#[derive(Debug, Clone, Serialize)]
pub struct VenueSplit {
    pub venue: Venue,
    pub games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub goals_for: u32,
    pub goals_against: u32,
    possession_sum: f64,
    possession_samples: usize,
}

impl VenueSplit {
    fn new(venue: Venue) -> Self {
        VenueSplit {
            venue,
            games: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            possession_sum: 0.0,
            possession_samples: 0,
        }
    }

    fn add(&mut self, record: &ClubMatch) {
        self.games += 1;
        self.goals_for += record.goals_for;
        self.goals_against += record.goals_against;
        match record.outcome() {
            MatchOutcome::Win => self.wins += 1,
            MatchOutcome::Draw => self.draws += 1,
            MatchOutcome::Loss => self.losses += 1,
        }
        if let Some(p) = record.possession {
            self.possession_sum += p;
            self.possession_samples += 1;
        }
    }

    /// Win rate as a percentage
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64 * 100.0
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

    pub fn goal_difference_avg(&self) -> f64 {
        self.goals_for_avg() - self.goals_against_avg()
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

/// Split match days by venue, Home first. Only venues with at least one
/// match are returned.
pub fn split_by_venue(matches: &[ClubMatch]) -> Vec<VenueSplit> {
    let mut home = VenueSplit::new(Venue::Home);
    let mut away = VenueSplit::new(Venue::Away);

    for record in matches {
        match record.venue {
            Venue::Home => home.add(record),
            Venue::Away => away.add(record),
        }
    }

    [home, away].into_iter().filter(|s| s.games > 0).collect()
}

//! Rest-interval (microcycle) derivation and aggregation
//!
//! A microcycle is the number of calendar days between one fixture and
//! the club's next fixture. Matches are bucketed by microcycle length,
//! optionally split by venue, to show how performance varies with the
//! rest window available to prepare.

use crate::{ClubMatch, MatchOutcome, Venue};
use serde::Serialize;
use std::collections::BTreeMap;

/// A club match annotated with the days until the club's next fixture
#[derive(Debug, Clone)]
pub struct RestedMatch {
    pub record: ClubMatch,
    pub rest_days: i64,
}

/// Annotate each match with its rest interval.
///
/// Input must be in ascending date order (as `club_view` returns it).
/// The chronologically last match has no successor, so no rest interval
/// is observable for it and it is dropped rather than zero-filled.
pub fn derive_rest_days(matches: &[ClubMatch]) -> Vec<RestedMatch> {
    matches
        .windows(2)
        .map(|pair| RestedMatch {
            record: pair[0].clone(),
            rest_days: (pair[1].date - pair[0].date).num_days(),
        })
        .collect()
}

/// Performance aggregate for one (rest interval, venue) group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestBucket {
    pub rest_days: i64,
    /// None when aggregating across both venues
    pub venue: Option<Venue>,
    pub total_matches: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl RestBucket {
    fn new(rest_days: i64, venue: Option<Venue>) -> Self {
        RestBucket {
            rest_days,
            venue,
            total_matches: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
        }
    }

    fn add(&mut self, record: &ClubMatch) {
        self.total_matches += 1;
        self.goals_for += record.goals_for;
        self.goals_against += record.goals_against;
        match record.outcome() {
            MatchOutcome::Win => self.wins += 1,
            MatchOutcome::Draw => self.draws += 1,
            MatchOutcome::Loss => self.losses += 1,
        }
    }

    /// Win rate as a percentage
    pub fn win_rate(&self) -> f64 {
        if self.total_matches == 0 {
            0.0
        } else {
            self.wins as f64 / self.total_matches as f64 * 100.0
        }
    }

    /// League points (3 per win, 1 per draw) per match
    pub fn points_per_match(&self) -> f64 {
        if self.total_matches == 0 {
            0.0
        } else {
            (self.wins * 3 + self.draws) as f64 / self.total_matches as f64
        }
    }

    pub fn goal_difference(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }

    pub fn goals_for_per_match(&self) -> f64 {
        if self.total_matches == 0 {
            0.0
        } else {
            self.goals_for as f64 / self.total_matches as f64
        }
    }

    pub fn goals_against_per_match(&self) -> f64 {
        if self.total_matches == 0 {
            0.0
        } else {
            self.goals_against as f64 / self.total_matches as f64
        }
    }
}

/// Group rested matches into performance buckets.
///
/// Gaps of `cutoff_days` or more are season breaks, not microcycles,
/// and are excluded before grouping. Only non-empty buckets are
/// emitted, ordered ascending by rest interval and then Home before
/// Away when `split_venue` is set.
pub fn aggregate(rested: &[RestedMatch], cutoff_days: i64, split_venue: bool) -> Vec<RestBucket> {
    let mut buckets: BTreeMap<(i64, Option<Venue>), RestBucket> = BTreeMap::new();

    for rm in rested {
        if rm.rest_days >= cutoff_days {
            log::debug!(
                "{}: {}-day gap at or above cutoff {}, excluded",
                rm.record.date,
                rm.rest_days,
                cutoff_days
            );
            continue;
        }

        let venue = if split_venue {
            Some(rm.record.venue)
        } else {
            None
        };
        buckets
            .entry((rm.rest_days, venue))
            .or_insert_with(|| RestBucket::new(rm.rest_days, venue))
            .add(&rm.record);
    }

    buckets.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn club_match(day: u32, venue: Venue, goals_for: u32, goals_against: u32) -> ClubMatch {
        ClubMatch {
            date: NaiveDate::from_ymd_opt(2022, 4, day).unwrap(),
            venue,
            opponent: "Opponent".to_string(),
            goals_for,
            goals_against,
            possession: None,
            coach: None,
        }
    }

    #[test]
    fn test_rest_days_from_next_match() {
        let matches = vec![
            club_match(1, Venue::Home, 1, 0),
            club_match(4, Venue::Away, 0, 0),
            club_match(11, Venue::Home, 2, 2),
        ];

        let rested = derive_rest_days(&matches);

        assert_eq!(rested.len(), 2);
        assert_eq!(rested[0].rest_days, 3);
        assert_eq!(rested[1].rest_days, 7);
    }

    #[test]
    fn test_last_match_dropped_not_zeroed() {
        let matches = vec![club_match(1, Venue::Home, 1, 0)];
        assert!(derive_rest_days(&matches).is_empty());
    }

    #[test]
    fn test_cutoff_boundary() {
        let matches = vec![
            club_match(1, Venue::Home, 1, 0),  // 9-day gap: kept
            club_match(10, Venue::Home, 1, 0), // 10-day gap: excluded
            club_match(20, Venue::Home, 1, 0),
        ];

        let rested = derive_rest_days(&matches);
        let buckets = aggregate(&rested, 10, false);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].rest_days, 9);
        assert_eq!(buckets[0].total_matches, 1);
    }

    #[test]
    fn test_counts_sum_to_filtered_total() {
        let matches = vec![
            club_match(1, Venue::Home, 2, 0),
            club_match(4, Venue::Away, 1, 1),
            club_match(7, Venue::Home, 0, 1),
            club_match(10, Venue::Away, 3, 2),
            club_match(13, Venue::Home, 1, 0),
        ];

        let rested = derive_rest_days(&matches);
        let buckets = aggregate(&rested, 10, false);

        let total: usize = buckets.iter().map(|b| b.total_matches).sum();
        let outcomes: usize = buckets.iter().map(|b| b.wins + b.draws + b.losses).sum();
        assert_eq!(total, rested.len());
        assert_eq!(outcomes, total);
    }

    #[test]
    fn test_aggregate_is_pure() {
        let matches = vec![
            club_match(1, Venue::Home, 2, 0),
            club_match(4, Venue::Away, 1, 1),
            club_match(8, Venue::Home, 0, 1),
        ];
        let rested = derive_rest_days(&matches);

        let first = aggregate(&rested, 10, true);
        let second = aggregate(&rested, 10, true);
        assert_eq!(first, second);
    }

    #[test]
    fn test_bucket_metrics() {
        let matches = vec![
            club_match(1, Venue::Home, 2, 0),  // win
            club_match(4, Venue::Home, 1, 1),  // draw
            club_match(7, Venue::Home, 0, 3),  // loss
            club_match(10, Venue::Home, 0, 0), // successor only
        ];

        let rested = derive_rest_days(&matches);
        let buckets = aggregate(&rested, 10, false);

        assert_eq!(buckets.len(), 1);
        let bucket = &buckets[0];
        assert_eq!(bucket.rest_days, 3);
        assert_eq!(bucket.total_matches, 3);
        assert_eq!(bucket.wins, 1);
        assert_eq!(bucket.draws, 1);
        assert_eq!(bucket.losses, 1);
        assert_eq!(bucket.goals_for, 3);
        assert_eq!(bucket.goals_against, 4);
        assert_eq!(bucket.goal_difference(), -1);
        assert!((bucket.win_rate() - 33.333).abs() < 0.01);
        assert!((bucket.points_per_match() - 4.0 / 3.0).abs() < 1e-9);
        assert!((bucket.goals_for_per_match() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_venue_split_end_to_end() {
        // Five matches, five days apart, alternating venues
        let matches = vec![
            club_match(1, Venue::Home, 1, 0),
            club_match(6, Venue::Away, 0, 2),
            club_match(11, Venue::Home, 2, 2),
            club_match(16, Venue::Away, 3, 1),
            club_match(21, Venue::Home, 0, 1),
        ];

        let rested = derive_rest_days(&matches);
        let buckets = aggregate(&rested, 10, true);

        // One bucket per (5, venue) pair, Home ordered first
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].rest_days, 5);
        assert_eq!(buckets[0].venue, Some(Venue::Home));
        assert_eq!(buckets[0].total_matches, 2);
        assert_eq!(buckets[1].venue, Some(Venue::Away));
        assert_eq!(buckets[1].total_matches, 2);

        let total: usize = buckets.iter().map(|b| b.total_matches).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_bucket_ordering() {
        let matches = vec![
            club_match(1, Venue::Away, 1, 0), // 6-day gap
            club_match(7, Venue::Home, 1, 0), // 3-day gap
            club_match(10, Venue::Away, 1, 0), // 3-day gap
            club_match(13, Venue::Home, 1, 0),
        ];

        let rested = derive_rest_days(&matches);
        let buckets = aggregate(&rested, 10, true);

        let keys: Vec<(i64, Option<Venue>)> =
            buckets.iter().map(|b| (b.rest_days, b.venue)).collect();
        assert_eq!(
            keys,
            vec![
                (3, Some(Venue::Home)),
                (3, Some(Venue::Away)),
                (6, Some(Venue::Away)),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(derive_rest_days(&[]).is_empty());
        assert!(aggregate(&[], 10, true).is_empty());
    }
}

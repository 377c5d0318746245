//! Data ingestion
//!
//! CSV readers for the league results export and the merged GPS
//! match-day export.

pub mod results;
pub mod sessions;

pub use results::{club_view, read_fixtures, read_fixtures_file, ResultsImport, ScorePolicy};
pub use sessions::{read_match_days, read_match_days_file, MatchDayImport};

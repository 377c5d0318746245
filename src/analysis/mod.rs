//! Match-record aggregation
//!
//! Derives outcomes, rest intervals and streaks from normalized match
//! records and groups them into summary rows for the reporting layer.

pub mod coach;
pub mod league;
pub mod microcycle;
pub mod streaks;
pub mod venue;

pub use coach::{CoachSummary, CoachTenure};
pub use league::ClubRecord;
pub use microcycle::{aggregate, derive_rest_days, RestBucket, RestedMatch};
pub use streaks::longest_streak;
pub use venue::VenueSplit;

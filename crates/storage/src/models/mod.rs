mod activity;
mod composite_score;
mod domain;
mod leaderboard;
mod opportunity;
mod profile;
mod recommendation;

pub use activity::ActivityCounts;
pub use composite_score::{CompositeScore, ScoreStanding};
pub use domain::{Domain, LeaderboardPeriod, OpportunityStatus, ParseLabelError};
pub use leaderboard::{GLOBAL_CATEGORY, LeaderboardEntry};
pub use opportunity::Opportunity;
pub use profile::StudentProfile;
pub use recommendation::Recommendation;

pub mod classifier;
pub mod composite;
pub mod leaderboard;
pub mod recommendation;

pub use classifier::{DomainClassifier, DomainTaxonomy};
pub use composite::{ScoreAggregator, ScoreBreakdown, ScoreInputs, ScoreWeights};
pub use leaderboard::{
    DashboardStats, LeaderboardRanker, RebuildSummary, assign_ranks, dashboard_stats, percentile,
};
pub use recommendation::{MatchingConfig, RecommendationMatcher, StalePolicy};

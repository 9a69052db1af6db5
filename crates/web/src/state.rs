use std::sync::Arc;

use storage::Database;
use storage::services::{
    DomainClassifier, LeaderboardRanker, MatchingConfig, RecommendationMatcher, ScoreAggregator,
    StalePolicy,
};

use crate::config::Config;

/// Shared handles for every request. Engine configuration is fixed at startup.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub classifier: Arc<DomainClassifier>,
    pub matcher: Arc<RecommendationMatcher>,
    pub aggregator: Arc<ScoreAggregator>,
    pub ranker: LeaderboardRanker,
}

impl AppState {
    pub fn new(db: Database, config: &Config) -> Self {
        Self {
            db,
            classifier: Arc::new(DomainClassifier::default()),
            matcher: Arc::new(RecommendationMatcher::new(matching_config(config))),
            aggregator: Arc::new(ScoreAggregator::default()),
            ranker: LeaderboardRanker::new(),
        }
    }
}

fn matching_config(config: &Config) -> MatchingConfig {
    MatchingConfig {
        max_results: config.recommendation_limit,
        stale_policy: if config.prune_stale_recommendations {
            StalePolicy::Prune
        } else {
            StalePolicy::Retain
        },
        ..MatchingConfig::default()
    }
}

//! In-process implementation of every collaborator trait.
//!
//! Rows live behind a mutex and follow the same uniqueness rules as the
//! Postgres schema, so engine behaviour can be exercised without a database.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{
    ActivityCounts, CompositeScore, GLOBAL_CATEGORY, LeaderboardEntry, LeaderboardPeriod,
    Opportunity, OpportunityStatus, Recommendation, ScoreStanding, StudentProfile,
};
use crate::traits::{
    ActivityCounters, LeaderboardStore, OpportunityCatalog, ProfileStore, RecommendationStore,
    ScoreStore,
};

#[derive(Default)]
struct State {
    universities: BTreeMap<Uuid, Option<String>>,
    profiles: HashMap<Uuid, StudentProfile>,
    opportunities: Vec<Opportunity>,
    applications: Vec<(Uuid, Uuid, String)>,
    community: HashMap<Uuid, (i64, i64)>,
    recommendations: Vec<Recommendation>,
    scores: HashMap<Uuid, CompositeScore>,
    leaderboard: Vec<LeaderboardEntry>,
    profile_failure: Option<String>,
    catalog_failure: Option<String>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn put_user(&self, user_id: Uuid, university: Option<&str>) {
        self.state()
            .universities
            .insert(user_id, university.map(str::to_string));
    }

    pub fn put_profile(&self, profile: StudentProfile) {
        let mut state = self.state();
        state.universities.entry(profile.user_id).or_insert(None);
        state.profiles.insert(profile.user_id, profile);
    }

    /// Appends to the catalog, replacing an opportunity with the same id in place.
    pub fn put_opportunity(&self, opportunity: Opportunity) {
        let mut state = self.state();
        match state
            .opportunities
            .iter_mut()
            .find(|o| o.opportunity_id == opportunity.opportunity_id)
        {
            Some(existing) => *existing = opportunity,
            None => state.opportunities.push(opportunity),
        }
    }

    pub fn close_opportunity(&self, opportunity_id: Uuid) {
        let mut state = self.state();
        if let Some(opp) = state
            .opportunities
            .iter_mut()
            .find(|o| o.opportunity_id == opportunity_id)
        {
            opp.status = OpportunityStatus::Closed;
        }
    }

    pub fn add_application(&self, user_id: Uuid, opportunity_id: Uuid, status: &str) {
        self.state()
            .applications
            .push((user_id, opportunity_id, status.to_string()));
    }

    pub fn set_community_activity(&self, user_id: Uuid, posts: i64, comments: i64) {
        self.state().community.insert(user_id, (posts, comments));
    }

    /// Make profile lookups fail with a retryable error.
    pub fn fail_profiles(&self, message: &str) {
        self.state().profile_failure = Some(message.to_string());
    }

    /// Make catalog reads fail with a retryable error.
    pub fn fail_catalog(&self, message: &str) {
        self.state().catalog_failure = Some(message.to_string());
    }

    fn blank_score(user_id: Uuid) -> CompositeScore {
        CompositeScore {
            user_id,
            total_score: 0.0,
            academic_score: 0.0,
            application_score: 0.0,
            community_score: 0.0,
            match_quality_score: 0.0,
            profile_score: 0.0,
            match_quality_raw: 0.0,
            rank: None,
            last_calculated: Utc::now().naive_utc(),
        }
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_profile(&self, user_id: Uuid) -> Result<Option<StudentProfile>> {
        let state = self.state();
        if let Some(message) = &state.profile_failure {
            return Err(StorageError::Unavailable(message.clone()));
        }
        Ok(state.profiles.get(&user_id).cloned())
    }
}

#[async_trait]
impl OpportunityCatalog for MemoryStore {
    async fn list_open(&self) -> Result<Vec<Opportunity>> {
        let state = self.state();
        if let Some(message) = &state.catalog_failure {
            return Err(StorageError::Unavailable(message.clone()));
        }
        Ok(state
            .opportunities
            .iter()
            .filter(|o| o.status == OpportunityStatus::Open)
            .cloned()
            .collect())
    }

    async fn engaged_opportunity_ids(&self, user_id: Uuid) -> Result<HashSet<Uuid>> {
        let state = self.state();
        if let Some(message) = &state.catalog_failure {
            return Err(StorageError::Unavailable(message.clone()));
        }
        Ok(state
            .applications
            .iter()
            .filter(|(user, _, _)| *user == user_id)
            .map(|(_, opportunity, _)| *opportunity)
            .collect())
    }
}

#[async_trait]
impl ActivityCounters for MemoryStore {
    async fn activity_counts(&self, user_id: Uuid) -> Result<ActivityCounts> {
        let state = self.state();
        let submitted_applications = state
            .applications
            .iter()
            .filter(|(user, _, status)| *user == user_id && status == "submitted")
            .count() as i64;
        let (posts, comments) = state.community.get(&user_id).copied().unwrap_or_default();

        Ok(ActivityCounts {
            submitted_applications,
            posts,
            comments,
        })
    }
}

#[async_trait]
impl RecommendationStore for MemoryStore {
    async fn upsert_recommendation(
        &self,
        user_id: Uuid,
        opportunity_id: Uuid,
        score: f64,
        reason: &str,
    ) -> Result<Recommendation> {
        let mut state = self.state();
        if let Some(existing) = state
            .recommendations
            .iter_mut()
            .find(|r| r.user_id == user_id && r.opportunity_id == opportunity_id)
        {
            existing.score = score;
            existing.reason = reason.to_string();
            return Ok(existing.clone());
        }

        let recommendation = Recommendation {
            recommendation_id: Uuid::new_v4(),
            user_id,
            opportunity_id,
            score,
            reason: reason.to_string(),
            is_viewed: false,
            created_at: Utc::now().naive_utc(),
        };
        state.recommendations.push(recommendation.clone());
        Ok(recommendation)
    }

    async fn prune_recommendations(&self, user_id: Uuid, keep: &[Uuid]) -> Result<u64> {
        let mut state = self.state();
        let before = state.recommendations.len();
        state
            .recommendations
            .retain(|r| r.user_id != user_id || keep.contains(&r.opportunity_id));
        Ok((before - state.recommendations.len()) as u64)
    }

    async fn list_recommendations(&self, user_id: Uuid) -> Result<Vec<Recommendation>> {
        let state = self.state();
        let mut recommendations: Vec<Recommendation> = state
            .recommendations
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        recommendations.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(recommendations)
    }

    async fn mark_viewed(&self, user_id: Uuid, recommendation_id: Uuid) -> Result<Recommendation> {
        let mut state = self.state();
        let recommendation = state
            .recommendations
            .iter_mut()
            .find(|r| r.recommendation_id == recommendation_id && r.user_id == user_id)
            .ok_or(StorageError::NotFound)?;
        recommendation.is_viewed = true;
        Ok(recommendation.clone())
    }
}

#[async_trait]
impl ScoreStore for MemoryStore {
    async fn get_or_create_score(&self, user_id: Uuid) -> Result<CompositeScore> {
        let mut state = self.state();
        state.universities.entry(user_id).or_insert(None);
        Ok(state
            .scores
            .entry(user_id)
            .or_insert_with(|| Self::blank_score(user_id))
            .clone())
    }

    async fn save_score(&self, score: &CompositeScore) -> Result<CompositeScore> {
        let mut state = self.state();
        let stored = state
            .scores
            .entry(score.user_id)
            .or_insert_with(|| Self::blank_score(score.user_id));
        let rank = stored.rank;
        *stored = CompositeScore {
            rank,
            last_calculated: Utc::now().naive_utc(),
            ..score.clone()
        };
        Ok(stored.clone())
    }

    async fn set_match_quality(&self, user_id: Uuid, raw: f64) -> Result<CompositeScore> {
        let mut state = self.state();
        state.universities.entry(user_id).or_insert(None);
        let stored = state
            .scores
            .entry(user_id)
            .or_insert_with(|| Self::blank_score(user_id));
        stored.match_quality_raw = raw;
        Ok(stored.clone())
    }

    async fn list_standings(&self) -> Result<Vec<ScoreStanding>> {
        let state = self.state();
        let mut standings: Vec<ScoreStanding> = state
            .scores
            .values()
            .map(|score| ScoreStanding {
                user_id: score.user_id,
                university: state.universities.get(&score.user_id).cloned().flatten(),
                total_score: score.total_score,
            })
            .collect();
        standings.sort_by_key(|s| s.user_id);
        Ok(standings)
    }

    async fn set_rank(&self, user_id: Uuid, rank: i32) -> Result<()> {
        let mut state = self.state();
        let score = state.scores.get_mut(&user_id).ok_or(StorageError::NotFound)?;
        score.rank = Some(rank);
        Ok(())
    }

    async fn count_users(&self) -> Result<i64> {
        Ok(self.state().universities.len() as i64)
    }
}

#[async_trait]
impl LeaderboardStore for MemoryStore {
    async fn upsert_entry(
        &self,
        user_id: Uuid,
        category: &str,
        period: LeaderboardPeriod,
        rank: i32,
        score: f64,
    ) -> Result<LeaderboardEntry> {
        let mut state = self.state();
        if let Some(existing) = state
            .leaderboard
            .iter_mut()
            .find(|e| e.user_id == user_id && e.category == category && e.period == period)
        {
            existing.rank = rank;
            existing.score = score;
            return Ok(existing.clone());
        }

        let entry = LeaderboardEntry {
            entry_id: Uuid::new_v4(),
            user_id,
            rank,
            score,
            category: category.to_string(),
            period,
            created_at: Utc::now().naive_utc(),
        };
        state.leaderboard.push(entry.clone());
        Ok(entry)
    }

    async fn list_entries(
        &self,
        category: &str,
        period: LeaderboardPeriod,
        limit: i64,
    ) -> Result<Vec<LeaderboardEntry>> {
        let state = self.state();
        let mut entries: Vec<LeaderboardEntry> = state
            .leaderboard
            .iter()
            .filter(|e| e.category == category && e.period == period)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.rank);
        entries.truncate(limit.max(0) as usize);
        Ok(entries)
    }

    async fn prune_entries(
        &self,
        category: &str,
        period: LeaderboardPeriod,
        keep: &[Uuid],
    ) -> Result<u64> {
        let mut state = self.state();
        let before = state.leaderboard.len();
        state.leaderboard.retain(|e| {
            e.category != category || e.period != period || keep.contains(&e.user_id)
        });
        Ok((before - state.leaderboard.len()) as u64)
    }

    async fn prune_categories(&self, period: LeaderboardPeriod, keep: &[String]) -> Result<u64> {
        let mut state = self.state();
        let before = state.leaderboard.len();
        state.leaderboard.retain(|e| {
            e.period != period || e.category == GLOBAL_CATEGORY || keep.contains(&e.category)
        });
        Ok((before - state.leaderboard.len()) as u64)
    }
}

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{ActivityCounts, CompositeScore, StudentProfile};
use crate::traits::{ActivityCounters, ProfileStore, ScoreStore};

/// Weights and saturation points of the composite score.
///
/// Every raw signal is first mapped onto `0..=signal_cap` and then multiplied
/// by its weight, so with weights summing to one the total lies in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub academic: f64,
    pub application_activity: f64,
    pub community_activity: f64,
    pub match_quality: f64,
    pub profile_completeness: f64,
    pub gpa_scale: f64,
    pub points_per_application: f64,
    pub points_per_post: f64,
    pub points_per_comment: f64,
    pub signal_cap: f64,
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.academic
            + self.application_activity
            + self.community_activity
            + self.match_quality
            + self.profile_completeness
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            academic: 0.25,
            application_activity: 0.20,
            community_activity: 0.20,
            match_quality: 0.20,
            profile_completeness: 0.15,
            gpa_scale: 4.0,
            points_per_application: 10.0,
            points_per_post: 5.0,
            points_per_comment: 2.0,
            signal_cap: 100.0,
        }
    }
}

/// Raw signals for one user. Missing values contribute zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreInputs {
    pub gpa: Option<f64>,
    pub completeness: Option<f64>,
    pub activity: ActivityCounts,
    pub match_quality_raw: f64,
}

impl ScoreInputs {
    pub fn new(
        profile: Option<&StudentProfile>,
        activity: ActivityCounts,
        match_quality_raw: f64,
    ) -> Self {
        Self {
            gpa: profile.and_then(|p| p.gpa).and_then(|gpa| gpa.to_f64()),
            completeness: profile.map(|p| f64::from(p.profile_completeness)),
            activity,
            match_quality_raw,
        }
    }
}

/// The five weight-scaled sub-scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScoreBreakdown {
    pub academic: f64,
    pub application_activity: f64,
    pub community_activity: f64,
    pub match_quality: f64,
    pub profile_completeness: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.academic
            + self.application_activity
            + self.community_activity
            + self.match_quality
            + self.profile_completeness
    }
}

impl From<&CompositeScore> for ScoreBreakdown {
    fn from(score: &CompositeScore) -> Self {
        Self {
            academic: score.academic_score,
            application_activity: score.application_score,
            community_activity: score.community_score,
            match_quality: score.match_quality_score,
            profile_completeness: score.profile_score,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScoreAggregator {
    weights: ScoreWeights,
}

impl ScoreAggregator {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// Pure weighted formula. Only the upper signal cap is enforced: negative
    /// inputs and completeness above 100 pass through unclamped.
    pub fn compute(&self, inputs: &ScoreInputs) -> ScoreBreakdown {
        let w = &self.weights;
        let cap = w.signal_cap;

        let academic = inputs
            .gpa
            .map(|gpa| (gpa / w.gpa_scale * 100.0).min(cap))
            .unwrap_or(0.0);

        let activity = &inputs.activity;
        let applications = (activity.submitted_applications as f64 * w.points_per_application).min(cap);
        let community = (activity.posts as f64 * w.points_per_post
            + activity.comments as f64 * w.points_per_comment)
            .min(cap);

        ScoreBreakdown {
            academic: academic * w.academic,
            application_activity: applications * w.application_activity,
            community_activity: community * w.community_activity,
            match_quality: inputs.match_quality_raw * w.match_quality,
            profile_completeness: inputs.completeness.unwrap_or(0.0) * w.profile_completeness,
        }
    }

    /// Recompute and persist the user's composite score.
    ///
    /// Match quality is re-scaled from the stored raw signal each time, so
    /// repeated calls without new data return the same total. The rank is
    /// left for the leaderboard rebuild.
    pub async fn recalculate(
        &self,
        user_id: Uuid,
        profiles: &dyn ProfileStore,
        counters: &dyn ActivityCounters,
        scores: &dyn ScoreStore,
    ) -> Result<CompositeScore> {
        let profile = profiles.find_profile(user_id).await?;
        let activity = counters.activity_counts(user_id).await?;
        let current = scores.get_or_create_score(user_id).await?;

        let inputs = ScoreInputs::new(profile.as_ref(), activity, current.match_quality_raw);
        let breakdown = self.compute(&inputs);

        let updated = CompositeScore {
            total_score: breakdown.total(),
            academic_score: breakdown.academic,
            application_score: breakdown.application_activity,
            community_score: breakdown.community_activity,
            match_quality_score: breakdown.match_quality,
            profile_score: breakdown.profile_completeness,
            ..current
        };
        let saved = scores.save_score(&updated).await?;

        info!(
            "Recalculated composite score for user {}: {:.2}",
            user_id, saved.total_score
        );

        Ok(saved)
    }
}

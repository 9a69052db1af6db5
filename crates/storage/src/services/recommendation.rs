use std::collections::HashSet;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Domain, Opportunity, OpportunityStatus, Recommendation, StudentProfile};
use crate::traits::{OpportunityCatalog, ProfileStore, RecommendationStore};

/// What happens to persisted recommendations that fell out of a fresh top-N.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StalePolicy {
    /// Leave them in place with their previous score.
    #[default]
    Retain,
    /// Delete them so the stored set equals the latest ranking.
    Prune,
}

#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// Domains paired with the profile keywords that earn a bonus on them.
    pub bonus_table: Vec<(Domain, Vec<String>)>,
    pub keyword_weight: f64,
    pub bonus_weight: f64,
    pub max_results: usize,
    /// How many interests are quoted in the reason string.
    pub reason_interests: usize,
    pub stale_policy: StalePolicy,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        let bonus = |domain: Domain, keywords: &[&str]| {
            (domain, keywords.iter().map(|k| k.to_string()).collect())
        };

        Self {
            bonus_table: vec![
                bonus(Domain::Research, &["research", "lab", "science"]),
                bonus(Domain::Fellowship, &["leadership", "policy", "global"]),
                bonus(Domain::Internship, &["engineering", "software", "business"]),
                bonus(Domain::Scholarship, &["academic", "gpa", "merit"]),
            ],
            keyword_weight: 1.0,
            bonus_weight: 0.5,
            max_results: 20,
            reason_interests: 3,
            stale_policy: StalePolicy::Retain,
        }
    }
}

/// Lower-cased matching vocabulary of a profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileKeywords {
    /// Interests then skills, de-duplicated, first occurrence kept.
    keywords: Vec<String>,
    /// Trimmed interests in stored order and case, used for the reason string.
    interests: Vec<String>,
}

impl ProfileKeywords {
    pub fn from_profile(profile: Option<&StudentProfile>) -> Self {
        let Some(profile) = profile else {
            return Self::default();
        };

        let interests: Vec<String> = profile
            .interests
            .iter()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();

        let mut seen = HashSet::new();
        let keywords = interests
            .iter()
            .chain(profile.skills.iter())
            .map(|v| v.trim().to_lowercase())
            .filter(|k| !k.is_empty() && seen.insert(k.clone()))
            .collect();

        Self {
            keywords,
            interests,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn contains(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }
}

#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub opportunity: &'a Opportunity,
    pub score: f64,
    pub reason: String,
}

/// Content-based matcher from a student profile to the opportunity catalog.
#[derive(Debug, Clone, Default)]
pub struct RecommendationMatcher {
    config: MatchingConfig,
}

impl RecommendationMatcher {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    /// Score one opportunity against the profile vocabulary.
    pub fn score_opportunity(&self, keywords: &ProfileKeywords, opportunity: &Opportunity) -> f64 {
        let haystack = format!(
            "{} {} {} {}",
            opportunity.title,
            opportunity.description,
            opportunity.domain.as_str(),
            opportunity.tags.join(" ")
        )
        .to_lowercase();

        let hits = keywords
            .keywords()
            .iter()
            .filter(|keyword| haystack.contains(keyword.as_str()))
            .count();
        let mut score = hits as f64 * self.config.keyword_weight;

        for (domain, bonus_keywords) in &self.config.bonus_table {
            if *domain != opportunity.domain {
                continue;
            }
            for keyword in bonus_keywords {
                if keywords.contains(keyword) {
                    score += self.config.bonus_weight;
                }
            }
        }

        score
    }

    /// Interests are quoted trimmed but in the case the student stored them;
    /// only matching is case-insensitive.
    pub fn reason_for(&self, keywords: &ProfileKeywords, opportunity: &Opportunity) -> String {
        let quoted: Vec<&str> = keywords
            .interests
            .iter()
            .take(self.config.reason_interests)
            .map(String::as_str)
            .collect();

        if quoted.is_empty() {
            format!("Matches your interests in {}", opportunity.domain)
        } else {
            format!("Matches your interests in {}", quoted.join(", "))
        }
    }

    /// Rank the open, not yet engaged candidates for a profile.
    ///
    /// Zero-score candidates are dropped. Equal scores keep catalog order.
    pub fn rank_candidates<'a>(
        &self,
        profile: Option<&StudentProfile>,
        candidates: &'a [Opportunity],
        engaged: &HashSet<Uuid>,
    ) -> Vec<ScoredCandidate<'a>> {
        let keywords = ProfileKeywords::from_profile(profile);
        if keywords.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<ScoredCandidate<'a>> = candidates
            .iter()
            .filter(|opp| opp.status == OpportunityStatus::Open)
            .filter(|opp| !engaged.contains(&opp.opportunity_id))
            .filter_map(|opp| {
                let score = self.score_opportunity(&keywords, opp);
                (score > 0.0).then(|| ScoredCandidate {
                    opportunity: opp,
                    score,
                    reason: self.reason_for(&keywords, opp),
                })
            })
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(self.config.max_results);
        scored
    }

    /// Recompute and persist the user's recommendations, best first.
    ///
    /// A user without a profile, or with no skills and interests, gets an
    /// empty result and nothing is written.
    pub async fn generate_recommendations(
        &self,
        user_id: Uuid,
        profiles: &dyn ProfileStore,
        catalog: &dyn OpportunityCatalog,
        store: &dyn RecommendationStore,
    ) -> Result<Vec<Recommendation>> {
        let profile = profiles.find_profile(user_id).await?;
        if ProfileKeywords::from_profile(profile.as_ref()).is_empty() {
            debug!("User {} has no matching vocabulary, skipping", user_id);
            return Ok(Vec::new());
        }

        let candidates = catalog.list_open().await?;
        let engaged = catalog.engaged_opportunity_ids(user_id).await?;
        let ranked = self.rank_candidates(profile.as_ref(), &candidates, &engaged);

        let mut persisted = Vec::with_capacity(ranked.len());
        for candidate in &ranked {
            let recommendation = store
                .upsert_recommendation(
                    user_id,
                    candidate.opportunity.opportunity_id,
                    candidate.score,
                    &candidate.reason,
                )
                .await?;
            persisted.push(recommendation);
        }

        if self.config.stale_policy == StalePolicy::Prune {
            let keep: Vec<Uuid> = ranked
                .iter()
                .map(|c| c.opportunity.opportunity_id)
                .collect();
            let pruned = store.prune_recommendations(user_id, &keep).await?;
            debug!("Pruned {} stale recommendations for user {}", pruned, user_id);
        }

        info!(
            "Generated {} recommendations for user {} from {} open opportunities",
            persisted.len(),
            user_id,
            candidates.len()
        );

        Ok(persisted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::memory::MemoryStore;
    use crate::models::OpportunityStatus;

    fn profile(interests: &[&str], skills: &[&str]) -> StudentProfile {
        StudentProfile {
            user_id: Uuid::from_u128(1),
            gpa: None,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            profile_completeness: 50,
        }
    }

    fn opportunity(id: u128, title: &str, domain: Domain, tags: &[&str]) -> Opportunity {
        Opportunity {
            opportunity_id: Uuid::from_u128(id),
            title: title.to_string(),
            description: String::new(),
            university: "Yale University".to_string(),
            domain,
            deadline: None,
            url: format!("https://example.edu/{id}"),
            status: OpportunityStatus::Open,
            tags: tags.iter().map(|s| s.to_string()).collect(),
            stipend: None,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[test]
    fn keyword_hits_and_domain_bonus_accumulate() {
        let matcher = RecommendationMatcher::default();
        let keywords = ProfileKeywords::from_profile(Some(&profile(&["Research", "lab"], &["Python"])));
        let opp = opportunity(1, "Python research lab", Domain::Research, &[]);

        // three substring hits plus two bonus keywords on a research opportunity
        assert_eq!(matcher.score_opportunity(&keywords, &opp), 3.0 + 0.5 + 0.5);
    }

    #[test]
    fn bonus_requires_matching_domain() {
        let matcher = RecommendationMatcher::default();
        let keywords = ProfileKeywords::from_profile(Some(&profile(&["science"], &[])));
        let opp = opportunity(1, "Data visualisation", Domain::Internship, &[]);

        assert_eq!(matcher.score_opportunity(&keywords, &opp), 0.0);
    }

    #[test]
    fn domain_label_and_tags_are_searched() {
        let matcher = RecommendationMatcher::default();
        let keywords = ProfileKeywords::from_profile(Some(&profile(&["grant"], &["robotics"])));
        let opp = opportunity(1, "Untitled", Domain::Grant, &["Robotics"]);

        assert_eq!(matcher.score_opportunity(&keywords, &opp), 2.0);
    }

    #[test]
    fn duplicate_keywords_count_once() {
        let keywords = ProfileKeywords::from_profile(Some(&profile(&["AI", "ai "], &["ai", ""])));
        assert_eq!(keywords.keywords(), ["ai".to_string()]);
    }

    #[test]
    fn reason_quotes_first_three_interests() {
        let matcher = RecommendationMatcher::default();
        let opp = opportunity(1, "x", Domain::Fellowship, &[]);

        let keywords =
            ProfileKeywords::from_profile(Some(&profile(&["Policy", "AI", "Law", "Music"], &["go"])));
        assert_eq!(
            matcher.reason_for(&keywords, &opp),
            "Matches your interests in Policy, AI, Law"
        );

        let padded = ProfileKeywords::from_profile(Some(&profile(&["  Machine Learning ", "NLP"], &[])));
        assert_eq!(
            matcher.reason_for(&padded, &opp),
            "Matches your interests in Machine Learning, NLP"
        );

        let skills_only = ProfileKeywords::from_profile(Some(&profile(&[], &["go"])));
        assert_eq!(
            matcher.reason_for(&skills_only, &opp),
            "Matches your interests in fellowship"
        );
    }

    #[test]
    fn empty_profile_ranks_nothing() {
        let matcher = RecommendationMatcher::default();
        let catalog = vec![opportunity(1, "Research lab", Domain::Research, &[])];

        assert!(matcher.rank_candidates(None, &catalog, &HashSet::new()).is_empty());
        assert!(
            matcher
                .rank_candidates(Some(&profile(&[], &[])), &catalog, &HashSet::new())
                .is_empty()
        );
    }

    #[test]
    fn engaged_and_closed_opportunities_are_excluded() {
        let matcher = RecommendationMatcher::default();
        let mut closed = opportunity(3, "Research lab", Domain::Research, &[]);
        closed.status = OpportunityStatus::Closed;
        let catalog = vec![
            opportunity(1, "Research lab", Domain::Research, &[]),
            opportunity(2, "Research", Domain::Research, &[]),
            closed,
        ];
        let engaged = HashSet::from([Uuid::from_u128(1)]);

        let ranked = matcher.rank_candidates(Some(&profile(&["research"], &[])), &catalog, &engaged);
        let ids: Vec<Uuid> = ranked.iter().map(|c| c.opportunity.opportunity_id).collect();
        assert_eq!(ids, vec![Uuid::from_u128(2)]);
    }

    #[test]
    fn ranking_is_descending_capped_and_stable() {
        let matcher = RecommendationMatcher::default();
        let mut catalog: Vec<Opportunity> = (0..30)
            .map(|i| opportunity(i, "Robotics", Domain::Other, &[]))
            .collect();
        catalog.push(opportunity(100, "Robotics and vision", Domain::Other, &[]));

        let ranked = matcher.rank_candidates(
            Some(&profile(&["robotics", "vision"], &[])),
            &catalog,
            &HashSet::new(),
        );

        assert_eq!(ranked.len(), 20);
        assert_eq!(ranked[0].opportunity.opportunity_id, Uuid::from_u128(100));
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        // ties keep catalog order
        let tail: Vec<u128> = ranked[1..]
            .iter()
            .map(|c| c.opportunity.opportunity_id.as_u128())
            .collect();
        assert_eq!(tail, (0..19).collect::<Vec<u128>>());
    }

    #[tokio::test]
    async fn refresh_is_idempotent() {
        let store = MemoryStore::new();
        let user = Uuid::from_u128(1);
        store.put_profile(profile(&["research"], &["python"]));
        store.put_opportunity(opportunity(10, "Python research", Domain::Research, &[]));
        store.put_opportunity(opportunity(11, "Research assistant", Domain::Research, &[]));

        let matcher = RecommendationMatcher::default();
        let first = matcher
            .generate_recommendations(user, &store, &store, &store)
            .await
            .unwrap();
        let second = matcher
            .generate_recommendations(user, &store, &store, &store)
            .await
            .unwrap();

        let pairs = |recs: &[Recommendation]| -> Vec<(Uuid, f64, String)> {
            recs.iter()
                .map(|r| (r.opportunity_id, r.score, r.reason.clone()))
                .collect()
        };
        assert_eq!(pairs(&first), pairs(&second));
        assert_eq!(store.list_recommendations(user).await.unwrap().len(), 2);
        assert_eq!(first[0].recommendation_id, second[0].recommendation_id);
    }

    #[tokio::test]
    async fn refresh_keeps_viewed_flag() {
        let store = MemoryStore::new();
        let user = Uuid::from_u128(1);
        store.put_profile(profile(&["research"], &[]));
        store.put_opportunity(opportunity(10, "Research", Domain::Research, &[]));

        let matcher = RecommendationMatcher::default();
        let recs = matcher
            .generate_recommendations(user, &store, &store, &store)
            .await
            .unwrap();
        store.mark_viewed(user, recs[0].recommendation_id).await.unwrap();

        let again = matcher
            .generate_recommendations(user, &store, &store, &store)
            .await
            .unwrap();
        assert!(again[0].is_viewed);
    }

    #[tokio::test]
    async fn stale_rows_follow_policy() {
        let user = Uuid::from_u128(1);
        for (policy, expected) in [(StalePolicy::Retain, 2), (StalePolicy::Prune, 1)] {
            let store = MemoryStore::new();
            store.put_profile(profile(&["research"], &[]));
            store.put_opportunity(opportunity(10, "Research", Domain::Research, &[]));
            store.put_opportunity(opportunity(11, "Research", Domain::Research, &[]));

            let matcher = RecommendationMatcher::new(MatchingConfig {
                stale_policy: policy,
                ..MatchingConfig::default()
            });
            matcher
                .generate_recommendations(user, &store, &store, &store)
                .await
                .unwrap();

            store.close_opportunity(Uuid::from_u128(11));
            matcher
                .generate_recommendations(user, &store, &store, &store)
                .await
                .unwrap();

            assert_eq!(store.list_recommendations(user).await.unwrap().len(), expected);
        }
    }

    #[tokio::test]
    async fn missing_profile_is_not_an_error() {
        let store = MemoryStore::new();
        store.put_opportunity(opportunity(10, "Research", Domain::Research, &[]));

        let recs = RecommendationMatcher::default()
            .generate_recommendations(Uuid::from_u128(9), &store, &store, &store)
            .await
            .unwrap();
        assert!(recs.is_empty());
    }

    #[tokio::test]
    async fn catalog_failure_is_surfaced() {
        let store = MemoryStore::new();
        store.put_profile(profile(&["research"], &[]));
        store.fail_catalog("catalog offline");

        let err = RecommendationMatcher::default()
            .generate_recommendations(Uuid::from_u128(1), &store, &store, &store)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
        assert!(err.is_retryable());
    }
}

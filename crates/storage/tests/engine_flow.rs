use chrono::Utc;
use rust_decimal::Decimal;
use storage::memory::MemoryStore;
use storage::models::{
    Domain, GLOBAL_CATEGORY, LeaderboardPeriod, Opportunity, OpportunityStatus, StudentProfile,
};
use storage::services::{
    DomainClassifier, LeaderboardRanker, RecommendationMatcher, ScoreAggregator,
};
use storage::traits::{LeaderboardStore, RecommendationStore, ScoreStore};
use uuid::Uuid;

fn ingest(store: &MemoryStore, classifier: &DomainClassifier, id: u128, title: &str, description: &str) {
    let domain = classifier.classify(&format!("{title} {description}"));
    store.put_opportunity(Opportunity {
        opportunity_id: Uuid::from_u128(id),
        title: title.to_string(),
        description: description.to_string(),
        university: "Harvard University".to_string(),
        domain,
        deadline: None,
        url: format!("https://example.edu/opportunities/{id}"),
        status: OpportunityStatus::Open,
        tags: vec![],
        stipend: None,
        created_at: Utc::now().naive_utc(),
    });
}

fn student(id: u128, gpa: Decimal, interests: &[&str], skills: &[&str], completeness: i32) -> StudentProfile {
    StudentProfile {
        user_id: Uuid::from_u128(id),
        gpa: Some(gpa),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        interests: interests.iter().map(|s| s.to_string()).collect(),
        profile_completeness: completeness,
    }
}

#[tokio::test]
async fn ingestion_to_leaderboard() {
    let store = MemoryStore::new();
    let classifier = DomainClassifier::default();

    ingest(&store, &classifier, 1, "Summer Research Experience", "Paid lab placement in robotics");
    ingest(&store, &classifier, 2, "Global Policy Fellowship", "Leadership award for policy students");
    ingest(&store, &classifier, 3, "Campus Hackathon", "48 hour coding contest");

    let ada = Uuid::from_u128(100);
    let grace = Uuid::from_u128(200);
    store.put_user(ada, Some("Harvard University"));
    store.put_user(grace, Some("Harvard University"));
    store.put_profile(student(100, Decimal::new(390, 2), &["research", "robotics"], &["python"], 90));
    store.put_profile(student(200, Decimal::new(320, 2), &["policy"], &["writing"], 40));

    // grace already saved the fellowship; it must not be recommended to her
    store.add_application(grace, Uuid::from_u128(2), "saved");
    store.add_application(ada, Uuid::from_u128(3), "submitted");

    let matcher = RecommendationMatcher::default();
    let ada_recs = matcher
        .generate_recommendations(ada, &store, &store, &store)
        .await
        .unwrap();
    assert_eq!(ada_recs[0].opportunity_id, Uuid::from_u128(1));
    assert!(ada_recs.iter().all(|r| r.opportunity_id != Uuid::from_u128(3)));

    let grace_recs = matcher
        .generate_recommendations(grace, &store, &store, &store)
        .await
        .unwrap();
    assert!(grace_recs.iter().all(|r| r.opportunity_id != Uuid::from_u128(2)));
    assert!(store.list_recommendations(grace).await.unwrap().len() == grace_recs.len());

    store.set_match_quality(ada, 80.0).await.unwrap();
    let aggregator = ScoreAggregator::default();
    let ada_score = aggregator.recalculate(ada, &store, &store, &store).await.unwrap();
    let grace_score = aggregator.recalculate(grace, &store, &store, &store).await.unwrap();
    assert!(ada_score.total_score > grace_score.total_score);

    let summary = LeaderboardRanker::new()
        .rebuild_leaderboards(&store, &store)
        .await
        .unwrap();
    assert_eq!(summary.ranked_users, 2);
    assert_eq!(summary.university_boards, 1);

    let global = store
        .list_entries(GLOBAL_CATEGORY, LeaderboardPeriod::AllTime, 100)
        .await
        .unwrap();
    let order: Vec<Uuid> = global.iter().map(|e| e.user_id).collect();
    assert_eq!(order, vec![ada, grace]);

    let school = store
        .list_entries("Harvard University", LeaderboardPeriod::AllTime, 100)
        .await
        .unwrap();
    assert_eq!(school.len(), 2);
    assert_eq!(school[0].user_id, ada);

    assert!(
        store
            .list_entries(GLOBAL_CATEGORY, LeaderboardPeriod::Weekly, 100)
            .await
            .unwrap()
            .is_empty()
    );
}

#[test]
fn ingested_domains() {
    let classifier = DomainClassifier::default();
    assert_eq!(
        classifier.classify("Summer Research Experience Paid lab placement in robotics"),
        Domain::Research
    );
    assert_eq!(classifier.classify("Campus Hackathon 48 hour coding contest"), Domain::Competition);
}

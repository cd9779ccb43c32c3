//! End-to-end pull-request lifecycle through the service layer.

use std::collections::HashSet;
use std::sync::Arc;

use reviewer_core::{InOrderPicker, Member, PickerReassigner, PullRequestStatus};
use reviewer_service::{ErrorCode, ReviewerAssigner, ServiceConfig, ServiceError};
use reviewer_state::MemoryStore;

fn member(id: &str, name: &str, is_active: bool) -> Member {
    Member::new(id, name, is_active)
}

/// Assigner with first-come selection so expectations are exact.
fn in_order(reviewers_per_pr: usize) -> ReviewerAssigner {
    ReviewerAssigner::new(
        Arc::new(MemoryStore::new()),
        Arc::new(InOrderPicker),
        Arc::new(PickerReassigner::new(InOrderPicker)),
        ServiceConfig::default().with_reviewers_per_pr(reviewers_per_pr),
    )
}

fn seeded(seed: u64) -> ReviewerAssigner {
    ReviewerAssigner::in_memory(ServiceConfig::default().with_rng_seed(seed))
}

async fn payments(app: &ReviewerAssigner) {
    app.teams
        .add_team(
            "payments",
            &[
                member("u1", "Alice", true),
                member("u2", "Bob", true),
                member("u3", "John", true),
            ],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn create_assigns_both_other_members() {
    for seed in 0..10 {
        let app = seeded(seed);
        payments(&app).await;

        let pr = app
            .pull_requests
            .create("pr-1", "Add refunds", "u1")
            .await
            .unwrap();

        let assigned: HashSet<&str> = pr.assigned_reviewers.iter().map(String::as_str).collect();
        assert_eq!(assigned, HashSet::from(["u2", "u3"]));
        assert_eq!(pr.status, PullRequestStatus::Open);
        assert!(pr.merged_at.is_none());
    }
}

#[tokio::test]
async fn create_with_single_candidate_assigns_one() {
    let app = seeded(42);
    app.teams
        .add_team(
            "infra",
            &[member("u4", "Dana", true), member("u5", "Eve", true)],
        )
        .await
        .unwrap();

    let pr = app
        .pull_requests
        .create("pr-2", "Bump terraform", "u4")
        .await
        .unwrap();

    assert_eq!(pr.assigned_reviewers, vec!["u5"]);
}

#[tokio::test]
async fn create_with_no_candidates_assigns_nobody() {
    let app = seeded(42);
    app.teams
        .add_team(
            "solo",
            &[member("u7", "Grace", true), member("u8", "Heidi", false)],
        )
        .await
        .unwrap();

    let pr = app
        .pull_requests
        .create("pr-3", "Solo change", "u7")
        .await
        .unwrap();

    assert!(pr.assigned_reviewers.is_empty());
}

#[tokio::test]
async fn create_never_picks_author_or_inactive_members() {
    let app = seeded(7);
    app.teams
        .add_team(
            "core",
            &[
                member("u1", "Alice", true),
                member("u2", "Bob", false),
                member("u3", "Carol", true),
                member("u4", "Dan", true),
                member("u5", "Erin", true),
            ],
        )
        .await
        .unwrap();

    for i in 0..25 {
        let pr = app
            .pull_requests
            .create(&format!("pr-{i}"), "Change", "u1")
            .await
            .unwrap();

        assert_eq!(pr.assigned_reviewers.len(), 2);
        let unique: HashSet<&String> = pr.assigned_reviewers.iter().collect();
        assert_eq!(unique.len(), 2);
        assert!(!pr.is_assigned("u1"));
        assert!(!pr.is_assigned("u2"));
    }
}

#[tokio::test]
async fn create_honours_configured_reviewer_count() {
    let app = in_order(3);
    app.teams
        .add_team(
            "core",
            &[
                member("u1", "Alice", true),
                member("u2", "Bob", true),
                member("u3", "Carol", true),
                member("u4", "Dan", true),
            ],
        )
        .await
        .unwrap();

    let pr = app.pull_requests.create("pr-1", "Change", "u1").await.unwrap();
    assert_eq!(pr.assigned_reviewers, vec!["u2", "u3", "u4"]);
}

#[tokio::test]
async fn create_rejects_duplicate_id() {
    let app = seeded(1);
    payments(&app).await;
    app.pull_requests.create("pr-1", "First", "u1").await.unwrap();

    let err = app
        .pull_requests
        .create("pr-1", "Second", "u2")
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::PrExists);
    let stored = app.users.get_review("u1").await.unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn create_for_unknown_author_is_not_found() {
    let app = seeded(1);
    let err = app
        .pull_requests
        .create("pr-1", "Orphan", "ghost")
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::UserNotFound { ref user_id } if user_id == "ghost"));
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn merge_twice_keeps_first_timestamp() {
    let app = seeded(3);
    payments(&app).await;
    app.pull_requests.create("pr-1", "Add refunds", "u1").await.unwrap();

    let first = app.pull_requests.merge("pr-1").await.unwrap();
    assert_eq!(first.status, PullRequestStatus::Merged);
    let merged_at = first.merged_at.expect("merge sets timestamp");

    let second = app.pull_requests.merge("pr-1").await.unwrap();
    assert_eq!(second.status, PullRequestStatus::Merged);
    assert_eq!(second.merged_at, Some(merged_at));
    assert_eq!(second.assigned_reviewers, first.assigned_reviewers);
}

#[tokio::test]
async fn merge_unknown_pull_request_is_not_found() {
    let app = seeded(3);
    let err = app.pull_requests.merge("nope").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn reassign_replaces_in_place() {
    let app = in_order(2);
    app.teams
        .add_team(
            "payments",
            &[
                member("u1", "Alice", true),
                member("u2", "Bob", true),
                member("u3", "John", true),
                member("u4", "Dana", true),
            ],
        )
        .await
        .unwrap();
    let pr = app.pull_requests.create("pr-1", "Refunds", "u1").await.unwrap();
    assert_eq!(pr.assigned_reviewers, vec!["u2", "u3"]);

    let outcome = app.pull_requests.reassign("pr-1", "u2").await.unwrap();

    assert_eq!(outcome.replaced_by, "u4");
    assert_eq!(outcome.pull_request.assigned_reviewers, vec!["u4", "u3"]);

    let queue: Vec<String> = app
        .users
        .get_review("u4")
        .await
        .unwrap()
        .into_iter()
        .map(|short| short.id)
        .collect();
    assert_eq!(queue, vec!["pr-1"]);
    assert!(app.users.get_review("u2").await.unwrap().is_empty());
}

#[tokio::test]
async fn reassign_picks_valid_replacement() {
    for seed in 0..10 {
        let app = seeded(seed);
        app.teams
            .add_team(
                "core",
                &[
                    member("u1", "Alice", true),
                    member("u2", "Bob", true),
                    member("u3", "Carol", true),
                    member("u4", "Dan", true),
                    member("u5", "Erin", true),
                    member("u6", "Frank", false),
                ],
            )
            .await
            .unwrap();
        let pr = app.pull_requests.create("pr-1", "Change", "u1").await.unwrap();
        let old = pr.assigned_reviewers[0].clone();
        let other = pr.assigned_reviewers[1].clone();

        let outcome = app.pull_requests.reassign("pr-1", &old).await.unwrap();

        let new = &outcome.replaced_by;
        assert_ne!(new, "u1");
        assert_ne!(new, "u6");
        assert_ne!(*new, old);
        assert_ne!(*new, other);
        assert_eq!(outcome.pull_request.assigned_reviewers, vec![new.clone(), other]);
    }
}

#[tokio::test]
async fn reassign_without_candidates_is_no_candidate() {
    let app = seeded(5);
    payments(&app).await;
    app.pull_requests.create("pr-1", "Refunds", "u1").await.unwrap();

    let err = app.pull_requests.reassign("pr-1", "u2").await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::NoCandidate);
    let queue = app.users.get_review("u2").await.unwrap();
    assert_eq!(queue.len(), 1, "reviewer list must be unchanged");
}

#[tokio::test]
async fn reassign_after_merge_is_rejected() {
    let app = seeded(5);
    payments(&app).await;
    app.pull_requests.create("pr-1", "Refunds", "u1").await.unwrap();
    app.pull_requests.merge("pr-1").await.unwrap();

    let err = app.pull_requests.reassign("pr-1", "u2").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::PrMerged);
}

#[tokio::test]
async fn reassign_of_unassigned_user_is_not_assigned() {
    let app = seeded(5);
    payments(&app).await;
    app.pull_requests.create("pr-1", "Refunds", "u1").await.unwrap();

    let err = app.pull_requests.reassign("pr-1", "u1").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotAssigned);
}

#[tokio::test]
async fn reassign_unknown_records_are_not_found() {
    let app = seeded(5);
    payments(&app).await;
    app.pull_requests.create("pr-1", "Refunds", "u1").await.unwrap();

    let missing_pr = app.pull_requests.reassign("pr-9", "u2").await.unwrap_err();
    assert!(matches!(missing_pr, ServiceError::PullRequestNotFound { .. }));

    let missing_user = app.pull_requests.reassign("pr-1", "ghost").await.unwrap_err();
    assert!(matches!(missing_user, ServiceError::UserNotFound { .. }));
}

#[tokio::test]
async fn seeded_assigners_are_reproducible() {
    let roster: Vec<Member> = (1..=8)
        .map(|i| member(&format!("u{i}"), &format!("User {i}"), true))
        .collect();

    let mut runs = Vec::new();
    for _ in 0..2 {
        let app = seeded(2024);
        app.teams.add_team("big", &roster).await.unwrap();
        let mut picks = Vec::new();
        for i in 0..5 {
            let pr = app
                .pull_requests
                .create(&format!("pr-{i}"), "Change", "u1")
                .await
                .unwrap();
            picks.push(pr.assigned_reviewers);
        }
        runs.push(picks);
    }

    assert_eq!(runs[0], runs[1]);
}

//! Storage trait definitions for reviewer assignment
//!
//! These traits are the collaborator contracts the orchestration layer
//! consumes:
//! - `UserRepository`: users and their activity flag
//! - `TeamRepository`: team rosters
//! - `PullRequestRepository`: pull requests and their reviewer lists
//! - `StatsRepository`: reviewer assignment counts
//!
//! All traits are async and backend-agnostic. In-memory fakes are provided
//! via the `fakes` module.
//!
//! Read-modify-write goes through `update_pull_request` / `update_team`. In
//! both, the backend loads the record, runs the caller's edit and stores the
//! result as one unit of work (a row lock or transaction in SQL, the store
//! mutex in memory). An edit returning `Err` leaves the record untouched.
//! The plain writes (`set_merged`, `update_reviewers`, `update_members`) are
//! provided on top of them and may be overridden with cheaper statements.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reviewer_core::{
    DomainResult, Member, PullRequest, PullRequestShort, PullRequestStatus, Team, User,
};

use crate::error::StorageError;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Edit applied to a pull request inside one unit of work.
pub type PullRequestUpdate<'a> =
    Box<dyn FnOnce(&mut PullRequest) -> DomainResult<()> + Send + 'a>;

/// Edit applied to a team inside one unit of work.
pub type TeamUpdate<'a> = Box<dyn FnOnce(&mut Team) -> DomainResult<()> + Send + 'a>;

// ---------------------------------------------------------------------------
// UserRepository
// ---------------------------------------------------------------------------

/// User lookup and activity toggling.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user with its team name. `StorageError::UserNotFound` if absent.
    async fn get_user(&self, user_id: &str) -> StorageResult<User>;

    /// Set the activity flag and return the updated user.
    async fn set_is_active(&self, user_id: &str, is_active: bool) -> StorageResult<User>;
}

// ---------------------------------------------------------------------------
// TeamRepository
// ---------------------------------------------------------------------------

/// Team roster persistence.
///
/// Guarantees:
/// - Team names are unique; `save_team` on an existing name fails with
///   `StorageError::TeamExists`.
/// - A user belongs to exactly one team; saving a team that lists an
///   existing user moves that user into the new team.
/// - `get_team` returns members in roster order.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Fetch a team by name. `StorageError::TeamNotFound` if absent.
    async fn get_team(&self, team_name: &str) -> StorageResult<Team>;

    /// Create a team and upsert its members.
    async fn save_team(&self, team_name: &str, members: &[Member]) -> StorageResult<()>;

    /// Load the team, apply `update` and persist the members' attributes
    /// atomically, returning the updated team.
    ///
    /// Only attributes of members already on the roster are written.
    /// `StorageError::TeamNotFound` if absent, `StorageError::Rejected` when
    /// `update` fails.
    async fn update_team(&self, team_name: &str, update: TeamUpdate<'_>) -> StorageResult<Team>;

    /// Overwrite stored attributes of the given members of an existing team.
    /// Ids not on the roster are ignored.
    async fn update_members(&self, team_name: &str, members: &[Member]) -> StorageResult<()> {
        self.update_team(
            team_name,
            Box::new(|team: &mut Team| -> DomainResult<()> {
                for member in members {
                    if let Some(slot) = team.members.iter_mut().find(|m| m.id == member.id) {
                        slot.clone_from(member);
                    }
                }
                Ok(())
            }),
        )
        .await
        .map(|_| ())
    }
}

// ---------------------------------------------------------------------------
// PullRequestRepository
// ---------------------------------------------------------------------------

/// Pull request persistence.
///
/// Guarantees:
/// - Pull request ids are unique; `create` on an existing id fails with
///   `StorageError::PullRequestExists`.
/// - `list_for_reviewer` returns pull requests in creation order.
#[async_trait]
pub trait PullRequestRepository: Send + Sync {
    /// Store a new pull request, returning its id.
    async fn create(&self, pull_request: &PullRequest) -> StorageResult<String>;

    /// Fetch a pull request. `StorageError::PullRequestNotFound` if absent.
    async fn get_by_id(&self, pull_request_id: &str) -> StorageResult<PullRequest>;

    /// Load the pull request, apply `update` and persist it atomically,
    /// returning the stored result.
    ///
    /// Concurrent updates of the same id are serialised, so each edit sees
    /// the previous one's outcome. `StorageError::PullRequestNotFound` if
    /// absent, `StorageError::Rejected` when `update` fails.
    async fn update_pull_request(
        &self,
        pull_request_id: &str,
        update: PullRequestUpdate<'_>,
    ) -> StorageResult<PullRequest>;

    /// Record the merge unconditionally.
    async fn set_merged(
        &self,
        pull_request_id: &str,
        merged_at: DateTime<Utc>,
    ) -> StorageResult<()> {
        self.update_pull_request(
            pull_request_id,
            Box::new(move |pr: &mut PullRequest| -> DomainResult<()> {
                pr.status = PullRequestStatus::Merged;
                pr.merged_at = Some(merged_at);
                Ok(())
            }),
        )
        .await
        .map(|_| ())
    }

    /// Replace the stored reviewer list.
    async fn update_reviewers(
        &self,
        pull_request_id: &str,
        reviewer_ids: &[String],
    ) -> StorageResult<()> {
        self.update_pull_request(
            pull_request_id,
            Box::new(|pr: &mut PullRequest| -> DomainResult<()> {
                pr.assigned_reviewers = reviewer_ids.to_vec();
                Ok(())
            }),
        )
        .await
        .map(|_| ())
    }

    /// Pull requests on which `user_id` is an assigned reviewer.
    async fn list_for_reviewer(&self, user_id: &str) -> StorageResult<Vec<PullRequestShort>>;
}

// ---------------------------------------------------------------------------
// StatsRepository
// ---------------------------------------------------------------------------

/// Number of pull requests a user is assigned to review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewerAssignmentCount {
    pub user_id: String,
    pub name: String,
    pub count: u64,
}

/// Aggregate reviewer statistics.
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Assignment counts per user.
    ///
    /// Only users with at least one matching assignment are returned, sorted
    /// by count descending. `status` restricts the pull requests counted;
    /// `active_only` drops inactive users.
    async fn reviewer_assignments(
        &self,
        status: Option<PullRequestStatus>,
        active_only: bool,
    ) -> StorageResult<Vec<ReviewerAssignmentCount>>;
}

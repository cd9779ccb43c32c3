//! Error types for reviewer-state

use thiserror::Error;

use reviewer_core::DomainError;

/// Errors raised by persistence collaborators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No user with this id
    #[error("user not found: {user_id}")]
    UserNotFound { user_id: String },

    /// No team with this name
    #[error("team not found: {team_name}")]
    TeamNotFound { team_name: String },

    /// No pull request with this id
    #[error("pull request not found: {pull_request_id}")]
    PullRequestNotFound { pull_request_id: String },

    /// Unique-key violation on pull request id
    #[error("pull request already exists: {pull_request_id}")]
    PullRequestExists { pull_request_id: String },

    /// Unique-key violation on team name
    #[error("team already exists: {team_name}")]
    TeamExists { team_name: String },

    /// An atomic update was rejected by a domain rule; nothing was written
    #[error("update rejected: {0}")]
    Rejected(#[from] DomainError),

    /// Any other backend failure
    #[error("storage backend failed: {0}")]
    Backend(String),
}

impl StorageError {
    /// True for the `*NotFound` family.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StorageError::UserNotFound { .. }
                | StorageError::TeamNotFound { .. }
                | StorageError::PullRequestNotFound { .. }
        )
    }
}

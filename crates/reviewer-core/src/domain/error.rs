//! Domain-level error taxonomy for reviewer assignment.

/// Errors produced by the pull-request state machine, the selection
/// policies and team reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A state-machine guard rejected an operation on a merged pull request.
    #[error("pull request already merged: {pull_request_id}")]
    AlreadyMerged { pull_request_id: String },

    /// The reviewer holds no slot on the pull request.
    #[error("reviewer {reviewer_id} is not assigned to pull request {pull_request_id}")]
    NotAssigned {
        pull_request_id: String,
        reviewer_id: String,
    },

    /// No eligible candidate is left in the pool.
    #[error("not enough members to pick a reviewer")]
    NotEnoughMembers,

    /// A roster update referenced unknown member ids or tried to empty the team.
    #[error("members mismatch for team {team_name}")]
    MembersMismatch { team_name: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = std::result::Result<T, DomainError>;

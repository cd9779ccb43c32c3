//! Service error taxonomy and its mapping to boundary error codes.

use serde::{Deserialize, Serialize};

use reviewer_core::DomainError;
use reviewer_state::StorageError;

/// Errors returned by the reviewer-assignment use-cases.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("team already exists: {team_name}")]
    TeamExists { team_name: String },

    #[error("team not found: {team_name}")]
    TeamNotFound { team_name: String },

    #[error("user not found: {user_id}")]
    UserNotFound { user_id: String },

    #[error("pull request already exists: {pull_request_id}")]
    PullRequestExists { pull_request_id: String },

    #[error("pull request not found: {pull_request_id}")]
    PullRequestNotFound { pull_request_id: String },

    #[error("pull request already merged: {pull_request_id}")]
    PullRequestMerged { pull_request_id: String },

    #[error("reviewer {reviewer_id} is not assigned to pull request {pull_request_id}")]
    NotAssigned {
        pull_request_id: String,
        reviewer_id: String,
    },

    #[error("no active replacement candidate in team for pull request {pull_request_id}")]
    NoCandidate { pull_request_id: String },

    #[error("storage error: {0}")]
    Storage(StorageError),

    #[error("domain error: {0}")]
    Domain(DomainError),
}

/// Result type for service operations.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UserNotFound { user_id } => ServiceError::UserNotFound { user_id },
            StorageError::TeamNotFound { team_name } => ServiceError::TeamNotFound { team_name },
            StorageError::PullRequestNotFound { pull_request_id } => {
                ServiceError::PullRequestNotFound { pull_request_id }
            }
            StorageError::PullRequestExists { pull_request_id } => {
                ServiceError::PullRequestExists { pull_request_id }
            }
            StorageError::TeamExists { team_name } => ServiceError::TeamExists { team_name },
            StorageError::Rejected(domain) => domain.into(),
            other @ StorageError::Backend(_) => ServiceError::Storage(other),
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::AlreadyMerged { pull_request_id } => {
                ServiceError::PullRequestMerged { pull_request_id }
            }
            DomainError::NotAssigned {
                pull_request_id,
                reviewer_id,
            } => ServiceError::NotAssigned {
                pull_request_id,
                reviewer_id,
            },
            DomainError::MembersMismatch { team_name } => ServiceError::TeamExists { team_name },
            other @ DomainError::NotEnoughMembers => ServiceError::Domain(other),
        }
    }
}

/// Boundary error codes exposed to API callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    TeamExists,
    PrExists,
    PrMerged,
    NotAssigned,
    NoCandidate,
    NotFound,
    Unknown,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::TeamExists => "TEAM_EXISTS",
            ErrorCode::PrExists => "PR_EXISTS",
            ErrorCode::PrMerged => "PR_MERGED",
            ErrorCode::NotAssigned => "NOT_ASSIGNED",
            ErrorCode::NoCandidate => "NO_CANDIDATE",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ServiceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::TeamExists { .. } => ErrorCode::TeamExists,
            ServiceError::PullRequestExists { .. } => ErrorCode::PrExists,
            ServiceError::PullRequestMerged { .. } => ErrorCode::PrMerged,
            ServiceError::NotAssigned { .. } => ErrorCode::NotAssigned,
            ServiceError::NoCandidate { .. } => ErrorCode::NoCandidate,
            ServiceError::TeamNotFound { .. }
            | ServiceError::UserNotFound { .. }
            | ServiceError::PullRequestNotFound { .. } => ErrorCode::NotFound,
            ServiceError::Storage(_) | ServiceError::Domain(_) => ErrorCode::Unknown,
        }
    }
}

/// Error body handed to whatever transport wraps the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&ServiceError> for ErrorResponse {
    fn from(err: &ServiceError) -> Self {
        Self {
            error: ErrorBody {
                code: err.code(),
                message: err.to_string(),
            },
        }
    }
}

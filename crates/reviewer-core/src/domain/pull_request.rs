//! Pull-request entity and its OPEN → MERGED state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{DomainError, DomainResult};
use super::team::Member;
use crate::selection::{ReviewerPicker, ReviewerReassigner};

/// Status of a pull request. `Merged` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PullRequestStatus {
    Open,
    Merged,
}

impl PullRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PullRequestStatus::Open => "OPEN",
            PullRequestStatus::Merged => "MERGED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PullRequestStatus::Merged)
    }
}

impl std::fmt::Display for PullRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pull request status: {0}")]
pub struct UnknownStatus(pub String);

impl std::str::FromStr for PullRequestStatus {
    type Err = UnknownStatus;

    /// Case-insensitive: `open`, `OPEN` and `Open` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OPEN" => Ok(PullRequestStatus::Open),
            "MERGED" => Ok(PullRequestStatus::Merged),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// Listing view of a pull request, without reviewers or timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestShort {
    pub id: String,
    pub name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
}

/// A pull request with its assigned reviewers.
///
/// Invariants maintained by the operations below:
/// - `author_id` never appears in `assigned_reviewers`
/// - `assigned_reviewers` holds no duplicates and keeps assignment order
/// - `merged_at` is set iff `status == Merged`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: String,
    pub name: String,
    pub author_id: String,
    pub status: PullRequestStatus,
    pub assigned_reviewers: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    /// A fresh OPEN pull request with no reviewers yet.
    pub fn open(
        id: impl Into<String>,
        name: impl Into<String>,
        author_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            author_id: author_id.into(),
            status: PullRequestStatus::Open,
            assigned_reviewers: Vec::new(),
            created_at,
            merged_at: None,
        }
    }

    pub fn short(&self) -> PullRequestShort {
        PullRequestShort {
            id: self.id.clone(),
            name: self.name.clone(),
            author_id: self.author_id.clone(),
            status: self.status,
        }
    }

    pub fn is_merged(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn is_assigned(&self, reviewer_id: &str) -> bool {
        self.assigned_reviewers.iter().any(|id| id == reviewer_id)
    }

    fn ensure_open(&self) -> DomainResult<()> {
        if self.is_merged() {
            return Err(DomainError::AlreadyMerged {
                pull_request_id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// Check that the pull request is open and `reviewer_id` holds a slot.
    ///
    /// # Errors
    ///
    /// `DomainError::AlreadyMerged` first, then `DomainError::NotAssigned`.
    pub fn ensure_assigned(&self, reviewer_id: &str) -> DomainResult<()> {
        self.ensure_open()?;
        if !self.is_assigned(reviewer_id) {
            return Err(DomainError::NotAssigned {
                pull_request_id: self.id.clone(),
                reviewer_id: reviewer_id.to_string(),
            });
        }
        Ok(())
    }

    /// Replace the reviewer list with up to `count` active non-author members
    /// chosen by `picker`, in the order the picker returns them.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AlreadyMerged` if the pull request is merged.
    pub fn assign_reviewers<P>(
        &mut self,
        members: &[Member],
        picker: &P,
        count: usize,
    ) -> DomainResult<()>
    where
        P: ReviewerPicker + ?Sized,
    {
        self.ensure_open()?;

        let candidates: Vec<Member> = members
            .iter()
            .filter(|m| m.is_active && m.id != self.author_id)
            .cloned()
            .collect();

        self.assigned_reviewers = picker
            .pick(candidates, count)
            .into_iter()
            .map(|m| m.id)
            .collect();

        Ok(())
    }

    /// Transition OPEN → MERGED, stamping `merged_at` with the current time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AlreadyMerged` if called again; state is left
    /// untouched, so callers may treat this as an idempotent no-op.
    pub fn merge(&mut self) -> DomainResult<()> {
        self.merge_at(Utc::now())
    }

    /// Same as [`PullRequest::merge`] with an explicit clock reading.
    pub fn merge_at(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        self.ensure_open()?;
        self.status = PullRequestStatus::Merged;
        self.merged_at = Some(now);
        Ok(())
    }

    /// Replace `old_reviewer` with a reviewer chosen by `reassigner` and
    /// return the new reviewer id.
    ///
    /// The pool excludes inactive members, the author, `old_reviewer` and
    /// everyone already assigned. The first occurrence of `old_reviewer.id`
    /// is replaced in place. If `old_reviewer` is not assigned the list is
    /// left as is and the chosen id is still returned; callers that need a
    /// strict check call [`PullRequest::ensure_assigned`] first.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AlreadyMerged` if the pull request is merged, or
    /// whatever the reassigner reports (`NotEnoughMembers` for an empty pool).
    pub fn reassign<R>(
        &mut self,
        old_reviewer: &Member,
        members: &[Member],
        reassigner: &R,
    ) -> DomainResult<String>
    where
        R: ReviewerReassigner + ?Sized,
    {
        self.ensure_open()?;

        let candidates: Vec<Member> = members
            .iter()
            .filter(|m| {
                m.is_active
                    && m.id != old_reviewer.id
                    && m.id != self.author_id
                    && !self.is_assigned(&m.id)
            })
            .cloned()
            .collect();

        let new_reviewer = reassigner.reassign(old_reviewer, candidates)?;

        if let Some(slot) = self
            .assigned_reviewers
            .iter_mut()
            .find(|id| **id == old_reviewer.id)
        {
            slot.clone_from(&new_reviewer.id);
        }

        Ok(new_reviewer.id)
    }
}

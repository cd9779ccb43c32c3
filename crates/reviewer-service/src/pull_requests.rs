//! Pull-request use-cases: create, merge, reassign.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use reviewer_core::{
    DomainError, DomainResult, PullRequest, ReviewerPicker, ReviewerReassigner,
};
use reviewer_state::{PullRequestRepository, StorageError, TeamRepository, UserRepository};

use crate::error::{ServiceError, ServiceResult};
use crate::obs;

/// Outcome of a successful reassignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reassignment {
    pub pull_request: PullRequest,
    pub replaced_by: String,
}

/// Orchestrates the pull-request lifecycle over the storage collaborators.
pub struct PullRequestService {
    users: Arc<dyn UserRepository>,
    teams: Arc<dyn TeamRepository>,
    pull_requests: Arc<dyn PullRequestRepository>,
    picker: Arc<dyn ReviewerPicker>,
    reassigner: Arc<dyn ReviewerReassigner>,
    reviewers_per_pr: usize,
}

impl PullRequestService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        teams: Arc<dyn TeamRepository>,
        pull_requests: Arc<dyn PullRequestRepository>,
        picker: Arc<dyn ReviewerPicker>,
        reassigner: Arc<dyn ReviewerReassigner>,
        reviewers_per_pr: usize,
    ) -> Self {
        Self {
            users,
            teams,
            pull_requests,
            picker,
            reassigner,
            reviewers_per_pr,
        }
    }

    /// Open a pull request and assign reviewers from the author's team.
    ///
    /// # Errors
    ///
    /// `UserNotFound`/`TeamNotFound` when the author or its team is missing,
    /// `PullRequestExists` when the id is taken.
    #[instrument(skip(self, name))]
    pub async fn create(
        &self,
        pull_request_id: &str,
        name: &str,
        author_id: &str,
    ) -> ServiceResult<PullRequest> {
        self.try_create(pull_request_id, name, author_id)
            .await
            .inspect_err(|e| obs::emit_operation_failed("pull_request.create", e))
    }

    async fn try_create(
        &self,
        pull_request_id: &str,
        name: &str,
        author_id: &str,
    ) -> ServiceResult<PullRequest> {
        let author = self.users.get_user(author_id).await?;
        info!(team_name = %author.team_name, "got author");
        let team = self.teams.get_team(&author.team_name).await?;
        info!(team_name = %team.name, members = team.members.len(), "got team");

        let mut pull_request = PullRequest::open(pull_request_id, name, author_id, Utc::now());
        pull_request.assign_reviewers(&team.members, &*self.picker, self.reviewers_per_pr)?;
        debug!(reviewers = ?pull_request.assigned_reviewers, "got reviewers");

        self.pull_requests.create(&pull_request).await?;

        obs::emit_pull_request_created(
            &pull_request.id,
            &pull_request.author_id,
            &pull_request.assigned_reviewers,
        );
        Ok(pull_request)
    }

    /// Mark a pull request merged. Merging a merged pull request returns it
    /// unchanged.
    ///
    /// # Errors
    ///
    /// `PullRequestNotFound` when the id is unknown.
    #[instrument(skip(self))]
    pub async fn merge(&self, pull_request_id: &str) -> ServiceResult<PullRequest> {
        self.try_merge(pull_request_id)
            .await
            .inspect_err(|e| obs::emit_operation_failed("pull_request.merge", e))
    }

    async fn try_merge(&self, pull_request_id: &str) -> ServiceResult<PullRequest> {
        let now = Utc::now();
        let merged = self
            .pull_requests
            .update_pull_request(
                pull_request_id,
                Box::new(move |pr: &mut PullRequest| pr.merge_at(now)),
            )
            .await;

        match merged {
            Ok(pull_request) => {
                obs::emit_pull_request_merged(&pull_request.id, false);
                Ok(pull_request)
            }
            Err(StorageError::Rejected(DomainError::AlreadyMerged { .. })) => {
                info!("pull request is already merged");
                let pull_request = self.pull_requests.get_by_id(pull_request_id).await?;
                obs::emit_pull_request_merged(&pull_request.id, true);
                Ok(pull_request)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Swap `old_reviewer_id` for another active member of that reviewer's
    /// team.
    ///
    /// # Errors
    ///
    /// `PullRequestNotFound`/`UserNotFound`/`TeamNotFound` for missing
    /// records, `PullRequestMerged` once merged, `NotAssigned` when the user
    /// is not a reviewer, `NoCandidate` when nobody can take the slot.
    #[instrument(skip(self))]
    pub async fn reassign(
        &self,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> ServiceResult<Reassignment> {
        self.try_reassign(pull_request_id, old_reviewer_id)
            .await
            .inspect_err(|e| obs::emit_operation_failed("pull_request.reassign", e))
    }

    async fn try_reassign(
        &self,
        pull_request_id: &str,
        old_reviewer_id: &str,
    ) -> ServiceResult<Reassignment> {
        let current = self.pull_requests.get_by_id(pull_request_id).await?;
        if current.is_merged() {
            info!("pull request is already merged");
            return Err(ServiceError::PullRequestMerged {
                pull_request_id: current.id,
            });
        }

        let old_reviewer = self.users.get_user(old_reviewer_id).await?;
        info!(team_name = %old_reviewer.team_name, "got old reviewer");
        let team = self.teams.get_team(&old_reviewer.team_name).await?;
        info!(team_name = %team.name, members = team.members.len(), "got team");

        // `current` may be stale; status and presence are re-checked atomically.
        let reassigner = &*self.reassigner;
        let mut replaced_by = None;
        let pull_request = self
            .pull_requests
            .update_pull_request(
                pull_request_id,
                Box::new(|pr: &mut PullRequest| -> DomainResult<()> {
                    pr.ensure_assigned(old_reviewer.id())?;
                    let new_id = pr.reassign(&old_reviewer.member, &team.members, reassigner)?;
                    replaced_by = Some(new_id);
                    Ok(())
                }),
            )
            .await
            .map_err(|e| match e {
                StorageError::Rejected(DomainError::NotEnoughMembers) => {
                    ServiceError::NoCandidate {
                        pull_request_id: pull_request_id.to_string(),
                    }
                }
                other => other.into(),
            })?;

        let replaced_by = replaced_by.ok_or_else(|| {
            StorageError::Backend(format!("update of {pull_request_id} was not applied"))
        })?;

        obs::emit_reviewer_reassigned(&pull_request.id, old_reviewer.id(), &replaced_by);
        Ok(Reassignment {
            pull_request,
            replaced_by,
        })
    }
}

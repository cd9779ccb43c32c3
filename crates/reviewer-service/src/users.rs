//! User use-cases.

use std::sync::Arc;

use tracing::{info, instrument};

use reviewer_core::{PullRequestShort, User};
use reviewer_state::{PullRequestRepository, UserRepository};

use crate::error::ServiceResult;
use crate::obs;

/// Activity toggling and review queues.
pub struct UserService {
    users: Arc<dyn UserRepository>,
    pull_requests: Arc<dyn PullRequestRepository>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        pull_requests: Arc<dyn PullRequestRepository>,
    ) -> Self {
        Self {
            users,
            pull_requests,
        }
    }

    /// Set a user's activity flag. Inactive users are skipped by future
    /// selections but keep their current assignments.
    #[instrument(skip(self))]
    pub async fn set_is_active(&self, user_id: &str, is_active: bool) -> ServiceResult<User> {
        self.try_set_is_active(user_id, is_active)
            .await
            .inspect_err(|e| obs::emit_operation_failed("user.set_is_active", e))
    }

    async fn try_set_is_active(&self, user_id: &str, is_active: bool) -> ServiceResult<User> {
        let user = self.users.set_is_active(user_id, is_active).await?;
        info!(event = "user.activity_changed", user_id = %user_id, is_active);
        Ok(user)
    }

    /// Pull requests `user_id` is assigned to review, oldest first. Unknown
    /// users have an empty queue.
    #[instrument(skip(self))]
    pub async fn get_review(&self, user_id: &str) -> ServiceResult<Vec<PullRequestShort>> {
        self.try_get_review(user_id)
            .await
            .inspect_err(|e| obs::emit_operation_failed("user.get_review", e))
    }

    async fn try_get_review(&self, user_id: &str) -> ServiceResult<Vec<PullRequestShort>> {
        Ok(self.pull_requests.list_for_reviewer(user_id).await?)
    }
}

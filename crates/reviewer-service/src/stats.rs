//! Reviewer statistics.

use std::sync::Arc;

use tracing::instrument;

use reviewer_core::PullRequestStatus;
use reviewer_state::{ReviewerAssignmentCount, StatsRepository};

use crate::error::ServiceResult;
use crate::obs;

pub struct StatsService {
    stats: Arc<dyn StatsRepository>,
}

impl StatsService {
    pub fn new(stats: Arc<dyn StatsRepository>) -> Self {
        Self { stats }
    }

    /// Assignment counts per reviewer, busiest first.
    #[instrument(skip(self))]
    pub async fn reviewer_assignments(
        &self,
        status: Option<PullRequestStatus>,
        active_only: bool,
    ) -> ServiceResult<Vec<ReviewerAssignmentCount>> {
        self.try_reviewer_assignments(status, active_only)
            .await
            .inspect_err(|e| obs::emit_operation_failed("stats.reviewer_assignments", e))
    }

    async fn try_reviewer_assignments(
        &self,
        status: Option<PullRequestStatus>,
        active_only: bool,
    ) -> ServiceResult<Vec<ReviewerAssignmentCount>> {
        Ok(self.stats.reviewer_assignments(status, active_only).await?)
    }
}

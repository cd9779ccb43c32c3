//! Structured lifecycle events for pull requests and teams.
//!
//! Every event carries an `event` field so log pipelines can filter on it.

use tracing::{info, warn};

/// Emit event: pull request created with its initial reviewer set.
pub fn emit_pull_request_created(pull_request_id: &str, author_id: &str, reviewers: &[String]) {
    info!(
        event = "pull_request.created",
        pull_request_id = %pull_request_id,
        author_id = %author_id,
        reviewers = ?reviewers,
        reviewer_count = reviewers.len(),
    );
}

/// Emit event: pull request merged. `already_merged` marks an idempotent replay.
pub fn emit_pull_request_merged(pull_request_id: &str, already_merged: bool) {
    info!(
        event = "pull_request.merged",
        pull_request_id = %pull_request_id,
        already_merged = already_merged,
    );
}

/// Emit event: one reviewer slot swapped for another.
pub fn emit_reviewer_reassigned(pull_request_id: &str, old_reviewer_id: &str, new_reviewer_id: &str) {
    info!(
        event = "pull_request.reviewer_reassigned",
        pull_request_id = %pull_request_id,
        old_reviewer_id = %old_reviewer_id,
        new_reviewer_id = %new_reviewer_id,
    );
}

/// Emit event: a new team persisted.
pub fn emit_team_saved(team_name: &str, member_count: usize) {
    info!(event = "team.saved", team_name = %team_name, member_count = member_count);
}

/// Emit event: an existing team's roster refreshed.
pub fn emit_team_members_updated(team_name: &str, member_count: usize) {
    info!(
        event = "team.members_updated",
        team_name = %team_name,
        member_count = member_count,
    );
}

/// Emit event: a use-case failed (warning level).
pub fn emit_operation_failed(operation: &str, error: &dyn std::fmt::Display) {
    warn!(event = "operation.failed", operation = %operation, error = %error);
}

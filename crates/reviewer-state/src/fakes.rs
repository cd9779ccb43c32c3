//! In-memory implementations of the storage traits
//!
//! `MemoryStore` satisfies every trait contract in `storage_traits` over a
//! single mutex-guarded state, so users, rosters and pull requests stay
//! consistent with each other the way a relational backend keeps them.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use reviewer_core::{Member, PullRequest, PullRequestShort, PullRequestStatus, Team, User};

use crate::error::StorageError;
use crate::storage_traits::*;

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<String, User>,
    /// Team name → member ids in roster order.
    rosters: HashMap<String, Vec<String>>,
    pull_requests: HashMap<String, PullRequest>,
    /// Pull request ids in creation order.
    pull_request_order: Vec<String>,
}

/// In-memory users, teams, pull requests and stats.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn user_not_found(user_id: &str) -> StorageError {
    StorageError::UserNotFound {
        user_id: user_id.to_string(),
    }
}

fn team_not_found(team_name: &str) -> StorageError {
    StorageError::TeamNotFound {
        team_name: team_name.to_string(),
    }
}

fn pull_request_not_found(pull_request_id: &str) -> StorageError {
    StorageError::PullRequestNotFound {
        pull_request_id: pull_request_id.to_string(),
    }
}

// ---------------------------------------------------------------------------
// UserRepository
// ---------------------------------------------------------------------------

#[async_trait]
impl UserRepository for MemoryStore {
    async fn get_user(&self, user_id: &str) -> StorageResult<User> {
        let state = self.lock();
        state
            .users
            .get(user_id)
            .cloned()
            .ok_or_else(|| user_not_found(user_id))
    }

    async fn set_is_active(&self, user_id: &str, is_active: bool) -> StorageResult<User> {
        let mut state = self.lock();
        let user = state
            .users
            .get_mut(user_id)
            .ok_or_else(|| user_not_found(user_id))?;
        user.set_is_active(is_active);
        Ok(user.clone())
    }
}

// ---------------------------------------------------------------------------
// TeamRepository
// ---------------------------------------------------------------------------

#[async_trait]
impl TeamRepository for MemoryStore {
    async fn get_team(&self, team_name: &str) -> StorageResult<Team> {
        let state = self.lock();
        let roster = state
            .rosters
            .get(team_name)
            .ok_or_else(|| team_not_found(team_name))?;
        let members = roster
            .iter()
            .filter_map(|id| state.users.get(id))
            .map(|u| u.member.clone())
            .collect();
        Ok(Team::new(team_name, members))
    }

    async fn save_team(&self, team_name: &str, members: &[Member]) -> StorageResult<()> {
        let mut state = self.lock();
        if state.rosters.contains_key(team_name) {
            return Err(StorageError::TeamExists {
                team_name: team_name.to_string(),
            });
        }

        let mut roster: Vec<String> = Vec::with_capacity(members.len());
        for member in members {
            let previous_team = state
                .users
                .get(&member.id)
                .map(|u| u.team_name.clone())
                .filter(|t| t != team_name);
            if let Some(previous_team) = previous_team {
                if let Some(ids) = state.rosters.get_mut(&previous_team) {
                    ids.retain(|id| *id != member.id);
                }
            }

            state
                .users
                .insert(member.id.clone(), User::new(member.clone(), team_name));
            if !roster.contains(&member.id) {
                roster.push(member.id.clone());
            }
        }

        state.rosters.insert(team_name.to_string(), roster);
        Ok(())
    }

    async fn update_team(&self, team_name: &str, update: TeamUpdate<'_>) -> StorageResult<Team> {
        let mut state = self.lock();
        let StoreState { users, rosters, .. } = &mut *state;
        let roster = rosters
            .get(team_name)
            .ok_or_else(|| team_not_found(team_name))?;

        let members = roster
            .iter()
            .filter_map(|id| users.get(id))
            .map(|u| u.member.clone())
            .collect();
        let mut team = Team::new(team_name, members);
        update(&mut team)?;

        for member in team.members.iter().filter(|m| roster.contains(&m.id)) {
            if let Some(user) = users.get_mut(&member.id) {
                user.member.clone_from(member);
            }
        }
        Ok(team)
    }
}

// ---------------------------------------------------------------------------
// PullRequestRepository
// ---------------------------------------------------------------------------

#[async_trait]
impl PullRequestRepository for MemoryStore {
    async fn create(&self, pull_request: &PullRequest) -> StorageResult<String> {
        let mut state = self.lock();
        if state.pull_requests.contains_key(&pull_request.id) {
            return Err(StorageError::PullRequestExists {
                pull_request_id: pull_request.id.clone(),
            });
        }
        state
            .pull_requests
            .insert(pull_request.id.clone(), pull_request.clone());
        state.pull_request_order.push(pull_request.id.clone());
        Ok(pull_request.id.clone())
    }

    async fn get_by_id(&self, pull_request_id: &str) -> StorageResult<PullRequest> {
        let state = self.lock();
        state
            .pull_requests
            .get(pull_request_id)
            .cloned()
            .ok_or_else(|| pull_request_not_found(pull_request_id))
    }

    async fn update_pull_request(
        &self,
        pull_request_id: &str,
        update: PullRequestUpdate<'_>,
    ) -> StorageResult<PullRequest> {
        let mut state = self.lock();
        let stored = state
            .pull_requests
            .get_mut(pull_request_id)
            .ok_or_else(|| pull_request_not_found(pull_request_id))?;

        let mut draft = stored.clone();
        update(&mut draft)?;
        stored.clone_from(&draft);
        Ok(draft)
    }

    async fn list_for_reviewer(&self, user_id: &str) -> StorageResult<Vec<PullRequestShort>> {
        let state = self.lock();
        let shorts = state
            .pull_request_order
            .iter()
            .filter_map(|id| state.pull_requests.get(id))
            .filter(|pr| pr.is_assigned(user_id))
            .map(PullRequest::short)
            .collect();
        Ok(shorts)
    }
}

// ---------------------------------------------------------------------------
// StatsRepository
// ---------------------------------------------------------------------------

#[async_trait]
impl StatsRepository for MemoryStore {
    async fn reviewer_assignments(
        &self,
        status: Option<PullRequestStatus>,
        active_only: bool,
    ) -> StorageResult<Vec<ReviewerAssignmentCount>> {
        let state = self.lock();

        let mut counts: HashMap<&str, u64> = HashMap::new();
        for pr in state.pull_requests.values() {
            if status.is_some_and(|s| s != pr.status) {
                continue;
            }
            for reviewer_id in &pr.assigned_reviewers {
                *counts.entry(reviewer_id.as_str()).or_default() += 1;
            }
        }

        let mut rows: Vec<ReviewerAssignmentCount> = counts
            .into_iter()
            .filter_map(|(user_id, count)| {
                let user = state.users.get(user_id)?;
                if active_only && !user.is_active() {
                    return None;
                }
                Some(ReviewerAssignmentCount {
                    user_id: user_id.to_string(),
                    name: user.member.name.clone(),
                    count,
                })
            })
            .collect();

        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.user_id.cmp(&b.user_id)));
        Ok(rows)
    }
}

//! Team roster use-cases.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use reviewer_core::{DomainResult, Member, Team};
use reviewer_state::{StorageError, TeamRepository};

use crate::error::{ServiceError, ServiceResult};
use crate::obs;

/// Creates teams and refreshes their rosters.
pub struct TeamService {
    teams: Arc<dyn TeamRepository>,
}

impl TeamService {
    pub fn new(teams: Arc<dyn TeamRepository>) -> Self {
        Self { teams }
    }

    /// Register a team, or refresh the activity flags and names of an
    /// existing team's members.
    ///
    /// A refresh may name a subset of the current roster but never a user
    /// outside it.
    ///
    /// # Errors
    ///
    /// `TeamExists` when the proposal names someone outside the existing
    /// roster.
    #[instrument(skip(self, members), fields(member_count = members.len()))]
    pub async fn add_team(&self, team_name: &str, members: &[Member]) -> ServiceResult<Team> {
        self.try_add_team(team_name, members)
            .await
            .inspect_err(|e| obs::emit_operation_failed("team.add", e))
    }

    async fn try_add_team(&self, team_name: &str, members: &[Member]) -> ServiceResult<Team> {
        match self.refresh_members(team_name, members).await {
            Err(ServiceError::TeamNotFound { .. }) => info!("team not found, saving new team"),
            refreshed => return refreshed,
        }

        match self.teams.save_team(team_name, members).await {
            Ok(()) => {
                obs::emit_team_saved(team_name, members.len());
                Ok(self.teams.get_team(team_name).await?)
            }
            // Created by a concurrent caller between the two steps.
            Err(StorageError::TeamExists { .. }) => self.refresh_members(team_name, members).await,
            Err(e) => Err(e.into()),
        }
    }

    async fn refresh_members(&self, team_name: &str, members: &[Member]) -> ServiceResult<Team> {
        let team = self
            .teams
            .update_team(
                team_name,
                Box::new(|team: &mut Team| -> DomainResult<()> {
                    team.update_members(members).inspect_err(|_| {
                        warn!(existing = ?team.members, proposed = ?members, "members mismatch");
                    })
                }),
            )
            .await?;

        obs::emit_team_members_updated(team_name, members.len());
        Ok(team)
    }

    /// Fetch a team with its members in roster order.
    #[instrument(skip(self))]
    pub async fn get_team(&self, team_name: &str) -> ServiceResult<Team> {
        self.teams
            .get_team(team_name)
            .await
            .inspect_err(|e| {
                if e.is_not_found() {
                    warn!("team not found");
                }
            })
            .map_err(ServiceError::from)
    }
}

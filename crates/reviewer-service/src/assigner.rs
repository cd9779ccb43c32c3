//! Wiring of the services over one set of collaborators.

use std::sync::Arc;

use reviewer_core::{
    RandomReviewerPicker, RandomReviewerReassigner, ReviewerPicker, ReviewerReassigner,
};
use reviewer_state::{
    MemoryStore, PullRequestRepository, StatsRepository, TeamRepository, UserRepository,
};

use crate::config::ServiceConfig;
use crate::pull_requests::PullRequestService;
use crate::stats::StatsService;
use crate::teams::TeamService;
use crate::users::UserService;

/// All reviewer-assignment use-cases sharing the same storage.
pub struct ReviewerAssigner {
    pub pull_requests: PullRequestService,
    pub teams: TeamService,
    pub users: UserService,
    pub stats: StatsService,
    config: ServiceConfig,
}

impl ReviewerAssigner {
    /// Build over a backend implementing every repository trait.
    pub fn new<S>(
        store: Arc<S>,
        picker: Arc<dyn ReviewerPicker>,
        reassigner: Arc<dyn ReviewerReassigner>,
        config: ServiceConfig,
    ) -> Self
    where
        S: UserRepository + TeamRepository + PullRequestRepository + StatsRepository + 'static,
    {
        Self {
            pull_requests: PullRequestService::new(
                store.clone(),
                store.clone(),
                store.clone(),
                picker,
                reassigner,
                config.reviewers_per_pr,
            ),
            teams: TeamService::new(store.clone()),
            users: UserService::new(store.clone(), store.clone()),
            stats: StatsService::new(store),
            config,
        }
    }

    /// In-memory storage with uniform random selection.
    ///
    /// With `rng_seed` set, the picker uses that seed and the reassigner
    /// uses the next one, so runs are reproducible.
    pub fn in_memory(config: ServiceConfig) -> Self {
        let (picker, reassigner) = match config.rng_seed {
            Some(seed) => (
                RandomReviewerPicker::seeded(seed),
                RandomReviewerReassigner::seeded(seed.wrapping_add(1)),
            ),
            None => (
                RandomReviewerPicker::from_entropy(),
                RandomReviewerReassigner::from_entropy(),
            ),
        };
        Self::new(
            Arc::new(MemoryStore::new()),
            Arc::new(picker),
            Arc::new(reassigner),
            config,
        )
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

//! Service configuration.

use serde::{Deserialize, Serialize};

/// Number of reviewers requested when a pull request is created.
pub const DEFAULT_REVIEWERS_PER_PR: usize = 2;

/// Tunables for the reviewer-assignment use-cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Reviewers requested per new pull request.
    pub reviewers_per_pr: usize,
    /// Seed for the selection RNG; `None` seeds from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            reviewers_per_pr: DEFAULT_REVIEWERS_PER_PR,
            rng_seed: None,
        }
    }
}

impl ServiceConfig {
    pub fn with_reviewers_per_pr(mut self, count: usize) -> Self {
        self.reviewers_per_pr = count;
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

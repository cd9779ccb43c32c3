//! Reviewer-Service: use-cases for automatic code-review assignment
//!
//! Orchestrates the domain state machine in `reviewer-core` over the storage
//! contracts in `reviewer-state`.
//!
//! ## Key Components
//!
//! - `PullRequestService`: create, merge, reassign
//! - `TeamService`: register teams and refresh rosters
//! - `UserService`: activity toggling and review queues
//! - `StatsService`: assignment counts
//! - `ReviewerAssigner`: all of the above over shared collaborators
//! - `ServiceError` / `ErrorCode`: boundary error taxonomy

pub mod assigner;
pub mod config;
pub mod error;
pub mod obs;
pub mod pull_requests;
pub mod stats;
pub mod teams;
pub mod telemetry;
pub mod users;

pub use assigner::ReviewerAssigner;
pub use config::{ServiceConfig, DEFAULT_REVIEWERS_PER_PR};
pub use error::{ErrorBody, ErrorCode, ErrorResponse, ServiceError, ServiceResult};
pub use pull_requests::{PullRequestService, Reassignment};
pub use stats::StatsService;
pub use teams::TeamService;
pub use users::UserService;

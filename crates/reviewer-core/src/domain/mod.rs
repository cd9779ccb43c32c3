//! Domain models for reviewer assignment.
//!
//! - `Member` / `Team`: roster entries and the reconciliation rule
//! - `User`: a member viewed within its team
//! - `PullRequest`: the OPEN → MERGED state machine and reviewer list

pub mod error;
pub mod pull_request;
pub mod team;
pub mod user;

pub use error::{DomainError, DomainResult};
pub use pull_request::{PullRequest, PullRequestShort, PullRequestStatus, UnknownStatus};
pub use team::{Member, Team};
pub use user::User;

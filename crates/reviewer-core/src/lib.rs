//! Reviewer Assigner core library
//!
//! Pure, synchronous domain logic: the pull-request state machine, the
//! reviewer selection policies and team roster reconciliation. Nothing in this
//! crate performs I/O; callers load entities, run an operation and persist
//! the mutated entity themselves.

pub mod domain;
pub mod selection;

pub use domain::{
    DomainError, DomainResult, Member, PullRequest, PullRequestShort, PullRequestStatus, Team,
    UnknownStatus, User,
};
pub use selection::{
    InOrderPicker, PickerReassigner, RandomReviewerPicker, RandomReviewerReassigner,
    ReviewerPicker, ReviewerReassigner,
};

/// Reviewer Assigner version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

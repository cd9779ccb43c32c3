//! Reviewer-State: persistence contracts for reviewer assignment
//!
//! This crate defines what the orchestration layer needs from storage and
//! ships an in-memory implementation of it.
//!
//! ## Key Components
//!
//! - `UserRepository`, `TeamRepository`, `PullRequestRepository`,
//!   `StatsRepository`: async collaborator traits
//! - `MemoryStore`: mutex-guarded implementation of all four
//! - `PullRequestUpdate` / `TeamUpdate`: atomic read-modify-write edits
//! - `StorageError`: not-found, unique-key and rejected-update failures

mod error;
pub mod fakes;
pub mod storage_traits;

pub use error::StorageError;
pub use fakes::MemoryStore;
pub use storage_traits::{
    PullRequestRepository, PullRequestUpdate, ReviewerAssignmentCount, StatsRepository,
    StorageResult, TeamRepository, TeamUpdate, UserRepository,
};

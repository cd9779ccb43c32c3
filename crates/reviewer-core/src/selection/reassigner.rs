//! Selecting a single replacement reviewer.

use rand::rngs::StdRng;

use super::picker::{RandomReviewerPicker, ReviewerPicker};
use crate::domain::{DomainError, DomainResult, Member};

/// Picks exactly one replacement for `old_reviewer`.
///
/// The pool is expected to already exclude the author, the old reviewer and
/// everyone currently assigned; implementations do no further filtering.
pub trait ReviewerReassigner: Send + Sync {
    /// # Errors
    ///
    /// Returns `DomainError::NotEnoughMembers` when the pool is empty.
    fn reassign(&self, old_reviewer: &Member, candidates: Vec<Member>) -> DomainResult<Member>;
}

/// Reassigner that asks a [`ReviewerPicker`] for a single reviewer.
#[derive(Debug, Clone, Default)]
pub struct PickerReassigner<P> {
    picker: P,
}

impl<P: ReviewerPicker> PickerReassigner<P> {
    pub fn new(picker: P) -> Self {
        Self { picker }
    }
}

/// Production reassigner backed by uniform random selection.
pub type RandomReviewerReassigner = PickerReassigner<RandomReviewerPicker<StdRng>>;

impl PickerReassigner<RandomReviewerPicker<StdRng>> {
    pub fn from_entropy() -> Self {
        Self::new(RandomReviewerPicker::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(RandomReviewerPicker::seeded(seed))
    }
}

impl<P: ReviewerPicker> ReviewerReassigner for PickerReassigner<P> {
    fn reassign(&self, _old_reviewer: &Member, candidates: Vec<Member>) -> DomainResult<Member> {
        self.picker
            .pick(candidates, 1)
            .into_iter()
            .next()
            .ok_or(DomainError::NotEnoughMembers)
    }
}

//! Reviewer selection policies.
//!
//! Both policies are injected into the pull-request state machine so that it
//! never touches a random source directly.
//!
//! # Module layout
//!
//! - [`picker`]: `ReviewerPicker`, `RandomReviewerPicker`, `InOrderPicker`
//! - [`reassigner`]: `ReviewerReassigner`, `PickerReassigner`, `RandomReviewerReassigner`

pub mod picker;
pub mod reassigner;

pub use picker::{InOrderPicker, RandomReviewerPicker, ReviewerPicker};
pub use reassigner::{PickerReassigner, RandomReviewerReassigner, ReviewerReassigner};

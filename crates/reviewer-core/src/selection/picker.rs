//! Selecting N reviewers from a candidate pool.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::Member;

/// Picks up to `count` reviewers from an already filtered candidate pool.
///
/// Under-supply is never an error: an empty pool or `count == 0` yields an
/// empty selection, and a pool no larger than `count` is returned whole.
pub trait ReviewerPicker: Send + Sync {
    fn pick(&self, candidates: Vec<Member>, count: usize) -> Vec<Member>;
}

/// Uniform random selection without replacement.
///
/// The random source is owned by the picker; use [`RandomReviewerPicker::seeded`]
/// for reproducible selections.
pub struct RandomReviewerPicker<R = StdRng> {
    rng: Mutex<R>,
}

impl RandomReviewerPicker<StdRng> {
    /// Picker seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Picker with a fixed seed; equal seeds give equal selection sequences.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomReviewerPicker<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl Default for RandomReviewerPicker<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R> std::fmt::Debug for RandomReviewerPicker<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RandomReviewerPicker").finish_non_exhaustive()
    }
}

impl<R: Rng + Send> ReviewerPicker for RandomReviewerPicker<R> {
    fn pick(&self, mut candidates: Vec<Member>, count: usize) -> Vec<Member> {
        if candidates.is_empty() || count == 0 {
            return Vec::new();
        }

        if candidates.len() <= count {
            return candidates;
        }

        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        candidates.shuffle(&mut *rng);
        candidates.truncate(count);
        candidates
    }
}

/// Deterministic picker: the first `count` candidates in pool order.
#[derive(Debug, Clone, Copy, Default)]
pub struct InOrderPicker;

impl ReviewerPicker for InOrderPicker {
    fn pick(&self, mut candidates: Vec<Member>, count: usize) -> Vec<Member> {
        candidates.truncate(count);
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    fn pool(n: usize) -> Vec<Member> {
        (1..=n)
            .map(|i| Member::new(format!("u{i}"), format!("User {i}"), true))
            .collect()
    }

    fn ids(members: &[Member]) -> Vec<&str> {
        members.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_random_zero_count_is_empty() {
        let picker = RandomReviewerPicker::seeded(7);
        assert!(picker.pick(pool(3), 0).is_empty());
    }

    #[test]
    fn test_random_empty_pool_is_empty() {
        let picker = RandomReviewerPicker::seeded(7);
        assert!(picker.pick(Vec::new(), 2).is_empty());
    }

    #[test]
    fn test_random_undersupplied_pool_returned_whole() {
        let picker = RandomReviewerPicker::seeded(7);
        let picked = picker.pick(pool(2), 2);
        assert_eq!(ids(&picked), vec!["u1", "u2"]);

        let picked = picker.pick(pool(1), 5);
        assert_eq!(ids(&picked), vec!["u1"]);
    }

    #[test]
    fn test_random_picks_distinct_members_from_pool() {
        let picker = RandomReviewerPicker::seeded(42);
        let candidates = pool(6);
        let known: HashSet<String> = candidates.iter().map(|m| m.id.clone()).collect();

        for _ in 0..50 {
            let picked = picker.pick(candidates.clone(), 3);
            assert_eq!(picked.len(), 3);
            let unique: HashSet<&String> = picked.iter().map(|m| &m.id).collect();
            assert_eq!(unique.len(), 3);
            assert!(picked.iter().all(|m| known.contains(&m.id)));
        }
    }

    #[test]
    fn test_random_same_seed_same_selection() {
        let a = RandomReviewerPicker::seeded(1234);
        let b = RandomReviewerPicker::seeded(1234);

        for _ in 0..10 {
            assert_eq!(a.pick(pool(8), 2), b.pick(pool(8), 2));
        }
    }

    #[test]
    fn test_random_eventually_selects_every_candidate() {
        let picker = RandomReviewerPicker::seeded(99);
        let mut seen: HashMap<String, usize> = HashMap::new();

        for _ in 0..500 {
            for m in picker.pick(pool(5), 1) {
                *seen.entry(m.id).or_default() += 1;
            }
        }

        assert_eq!(seen.len(), 5);
        // 100 expected per candidate; a fair shuffle stays far inside this band.
        assert!(seen.values().all(|&n| n > 50 && n < 150), "{seen:?}");
    }

    #[test]
    fn test_in_order_takes_prefix() {
        let picked = InOrderPicker.pick(pool(4), 2);
        assert_eq!(ids(&picked), vec!["u1", "u2"]);
        assert!(InOrderPicker.pick(pool(4), 0).is_empty());
        assert_eq!(InOrderPicker.pick(pool(1), 3).len(), 1);
    }
}

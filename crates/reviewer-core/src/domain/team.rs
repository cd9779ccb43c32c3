//! Team roster and the subset-only reconciliation rule.

use serde::{Deserialize, Serialize};

use super::error::{DomainError, DomainResult};

/// A person on a team roster.
///
/// Identity is `id`; the derived `PartialEq` compares every field and is what
/// roster reconciliation uses for change detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub is_active: bool,
}

impl Member {
    pub fn new(id: impl Into<String>, name: impl Into<String>, is_active: bool) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_active,
        }
    }
}

/// A named roster of members with unique ids, in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub members: Vec<Member>,
}

impl Team {
    pub fn new(name: impl Into<String>, members: Vec<Member>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    /// Look up a member by id.
    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Members eligible for reviewer selection.
    pub fn active_members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.is_active)
    }

    /// Refresh the roster in place from a proposed member list.
    ///
    /// Every proposed id must already be on the roster, and a non-empty
    /// roster can never be refreshed with an empty list. Matching members get
    /// `name` and `is_active` overwritten; members missing from `proposed`
    /// keep their current attributes.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MembersMismatch` without touching any member if
    /// the proposal violates the subset rule.
    pub fn update_members(&mut self, proposed: &[Member]) -> DomainResult<()> {
        if !is_known_subset(&self.members, proposed) {
            return Err(DomainError::MembersMismatch {
                team_name: self.name.clone(),
            });
        }

        for updated in proposed {
            if let Some(current) = self.members.iter_mut().find(|m| m.id == updated.id) {
                if current != updated {
                    current.name.clone_from(&updated.name);
                    current.is_active = updated.is_active;
                }
            }
        }

        Ok(())
    }
}

fn is_known_subset(existing: &[Member], proposed: &[Member]) -> bool {
    if proposed.is_empty() && !existing.is_empty() {
        return false;
    }

    proposed
        .iter()
        .all(|p| existing.iter().any(|m| m.id == p.id))
}

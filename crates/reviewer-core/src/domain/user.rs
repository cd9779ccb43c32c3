//! A team member seen from the membership subsystem.

use serde::{Deserialize, Serialize};

use super::team::Member;

/// A member together with the team it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(flatten)]
    pub member: Member,
    pub team_name: String,
}

impl User {
    pub fn new(member: Member, team_name: impl Into<String>) -> Self {
        Self {
            member,
            team_name: team_name.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.member.id
    }

    pub fn is_active(&self) -> bool {
        self.member.is_active
    }

    pub fn set_is_active(&mut self, is_active: bool) {
        self.member.is_active = is_active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_is_active_toggles_member_flag() {
        let mut user = User::new(Member::new("u1", "Alice", false), "payments");

        user.set_is_active(true);
        assert!(user.is_active());

        user.set_is_active(true);
        assert!(user.is_active());

        user.set_is_active(false);
        assert!(!user.member.is_active);
        assert_eq!(user.team_name, "payments");
    }

    #[test]
    fn test_user_serializes_flat() {
        let user = User::new(Member::new("u1", "Alice", true), "payments");
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], "u1");
        assert_eq!(json["team_name"], "payments");
        assert_eq!(json["is_active"], true);
    }
}

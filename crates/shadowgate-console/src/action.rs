//! Row-level actions.

use shadowgate_core::{TargetRole, UserId};
use std::fmt;

/// An action the operator triggers on one row of the user table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    /// Set the role to `admin`.
    Promote(UserId),
    /// Set the role to `user`.
    Demote(UserId),
    /// Issue a temporary password.
    ResetPassword(UserId),
    /// Delete the account. Needs confirmation.
    Delete(UserId),
}

impl RowAction {
    pub fn user_id(&self) -> &UserId {
        match self {
            RowAction::Promote(id)
            | RowAction::Demote(id)
            | RowAction::ResetPassword(id)
            | RowAction::Delete(id) => id,
        }
    }

    /// Short name used in logs and prompts.
    pub fn name(&self) -> &'static str {
        match self {
            RowAction::Promote(_) => "promote",
            RowAction::Demote(_) => "demote",
            RowAction::ResetPassword(_) => "reset-password",
            RowAction::Delete(_) => "delete",
        }
    }

    /// Role a promote/demote sets.
    pub fn target_role(&self) -> Option<TargetRole> {
        match self {
            RowAction::Promote(_) => Some(TargetRole::Admin),
            RowAction::Demote(_) => Some(TargetRole::User),
            _ => None,
        }
    }

    /// Question to ask before running the action, if any.
    pub fn confirmation_prompt(&self) -> Option<&'static str> {
        match self {
            RowAction::Delete(_) => Some("Delete this user?"),
            _ => None,
        }
    }
}

impl fmt::Display for RowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name(), self.user_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_delete_needs_confirmation() {
        let id = UserId::from(7);
        assert_eq!(
            RowAction::Delete(id.clone()).confirmation_prompt(),
            Some("Delete this user?")
        );
        assert_eq!(RowAction::Promote(id.clone()).confirmation_prompt(), None);
        assert_eq!(RowAction::ResetPassword(id).confirmation_prompt(), None);
    }

    #[test]
    fn test_target_roles() {
        let id = UserId::from(1);
        assert_eq!(RowAction::Promote(id.clone()).target_role(), Some(TargetRole::Admin));
        assert_eq!(RowAction::Demote(id.clone()).target_role(), Some(TargetRole::User));
        assert_eq!(RowAction::Delete(id).target_role(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(RowAction::ResetPassword(UserId::from("u-1")).to_string(), "reset-password u-1");
    }
}

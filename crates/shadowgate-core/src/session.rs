//! Admin session and access gate.
//!
//! The session is written to client storage by an external login flow.
//! The console reads it once at boot, decides whether the operator may use
//! the console at all, and clears it on logout.

use crate::navigation::Redirect;
use crate::storage::{ClientStorage, StorageError};
use std::fmt;

/// Storage key for the bearer credential.
pub const TOKEN_KEY: &str = "sg_token";
/// Storage key for the lowercase role name.
pub const ROLE_KEY: &str = "sg_role";
/// Storage key for the optional display name.
pub const USER_KEY: &str = "sg_user";

/// Role required to use the console.
pub const ADMIN_ROLE: &str = "admin";

/// An authenticated operator session.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    role: String,
    display_name: Option<String>,
}

/// Outcome of the access gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// The operator is an admin; the console may proceed.
    Granted(Session),
    /// The console must navigate away before doing anything else.
    Redirect(Redirect),
}

impl Session {
    /// Build a session. The role is normalized to lowercase.
    pub fn new(
        token: impl Into<String>,
        role: impl AsRef<str>,
        display_name: Option<String>,
    ) -> Self {
        Self {
            token: token.into(),
            role: role.as_ref().trim().to_lowercase(),
            display_name: display_name.filter(|name| !name.trim().is_empty()),
        }
    }

    /// Run the access gate against client storage.
    ///
    /// A missing or blank token redirects to the login view; a role other
    /// than `admin` redirects to the application root.
    pub fn gate(storage: &dyn ClientStorage) -> Result<GateDecision, StorageError> {
        let token = storage
            .get(TOKEN_KEY)?
            .filter(|token| !token.trim().is_empty());
        let Some(token) = token else {
            tracing::debug!("No stored token");
            return Ok(GateDecision::Redirect(Redirect::Login));
        };

        let role = storage.get(ROLE_KEY)?.unwrap_or_default();
        let session = Session::new(token, role, storage.get(USER_KEY)?);
        if !session.is_admin() {
            tracing::debug!(role = %session.role, "Stored role is not admin");
            return Ok(GateDecision::Redirect(Redirect::Home));
        }

        Ok(GateDecision::Granted(session))
    }

    /// Persist this session, the way the login flow does.
    pub fn store(&self, storage: &dyn ClientStorage) -> Result<(), StorageError> {
        storage.set(TOKEN_KEY, &self.token)?;
        storage.set(ROLE_KEY, &self.role)?;
        match &self.display_name {
            Some(name) => storage.set(USER_KEY, name),
            None => storage.remove(USER_KEY),
        }
    }

    /// Remove the stored credential. The display name is kept unless
    /// `forget_display_name` is set, so the login form can prefill it.
    pub fn clear(storage: &dyn ClientStorage, forget_display_name: bool) -> Result<(), StorageError> {
        storage.remove(TOKEN_KEY)?;
        storage.remove(ROLE_KEY)?;
        if forget_display_name {
            storage.remove(USER_KEY)?;
        }
        Ok(())
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    /// Value of the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Badge text, e.g. `Role: admin · alice`.
    pub fn badge(&self) -> String {
        match &self.display_name {
            Some(name) => format!("Role: {} · {}", self.role, name),
            None => format!("Role: {}", self.role),
        }
    }
}

// The token never shows up in logs or debug output.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .field("display_name", &self.display_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_gate_without_token_redirects_to_login() {
        let storage = MemoryStorage::with_entries([(ROLE_KEY, "admin")]);
        assert_eq!(
            Session::gate(&storage).unwrap(),
            GateDecision::Redirect(Redirect::Login)
        );
    }

    #[test]
    fn test_gate_blank_token_redirects_to_login() {
        let storage = MemoryStorage::with_entries([(TOKEN_KEY, "  "), (ROLE_KEY, "admin")]);
        assert_eq!(
            Session::gate(&storage).unwrap(),
            GateDecision::Redirect(Redirect::Login)
        );
    }

    #[test]
    fn test_gate_non_admin_redirects_home() {
        let storage = MemoryStorage::with_entries([(TOKEN_KEY, "t"), (ROLE_KEY, "user")]);
        assert_eq!(
            Session::gate(&storage).unwrap(),
            GateDecision::Redirect(Redirect::Home)
        );

        let storage = MemoryStorage::with_entries([(TOKEN_KEY, "t")]);
        assert_eq!(
            Session::gate(&storage).unwrap(),
            GateDecision::Redirect(Redirect::Home)
        );
    }

    #[test]
    fn test_gate_grants_admin_case_insensitively() {
        let storage = MemoryStorage::with_entries([
            (TOKEN_KEY, "tok"),
            (ROLE_KEY, "ADMIN"),
            (USER_KEY, "alice"),
        ]);
        let GateDecision::Granted(session) = Session::gate(&storage).unwrap() else {
            panic!("expected access to be granted");
        };
        assert_eq!(session.token(), "tok");
        assert_eq!(session.role(), "admin");
        assert_eq!(session.bearer(), "Bearer tok");
        assert_eq!(session.badge(), "Role: admin · alice");
    }

    #[test]
    fn test_badge_without_display_name() {
        let session = Session::new("t", "admin", Some(String::new()));
        assert_eq!(session.badge(), "Role: admin");
    }

    #[test]
    fn test_clear_keeps_display_name_by_default() {
        let storage = MemoryStorage::new();
        Session::new("t", "admin", Some("alice".to_string()))
            .store(&storage)
            .unwrap();

        Session::clear(&storage, false).unwrap();
        assert_eq!(storage.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(storage.get(ROLE_KEY).unwrap(), None);
        assert_eq!(storage.get(USER_KEY).unwrap().as_deref(), Some("alice"));

        Session::clear(&storage, true).unwrap();
        assert_eq!(storage.get(USER_KEY).unwrap(), None);
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new("secret-token", "admin", None);
        let debug = format!("{:?}", session);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<redacted>"));
    }
}

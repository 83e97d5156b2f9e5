//! Sign-in against the compiled-in account roster.
//!
//! There is no sign-up path and no password hashing; the roster is
//! fixture data baked into the binary. Only the resulting identity is
//! ever persisted, never the credentials it was checked against.

use crate::config::StoreConfig;
use crate::constants::SESSION_SLOT;
use crate::model::{Identity, Role};
use crate::storage::SlotStore;
use crate::StoreResult;
use chairside_types::{EmailAddress, NonEmptyText};
use std::sync::Arc;

/// One compiled-in account.
#[derive(Debug)]
struct RosterEntry {
    id: &'static str,
    role: Role,
    email: &'static str,
    password: &'static str,
    patient_id: Option<&'static str>,
}

/// The fixed accounts the practice ships with.
const ROSTER: [RosterEntry; 4] = [
    RosterEntry {
        id: "1",
        role: Role::Admin,
        email: "admin@entnt.in",
        password: "admin123",
        patient_id: None,
    },
    RosterEntry {
        id: "2",
        role: Role::Patient,
        email: "john@entnt.in",
        password: "patient123",
        patient_id: Some("p1"),
    },
    RosterEntry {
        id: "3",
        role: Role::Patient,
        email: "jane@entnt.in",
        password: "patient123",
        patient_id: Some("p2"),
    },
    RosterEntry {
        id: "4",
        role: Role::Patient,
        email: "mike@entnt.in",
        password: "patient123",
        patient_id: Some("p3"),
    },
];

/// Tracks who is signed in and persists that across restarts.
#[derive(Debug)]
pub struct SessionStore {
    slots: SlotStore,
    current: Option<Identity>,
}

impl SessionStore {
    /// Open the session store, restoring any persisted session.
    ///
    /// A missing session slot means logged out. A corrupt one is cleared
    /// by the slot layer and treated the same way.
    pub fn open(cfg: Arc<StoreConfig>) -> Self {
        let slots = SlotStore::new(cfg);
        let current = slots.load(SESSION_SLOT);
        Self { slots, current }
    }

    /// Check credentials against the roster.
    ///
    /// Both fields must match exactly. On success the identity is
    /// persisted and cached; on failure nothing changes, including any
    /// session already in place.
    pub fn login(&mut self, email: &str, password: &str) -> StoreResult<Option<Identity>> {
        let entry = ROSTER
            .iter()
            .find(|entry| entry.email == email && entry.password == password);

        let Some(entry) = entry else {
            tracing::debug!("rejected login for {}", email);
            return Ok(None);
        };

        let identity = Identity {
            id: NonEmptyText::new(entry.id).expect("roster ids are non-empty"),
            role: entry.role,
            email: EmailAddress::new(entry.email).expect("roster emails are well-formed"),
            patient_id: entry
                .patient_id
                .map(|raw| raw.parse().expect("roster patient ids are canonical")),
        };

        self.slots.save(SESSION_SLOT, &identity)?;
        self.current = Some(identity.clone());
        Ok(Some(identity))
    }

    /// Sign out, clearing both the cache and the persisted slot.
    ///
    /// Signing out while already signed out is harmless.
    pub fn logout(&mut self) -> StoreResult<()> {
        self.current = None;
        self.slots.remove(SESSION_SLOT)
    }

    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    pub fn is_admin(&self) -> bool {
        self.current.as_ref().is_some_and(Identity::is_admin)
    }

    pub fn is_patient(&self) -> bool {
        self.current.as_ref().is_some_and(Identity::is_patient)
    }
}

// =============================================================================================
// TESTS
// =============================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_cfg(tmp: &TempDir) -> Arc<StoreConfig> {
        Arc::new(StoreConfig::new(tmp.path().to_path_buf()).expect("Failed to create config"))
    }

    #[test]
    fn test_admin_login_succeeds() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let mut sessions = SessionStore::open(test_cfg(&tmp));

        let identity = sessions
            .login("admin@entnt.in", "admin123")
            .expect("Login should not fail")
            .expect("Admin credentials should match");

        assert_eq!(identity.role, Role::Admin);
        assert!(identity.patient_id.is_none());
        assert!(sessions.is_admin());
        assert!(tmp.path().join("user.json").is_file());
    }

    #[test]
    fn test_patient_login_links_record() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let mut sessions = SessionStore::open(test_cfg(&tmp));

        let identity = sessions
            .login("john@entnt.in", "patient123")
            .expect("Login should not fail")
            .expect("Patient credentials should match");

        assert_eq!(identity.role, Role::Patient);
        assert_eq!(
            identity.patient_id,
            Some("p1".parse().expect("Failed to parse record id"))
        );
        assert!(sessions.is_patient());
        assert!(!sessions.is_admin());
    }

    #[test]
    fn test_failed_login_leaves_session_untouched() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let mut sessions = SessionStore::open(test_cfg(&tmp));

        sessions
            .login("admin@entnt.in", "admin123")
            .expect("Login should not fail");

        // Wrong password, unknown account and case mismatch all miss.
        for (email, password) in [
            ("admin@entnt.in", "wrong"),
            ("x@x.com", "wrong"),
            ("ADMIN@ENTNT.IN", "admin123"),
        ] {
            let refused = sessions.login(email, password).expect("Login should not fail");
            assert!(refused.is_none(), "{email} should be rejected");
        }

        let current = sessions.current().expect("Prior session should survive");
        assert_eq!(current.role, Role::Admin);
    }

    #[test]
    fn test_logout_clears_persisted_session() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let mut sessions = SessionStore::open(test_cfg(&tmp));

        sessions
            .login("jane@entnt.in", "patient123")
            .expect("Login should not fail");
        sessions.logout().expect("Logout should not fail");

        assert!(sessions.current().is_none());
        assert!(!tmp.path().join("user.json").exists());

        // Logging out again is a no-op.
        sessions.logout().expect("Repeat logout should not fail");
    }

    #[test]
    fn test_session_restores_across_reopen() {
        let tmp = TempDir::new().expect("Failed to create temp dir");

        let expected = {
            let mut sessions = SessionStore::open(test_cfg(&tmp));
            sessions
                .login("mike@entnt.in", "patient123")
                .expect("Login should not fail")
                .expect("Patient credentials should match")
        };

        let reopened = SessionStore::open(test_cfg(&tmp));
        assert_eq!(reopened.current(), Some(&expected));
    }

    #[test]
    fn test_corrupt_session_slot_means_logged_out() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(tmp.path().join("user.json"), b"not json at all")
            .expect("Failed to write file");

        let sessions = SessionStore::open(test_cfg(&tmp));

        assert!(sessions.current().is_none());
        assert!(
            !tmp.path().join("user.json").exists(),
            "corrupt slot should be cleared"
        );
    }
}

//! The signed-in account.

use chairside_id::RecordId;
use chairside_types::{EmailAddress, NonEmptyText};

/// Access level attached to a signed-in identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Role {
    Admin,
    Patient,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "Admin"),
            Role::Patient => write!(f, "Patient"),
        }
    }
}

/// A signed-in account, as persisted in the session slot.
///
/// Passwords never appear here. They live only in the compiled-in roster
/// and are checked at login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: NonEmptyText,
    pub role: Role,
    pub email: EmailAddress,
    /// Set for patient accounts only; links the account to its record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<RecordId>,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_patient(&self) -> bool {
        self.role == Role::Patient
    }
}

// =============================================================================================
// TESTS
// =============================================================================================

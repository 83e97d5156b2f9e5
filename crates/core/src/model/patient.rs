//! Patient records and the shapes used to create and amend them.

use chairside_id::RecordId;
use chairside_types::{EmailAddress, NonEmptyText};
use chrono::{DateTime, NaiveDate, Utc};

/// ABO blood group with Rhesus factor, written in clinical shorthand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BloodType {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodType {
    /// Parse the clinical shorthand, e.g. `"O+"` or `"AB-"`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "A+" => Some(Self::APositive),
            "A-" => Some(Self::ANegative),
            "B+" => Some(Self::BPositive),
            "B-" => Some(Self::BNegative),
            "AB+" => Some(Self::AbPositive),
            "AB-" => Some(Self::AbNegative),
            "O+" => Some(Self::OPositive),
            "O-" => Some(Self::ONegative),
            _ => None,
        }
    }
}

impl std::fmt::Display for BloodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shorthand = match self {
            Self::APositive => "A+",
            Self::ANegative => "A-",
            Self::BPositive => "B+",
            Self::BNegative => "B-",
            Self::AbPositive => "AB+",
            Self::AbNegative => "AB-",
            Self::OPositive => "O+",
            Self::ONegative => "O-",
        };
        f.write_str(shorthand)
    }
}

/// A registered patient.
///
/// Only the identity fields are required; everything else, including the
/// free-text clinical summary in `health_info`, is optional and omitted
/// from the stored JSON when absent.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: RecordId,
    pub name: NonEmptyText,
    pub dob: NaiveDate,
    pub contact: NonEmptyText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<NonEmptyText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<NonEmptyText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_info: Option<NonEmptyText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<BloodType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance: Option<NonEmptyText>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Fields a caller supplies when registering a patient.
///
/// The id and timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub name: NonEmptyText,
    pub dob: NaiveDate,
    pub contact: NonEmptyText,
    pub email: Option<EmailAddress>,
    pub address: Option<NonEmptyText>,
    pub emergency_contact: Option<NonEmptyText>,
    pub health_info: Option<NonEmptyText>,
    pub blood_type: Option<BloodType>,
    pub insurance: Option<NonEmptyText>,
}

/// A partial update to a patient; `None` leaves the field alone.
///
/// Fields that are optional on [`Patient`] use a nested `Option` so a
/// patch can distinguish "leave as is" (`None`), "clear the stored value"
/// (`Some(None)`) and "replace it" (`Some(Some(v))`).
#[derive(Debug, Clone, Default)]
pub struct PatientPatch {
    pub name: Option<NonEmptyText>,
    pub dob: Option<NaiveDate>,
    pub contact: Option<NonEmptyText>,
    pub email: Option<Option<EmailAddress>>,
    pub address: Option<Option<NonEmptyText>>,
    pub emergency_contact: Option<Option<NonEmptyText>>,
    pub health_info: Option<Option<NonEmptyText>>,
    pub blood_type: Option<Option<BloodType>>,
    pub insurance: Option<Option<NonEmptyText>>,
}

// =============================================================================================
// TESTS
// =============================================================================================

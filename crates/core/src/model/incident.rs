//! Incidents: appointments and the treatment attached to them.

use chairside_attachments::Attachment;
use chairside_id::RecordId;
use chairside_types::NonEmptyText;
use chrono::{DateTime, Utc};

/// Where an incident sits in its lifecycle.
///
/// Any transition is allowed; the status records what the practice says
/// happened rather than enforcing a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum IncidentStatus {
    Pending,
    Scheduled,
    Completed,
    Cancelled,
}

impl IncidentStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Pending" => Some(Self::Pending),
            "Scheduled" => Some(Self::Scheduled),
            "Completed" => Some(Self::Completed),
            "Cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl std::fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Pending => "Pending",
            Self::Scheduled => "Scheduled",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

/// A single appointment with its clinical notes, billing and files.
///
/// `cost` only counts towards revenue once the incident is `Completed`.
/// `files` holds already-encoded attachments; encoding happens before a
/// record reaches the store.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: RecordId,
    pub patient_id: RecordId,
    pub title: NonEmptyText,
    pub description: NonEmptyText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<NonEmptyText>,
    pub appointment_date: DateTime<Utc>,
    #[serde(default)]
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment: Option<NonEmptyText>,
    pub status: IncidentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub files: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Incident {
    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Fields a caller supplies when recording an incident.
///
/// A missing `status` defaults to [`IncidentStatus::Pending`]; the id and
/// timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewIncident {
    pub patient_id: RecordId,
    pub title: NonEmptyText,
    pub description: NonEmptyText,
    pub comments: Option<NonEmptyText>,
    pub appointment_date: DateTime<Utc>,
    pub cost: f64,
    pub treatment: Option<NonEmptyText>,
    pub status: Option<IncidentStatus>,
    pub next_date: Option<DateTime<Utc>>,
    pub files: Vec<Attachment>,
}

/// A partial update to an incident; `None` leaves the field alone.
///
/// As with [`crate::model::PatientPatch`], fields that are optional on the
/// record use a nested `Option` so `Some(None)` clears the stored value.
/// `files` replaces the whole attachment list when set.
#[derive(Debug, Clone, Default)]
pub struct IncidentPatch {
    pub patient_id: Option<RecordId>,
    pub title: Option<NonEmptyText>,
    pub description: Option<NonEmptyText>,
    pub comments: Option<Option<NonEmptyText>>,
    pub appointment_date: Option<DateTime<Utc>>,
    pub cost: Option<f64>,
    pub treatment: Option<Option<NonEmptyText>>,
    pub status: Option<IncidentStatus>,
    pub next_date: Option<Option<DateTime<Utc>>>,
    pub files: Option<Vec<Attachment>>,
}

// =============================================================================================
// TESTS
// =============================================================================================

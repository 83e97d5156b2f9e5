//! Record types held by the stores.
//!
//! These are the concrete shapes that persist in the storage slots,
//! independent of how callers collect or display them.

pub mod identity;
pub mod incident;
pub mod patient;

pub use identity::{Identity, Role};
pub use incident::{Incident, IncidentPatch, IncidentStatus, NewIncident};
pub use patient::{BloodType, NewPatient, Patient, PatientPatch};

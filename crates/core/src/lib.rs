//! # Chairside core
//!
//! The data and state layer for a small dental practice: a compiled-in
//! sign-in roster, patient records, incidents (appointments with their
//! clinical notes, billing and attached files) and the dashboard figures
//! derived from them, persisted as whole-value JSON slots under one data
//! directory.
//!
//! ## Shape of the crate
//!
//! - [`StoreConfig`] settles the data directory once at startup.
//! - [`SessionStore`] signs accounts in and out against the fixed roster.
//! - [`DomainStore`] owns patients and incidents, seeds a first run and
//!   serves every derived figure.
//! - [`validation`] turns raw form text into the typed shapes the stores
//!   take; the stores themselves trust their inputs.
//!
//! Nothing here listens on a network or reads environment variables. A
//! caller builds the config, opens the stores and drives them directly.

pub mod config;
pub mod constants;
pub mod error;
pub mod model;
pub mod seed;
pub mod storage;
pub mod store;
pub mod validation;

pub use chairside_attachments::{Attachment, AttachmentError, AttachmentService};
pub use chairside_id::{IdError, RecordId, RecordIdGenerator, RecordKind};
pub use chairside_types::{EmailAddress, NonEmptyText, TextError};

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use model::{
    BloodType, Identity, Incident, IncidentPatch, IncidentStatus, NewIncident, NewPatient,
    Patient, PatientPatch, Role,
};
pub use storage::SlotStore;
pub use store::{
    DomainStore, PatientSchedule, PatientStat, PatientSummary, SessionStore, StatusCounts,
};
pub use validation::{
    validate_incident_form, validate_patient_form, Field, IncidentForm, PatientForm,
    ValidationErrors,
};

//! Constants used throughout the clinic core crate.
//!
//! This module contains the slot names and query limits so they stay
//! consistent across the stores and make maintenance easier.

/// Storage slot holding the full patient roster.
pub const PATIENTS_SLOT: &str = "patients";

/// Storage slot holding every incident, across all patients.
pub const INCIDENTS_SLOT: &str = "incidents";

/// Storage slot holding the signed-in identity, when there is one.
pub const SESSION_SLOT: &str = "user";

/// How many upcoming appointments a dashboard listing shows when the
/// caller does not ask for a specific count.
pub const DEFAULT_UPCOMING_LIMIT: usize = 10;

/// How many patients the activity ranking keeps when the caller does
/// not ask for a specific count.
pub const TOP_PATIENTS_LIMIT: usize = 5;

/// Name shown for an incident whose patient is no longer on the books.
pub const UNKNOWN_PATIENT_LABEL: &str = "Unknown Patient";

//! The session and domain stores.
//!
//! Both stores keep their working set in memory and write the affected
//! storage slot back in full after every mutation.

pub mod domain;
pub mod session;

pub use domain::{DomainStore, PatientSchedule, PatientStat, PatientSummary, StatusCounts};
pub use session::SessionStore;

//! The practice's working records and the figures derived from them.
//!
//! The domain store owns the patient and incident collections. Reads are
//! served from memory; every mutation rewrites the affected storage slot
//! in full. A store opened over an empty data directory starts from the
//! seeded practice.

use crate::config::StoreConfig;
use crate::constants::{
    DEFAULT_UPCOMING_LIMIT, INCIDENTS_SLOT, PATIENTS_SLOT, TOP_PATIENTS_LIMIT,
    UNKNOWN_PATIENT_LABEL,
};
use crate::model::{
    Incident, IncidentPatch, IncidentStatus, NewIncident, NewPatient, Patient, PatientPatch,
};
use crate::seed;
use crate::storage::SlotStore;
use crate::StoreResult;
use chairside_id::{RecordId, RecordIdGenerator, RecordKind};
use chairside_types::NonEmptyText;
use chrono::{Datelike, NaiveDate, Utc};
use std::sync::Arc;

/// Appointment activity for one patient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientStat {
    pub patient_id: RecordId,
    pub name: NonEmptyText,
    pub appointments: usize,
}

/// Incident counts by status. Every status is present, even at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: usize,
    pub scheduled: usize,
    pub completed: usize,
    pub cancelled: usize,
}

/// One patient's appointments split around "now".
#[derive(Debug)]
pub struct PatientSchedule<'a> {
    /// Strictly after now, soonest first.
    pub upcoming: Vec<&'a Incident>,
    /// At or before now, most recent first.
    pub past: Vec<&'a Incident>,
}

/// Headline figures for one patient.
#[derive(Debug, Clone, PartialEq)]
pub struct PatientSummary {
    pub total_appointments: usize,
    pub completed_appointments: usize,
    pub pending_appointments: usize,
    /// Takings over this patient's completed incidents.
    pub total_spent: f64,
}

/// Patients, incidents and everything computed from them.
#[derive(Debug)]
pub struct DomainStore {
    slots: SlotStore,
    ids: RecordIdGenerator,
    patients: Vec<Patient>,
    incidents: Vec<Incident>,
}

impl DomainStore {
    /// Open the store, seeding any absent slot.
    ///
    /// Each domain slot is loaded on its own; one that is missing falls
    /// back to its seed collection, which is persisted straight away. A
    /// slot that is present, even holding an empty collection, is taken
    /// as is.
    pub fn open(cfg: Arc<StoreConfig>) -> StoreResult<Self> {
        let slots = SlotStore::new(cfg);

        let patients = match slots.load(PATIENTS_SLOT) {
            Some(patients) => patients,
            None => {
                tracing::debug!("patients slot absent; writing seed patients");
                let patients = seed::patients();
                slots.save(PATIENTS_SLOT, &patients)?;
                patients
            }
        };

        let incidents = match slots.load(INCIDENTS_SLOT) {
            Some(incidents) => incidents,
            None => {
                tracing::debug!("incidents slot absent; writing seed incidents");
                let incidents = seed::incidents();
                slots.save(INCIDENTS_SLOT, &incidents)?;
                incidents
            }
        };

        // Catch the generator up with every id already on disk so new
        // records always sort after existing ones.
        let mut ids = RecordIdGenerator::new();
        for patient in &patients {
            ids.observe(&patient.id);
        }
        for incident in &incidents {
            ids.observe(&incident.id);
            for file in &incident.files {
                ids.observe(&file.id);
            }
        }

        Ok(Self {
            slots,
            ids,
            patients,
            incidents,
        })
    }

    // =========================================================================================
    // PATIENTS
    // =========================================================================================

    /// Register a patient, assigning its id and audit stamps.
    pub fn add_patient(&mut self, new: NewPatient) -> StoreResult<&Patient> {
        let now = Utc::now();
        let patient = Patient {
            id: self.ids.next(RecordKind::Patient),
            name: new.name,
            dob: new.dob,
            contact: new.contact,
            email: new.email,
            address: new.address,
            emergency_contact: new.emergency_contact,
            health_info: new.health_info,
            blood_type: new.blood_type,
            insurance: new.insurance,
            created_at: now,
            updated_at: now,
        };

        self.patients.push(patient);
        self.persist_patients()?;
        Ok(self.patients.last().expect("patient was just appended"))
    }

    /// Amend a patient. An unknown id changes nothing and returns `Ok(None)`.
    pub fn update_patient(
        &mut self,
        id: &RecordId,
        patch: PatientPatch,
    ) -> StoreResult<Option<&Patient>> {
        let Some(index) = self.patients.iter().position(|p| &p.id == id) else {
            tracing::debug!("update for unknown patient: {}", id);
            return Ok(None);
        };

        let patient = &mut self.patients[index];
        if let Some(name) = patch.name {
            patient.name = name;
        }
        if let Some(dob) = patch.dob {
            patient.dob = dob;
        }
        if let Some(contact) = patch.contact {
            patient.contact = contact;
        }
        if let Some(email) = patch.email {
            patient.email = email;
        }
        if let Some(address) = patch.address {
            patient.address = address;
        }
        if let Some(emergency_contact) = patch.emergency_contact {
            patient.emergency_contact = emergency_contact;
        }
        if let Some(health_info) = patch.health_info {
            patient.health_info = health_info;
        }
        if let Some(blood_type) = patch.blood_type {
            patient.blood_type = blood_type;
        }
        if let Some(insurance) = patch.insurance {
            patient.insurance = insurance;
        }
        patient.touch();

        self.persist_patients()?;
        Ok(self.patients.get(index))
    }

    /// Remove a patient and every incident recorded against them.
    ///
    /// Returns how many incidents went with the patient. An unknown id
    /// removes nothing and touches no slot.
    pub fn delete_patient(&mut self, id: &RecordId) -> StoreResult<usize> {
        let patients_before = self.patients.len();
        self.patients.retain(|p| &p.id != id);
        if self.patients.len() == patients_before {
            tracing::debug!("delete for unknown patient: {}", id);
            return Ok(0);
        }

        let incidents_before = self.incidents.len();
        self.incidents.retain(|i| &i.patient_id != id);
        let removed = incidents_before - self.incidents.len();

        self.persist_patients()?;
        self.persist_incidents()?;
        Ok(removed)
    }

    // =========================================================================================
    // INCIDENTS
    // =========================================================================================

    /// Record an incident, assigning its id and audit stamps.
    ///
    /// A missing status defaults to [`IncidentStatus::Pending`].
    pub fn add_incident(&mut self, new: NewIncident) -> StoreResult<&Incident> {
        let now = Utc::now();
        let incident = Incident {
            id: self.ids.next(RecordKind::Incident),
            patient_id: new.patient_id,
            title: new.title,
            description: new.description,
            comments: new.comments,
            appointment_date: new.appointment_date,
            cost: new.cost,
            treatment: new.treatment,
            status: new.status.unwrap_or(IncidentStatus::Pending),
            next_date: new.next_date,
            files: new.files,
            created_at: now,
            updated_at: now,
        };

        self.incidents.push(incident);
        self.persist_incidents()?;
        Ok(self.incidents.last().expect("incident was just appended"))
    }

    /// Amend an incident. An unknown id changes nothing and returns `Ok(None)`.
    pub fn update_incident(
        &mut self,
        id: &RecordId,
        patch: IncidentPatch,
    ) -> StoreResult<Option<&Incident>> {
        let Some(index) = self.incidents.iter().position(|i| &i.id == id) else {
            tracing::debug!("update for unknown incident: {}", id);
            return Ok(None);
        };

        let incident = &mut self.incidents[index];
        if let Some(patient_id) = patch.patient_id {
            incident.patient_id = patient_id;
        }
        if let Some(title) = patch.title {
            incident.title = title;
        }
        if let Some(description) = patch.description {
            incident.description = description;
        }
        if let Some(comments) = patch.comments {
            incident.comments = comments;
        }
        if let Some(appointment_date) = patch.appointment_date {
            incident.appointment_date = appointment_date;
        }
        if let Some(cost) = patch.cost {
            incident.cost = cost;
        }
        if let Some(treatment) = patch.treatment {
            incident.treatment = treatment;
        }
        if let Some(status) = patch.status {
            incident.status = status;
        }
        if let Some(next_date) = patch.next_date {
            incident.next_date = next_date;
        }
        if let Some(files) = patch.files {
            incident.files = files;
        }
        incident.touch();

        self.persist_incidents()?;
        Ok(self.incidents.get(index))
    }

    /// Remove one incident. Returns whether anything was removed.
    pub fn delete_incident(&mut self, id: &RecordId) -> StoreResult<bool> {
        let before = self.incidents.len();
        self.incidents.retain(|i| &i.id != id);
        if self.incidents.len() == before {
            tracing::debug!("delete for unknown incident: {}", id);
            return Ok(false);
        }

        self.persist_incidents()?;
        Ok(true)
    }

    // =========================================================================================
    // READ ACCESS
    // =========================================================================================

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    pub fn patient(&self, id: &RecordId) -> Option<&Patient> {
        self.patients.iter().find(|p| &p.id == id)
    }

    pub fn incident(&self, id: &RecordId) -> Option<&Incident> {
        self.incidents.iter().find(|i| &i.id == id)
    }

    /// Every incident recorded against one patient, in stored order.
    pub fn patient_incidents(&self, id: &RecordId) -> Vec<&Incident> {
        self.incidents
            .iter()
            .filter(|i| &i.patient_id == id)
            .collect()
    }

    /// Incidents currently in one status, in stored order.
    pub fn incidents_with_status(&self, status: IncidentStatus) -> Vec<&Incident> {
        self.incidents
            .iter()
            .filter(|i| i.status == status)
            .collect()
    }

    /// Patients whose name, email or contact number contains `query`.
    ///
    /// Name and email match case-insensitively; the contact number is
    /// compared as typed.
    pub fn search_patients(&self, query: &str) -> Vec<&Patient> {
        let needle = query.to_lowercase();
        self.patients
            .iter()
            .filter(|p| {
                p.name.as_str().to_lowercase().contains(&needle)
                    || p.email
                        .as_ref()
                        .is_some_and(|e| e.as_str().contains(&needle))
                    || p.contact.as_str().contains(query)
            })
            .collect()
    }

    // =========================================================================================
    // DERIVED FIGURES
    // =========================================================================================

    /// Appointments strictly after now, soonest first.
    ///
    /// Ties keep their stored order. `limit` defaults to
    /// [`DEFAULT_UPCOMING_LIMIT`].
    pub fn upcoming_appointments(&self, limit: Option<usize>) -> Vec<&Incident> {
        let now = Utc::now();
        let mut upcoming: Vec<&Incident> = self
            .incidents
            .iter()
            .filter(|i| i.appointment_date > now)
            .collect();
        upcoming.sort_by_key(|i| i.appointment_date);
        upcoming.truncate(limit.unwrap_or(DEFAULT_UPCOMING_LIMIT));
        upcoming
    }

    /// Takings across every completed incident.
    pub fn total_revenue(&self) -> f64 {
        self.incidents
            .iter()
            .filter(|i| i.status == IncidentStatus::Completed)
            .map(|i| i.cost)
            .sum()
    }

    /// Takings over completed incidents falling in one calendar month.
    pub fn revenue_for_month(&self, year: i32, month: u32) -> f64 {
        self.incidents
            .iter()
            .filter(|i| {
                i.status == IncidentStatus::Completed
                    && i.appointment_date.year() == year
                    && i.appointment_date.month() == month
            })
            .map(|i| i.cost)
            .sum()
    }

    /// Appointment counts per patient, busiest first.
    ///
    /// One entry per patient id appearing in the incidents, counted across
    /// all statuses. Ties keep the order in which a patient id is first
    /// encountered; an id with no matching patient record shows as
    /// [`UNKNOWN_PATIENT_LABEL`].
    pub fn patient_stats(&self) -> Vec<PatientStat> {
        let mut stats: Vec<PatientStat> = Vec::new();
        for incident in &self.incidents {
            match stats
                .iter()
                .position(|s| s.patient_id == incident.patient_id)
            {
                Some(index) => stats[index].appointments += 1,
                None => stats.push(PatientStat {
                    patient_id: incident.patient_id,
                    name: self.display_name(&incident.patient_id),
                    appointments: 1,
                }),
            }
        }
        stats.sort_by(|a, b| b.appointments.cmp(&a.appointments));
        stats
    }

    fn display_name(&self, id: &RecordId) -> NonEmptyText {
        match self.patient(id) {
            Some(patient) => patient.name.clone(),
            None => {
                NonEmptyText::new(UNKNOWN_PATIENT_LABEL).expect("placeholder name is non-empty")
            }
        }
    }

    /// The busiest patients, at most `limit` of them.
    ///
    /// `limit` defaults to [`TOP_PATIENTS_LIMIT`].
    pub fn top_patients(&self, limit: Option<usize>) -> Vec<PatientStat> {
        let mut stats = self.patient_stats();
        stats.truncate(limit.unwrap_or(TOP_PATIENTS_LIMIT));
        stats
    }

    /// Incident counts by status, with all four statuses present.
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for incident in &self.incidents {
            match incident.status {
                IncidentStatus::Pending => counts.pending += 1,
                IncidentStatus::Scheduled => counts.scheduled += 1,
                IncidentStatus::Completed => counts.completed += 1,
                IncidentStatus::Cancelled => counts.cancelled += 1,
            }
        }
        counts
    }

    /// Appointments on one calendar day.
    pub fn appointments_on(&self, day: NaiveDate) -> Vec<&Incident> {
        self.incidents
            .iter()
            .filter(|i| i.appointment_date.date_naive() == day)
            .collect()
    }

    /// Appointments falling in one calendar month.
    pub fn appointments_in_month(&self, year: i32, month: u32) -> Vec<&Incident> {
        self.incidents
            .iter()
            .filter(|i| i.appointment_date.year() == year && i.appointment_date.month() == month)
            .collect()
    }

    /// Appointments between two dates, both ends included.
    pub fn appointments_between(&self, from: NaiveDate, to: NaiveDate) -> Vec<&Incident> {
        self.incidents
            .iter()
            .filter(|i| {
                let day = i.appointment_date.date_naive();
                day >= from && day <= to
            })
            .collect()
    }

    /// One patient's appointments split around now.
    pub fn patient_schedule(&self, id: &RecordId) -> PatientSchedule<'_> {
        let now = Utc::now();
        let mut upcoming = Vec::new();
        let mut past = Vec::new();
        for incident in self.incidents.iter().filter(|i| &i.patient_id == id) {
            if incident.appointment_date > now {
                upcoming.push(incident);
            } else {
                past.push(incident);
            }
        }
        upcoming.sort_by_key(|i| i.appointment_date);
        past.sort_by_key(|i| std::cmp::Reverse(i.appointment_date));
        PatientSchedule { upcoming, past }
    }

    /// Headline figures for one patient, or `None` for an unknown id.
    pub fn patient_summary(&self, id: &RecordId) -> Option<PatientSummary> {
        self.patient(id)?;

        let mut summary = PatientSummary {
            total_appointments: 0,
            completed_appointments: 0,
            pending_appointments: 0,
            total_spent: 0.0,
        };
        for incident in self.incidents.iter().filter(|i| &i.patient_id == id) {
            summary.total_appointments += 1;
            match incident.status {
                IncidentStatus::Completed => {
                    summary.completed_appointments += 1;
                    summary.total_spent += incident.cost;
                }
                IncidentStatus::Pending => summary.pending_appointments += 1,
                IncidentStatus::Scheduled | IncidentStatus::Cancelled => {}
            }
        }
        Some(summary)
    }

    // =========================================================================================
    // PERSISTENCE
    // =========================================================================================

    fn persist_patients(&self) -> StoreResult<()> {
        self.slots.save(PATIENTS_SLOT, &self.patients)
    }

    fn persist_incidents(&self) -> StoreResult<()> {
        self.slots.save(INCIDENTS_SLOT, &self.incidents)
    }
}

// =============================================================================================
// TESTS
// =============================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};
    use tempfile::TempDir;

    fn open_store(tmp: &TempDir) -> DomainStore {
        let cfg = StoreConfig::new(tmp.path().to_path_buf()).expect("Failed to create config");
        DomainStore::open(Arc::new(cfg)).expect("Failed to open store")
    }

    fn rid(raw: &str) -> RecordId {
        raw.parse().expect("Failed to parse record id")
    }

    fn text(value: &str) -> NonEmptyText {
        NonEmptyText::new(value).expect("Failed to create text")
    }

    fn new_patient(name: &str) -> NewPatient {
        NewPatient {
            name: text(name),
            dob: NaiveDate::from_ymd_opt(1980, 1, 1).expect("Failed to build date"),
            contact: text("5550001111"),
            email: None,
            address: None,
            emergency_contact: None,
            health_info: Some(text("Nothing of note")),
            blood_type: None,
            insurance: None,
        }
    }

    fn new_incident(patient: RecordId, title: &str, when: DateTime<Utc>) -> NewIncident {
        NewIncident {
            patient_id: patient,
            title: text(title),
            description: text("A routine appointment"),
            comments: None,
            appointment_date: when,
            cost: 0.0,
            treatment: None,
            status: None,
            next_date: None,
            files: Vec::new(),
        }
    }

    #[test]
    fn test_fresh_store_seeds_practice() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let store = open_store(&tmp);

        assert_eq!(store.patients().len(), 3);
        assert_eq!(store.incidents().len(), 5);
        assert!(tmp.path().join("patients.json").is_file());
        assert!(tmp.path().join("incidents.json").is_file());
    }

    #[test]
    fn test_seed_revenue_totals_completed_work() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let store = open_store(&tmp);

        // i1 (120) + i2 (185); pending and scheduled work does not count.
        assert_eq!(store.total_revenue(), 305.0);
    }

    #[test]
    fn test_seed_status_histogram() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let store = open_store(&tmp);

        let counts = store.status_counts();
        assert_eq!(counts.completed, 2);
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.scheduled, 2);
        assert_eq!(counts.cancelled, 0);
    }

    #[test]
    fn test_deleting_patient_cascades_to_incidents() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&tmp);

        let removed = store.delete_patient(&rid("p1")).expect("Failed to delete");

        // John Doe had the cleaning (i1) and the crown consultation (i3).
        assert_eq!(removed, 2);
        assert_eq!(store.patients().len(), 2);
        assert!(store.incident(&rid("i1")).is_none());
        assert!(store.incident(&rid("i3")).is_none());
        assert_eq!(store.total_revenue(), 185.0);
    }

    #[test]
    fn test_cascade_survives_reopen() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        {
            let mut store = open_store(&tmp);
            store.delete_patient(&rid("p1")).expect("Failed to delete");
        }

        let reopened = open_store(&tmp);
        assert_eq!(reopened.patients().len(), 2);
        assert_eq!(reopened.incidents().len(), 3);
        assert!(reopened.patient(&rid("p1")).is_none());
    }

    #[test]
    fn test_unknown_ids_are_quiet_noops() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&tmp);
        let ghost = rid("p999999");

        let updated = store
            .update_patient(&ghost, PatientPatch::default())
            .expect("Update should not fail");
        assert!(updated.is_none());

        assert_eq!(store.delete_patient(&ghost).expect("Delete should not fail"), 0);
        assert!(!store
            .delete_incident(&rid("i999999"))
            .expect("Delete should not fail"));

        assert_eq!(store.patients().len(), 3);
        assert_eq!(store.incidents().len(), 5);
    }

    #[test]
    fn test_add_patient_assigns_id_and_stamps() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&tmp);

        let added = store
            .add_patient(new_patient("Alice Green"))
            .expect("Failed to add patient");

        assert_eq!(added.id.kind(), RecordKind::Patient);
        assert_eq!(added.created_at, added.updated_at);
        let added_id = added.id;
        assert!(store.patient(&added_id).is_some());
    }

    #[test]
    fn test_update_patient_applies_patch() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&tmp);

        let patch = PatientPatch {
            name: Some(text("Johnathan Doe")),
            health_info: Some(None),
            insurance: Some(None),
            ..PatientPatch::default()
        };
        let updated = store
            .update_patient(&rid("p1"), patch)
            .expect("Update should not fail")
            .expect("p1 should exist");

        assert_eq!(updated.name.as_str(), "Johnathan Doe");
        assert!(updated.insurance.is_none(), "Some(None) clears the field");
        assert!(updated.health_info.is_none());
        // Untouched fields survive.
        assert_eq!(updated.contact.as_str(), "1234567890");
        assert!(updated.updated_at > updated.created_at);
    }

    #[test]
    fn test_add_incident_defaults_to_pending() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&tmp);

        let added = store
            .add_incident(new_incident(rid("p2"), "Polish", Utc::now()))
            .expect("Failed to add incident");

        assert_eq!(added.status, IncidentStatus::Pending);
        assert_eq!(added.cost, 0.0);
        assert_eq!(added.id.kind(), RecordKind::Incident);
    }

    #[test]
    fn test_update_incident_moves_status_freely() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&tmp);

        // Completed back to Pending is allowed; the status records what the
        // practice says happened.
        let patch = IncidentPatch {
            status: Some(IncidentStatus::Pending),
            cost: Some(140.0),
            comments: Some(None),
            ..IncidentPatch::default()
        };
        let updated = store
            .update_incident(&rid("i1"), patch)
            .expect("Update should not fail")
            .expect("i1 should exist");

        assert_eq!(updated.status, IncidentStatus::Pending);
        assert_eq!(updated.cost, 140.0);
        assert!(updated.comments.is_none());
        assert_eq!(store.total_revenue(), 185.0);
    }

    #[test]
    fn test_store_accepts_inverted_next_date() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&tmp);

        // Ordering is a form concern; records arriving here are stored as-is.
        let mut incident = new_incident(rid("p3"), "Review", Utc::now());
        incident.next_date = Some(incident.appointment_date - Duration::days(7));

        let added = store.add_incident(incident).expect("Failed to add incident");
        assert!(added.next_date.expect("next date is set") < added.appointment_date);
    }

    #[test]
    fn test_upcoming_orders_and_caps() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&tmp);
        let base = Utc::now();

        store
            .add_incident(new_incident(rid("p1"), "Third", base + Duration::days(30)))
            .expect("Failed to add incident");
        store
            .add_incident(new_incident(rid("p2"), "First", base + Duration::days(3)))
            .expect("Failed to add incident");
        store
            .add_incident(new_incident(rid("p3"), "Second", base + Duration::days(10)))
            .expect("Failed to add incident");
        store
            .add_incident(new_incident(rid("p1"), "Long gone", base - Duration::days(3)))
            .expect("Failed to add incident");

        let upcoming = store.upcoming_appointments(None);
        let titles: Vec<&str> = upcoming.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);

        let capped = store.upcoming_appointments(Some(2));
        assert_eq!(capped.len(), 2);
        assert_eq!(capped[0].title.as_str(), "First");
    }

    #[test]
    fn test_upcoming_keeps_stored_order_for_ties() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&tmp);
        let slot = Utc::now() + Duration::days(5);

        store
            .add_incident(new_incident(rid("p1"), "Booked first", slot))
            .expect("Failed to add incident");
        store
            .add_incident(new_incident(rid("p2"), "Booked second", slot))
            .expect("Failed to add incident");

        let upcoming = store.upcoming_appointments(None);
        let titles: Vec<&str> = upcoming.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Booked first", "Booked second"]);
    }

    #[test]
    fn test_collections_round_trip_across_reopen() {
        let tmp = TempDir::new().expect("Failed to create temp dir");

        let (expected_patients, expected_incidents) = {
            let mut store = open_store(&tmp);
            store
                .add_patient(new_patient("Alice Green"))
                .expect("Failed to add patient");
            let alice = store.patients().last().expect("patient was added").id;
            store
                .add_incident(new_incident(alice, "First visit", Utc::now()))
                .expect("Failed to add incident");
            (store.patients().to_vec(), store.incidents().to_vec())
        };

        let reopened = open_store(&tmp);
        assert_eq!(reopened.patients(), expected_patients.as_slice());
        assert_eq!(reopened.incidents(), expected_incidents.as_slice());
    }

    #[test]
    fn test_ids_stay_monotonic_across_reopen() {
        let tmp = TempDir::new().expect("Failed to create temp dir");

        let first_id = {
            let mut store = open_store(&tmp);
            store
                .add_patient(new_patient("Alice Green"))
                .expect("Failed to add patient")
                .id
        };

        let mut reopened = open_store(&tmp);
        let second_id = reopened
            .add_patient(new_patient("Bob White"))
            .expect("Failed to add patient")
            .id;

        assert!(second_id.value() > first_id.value());
    }

    #[test]
    fn test_absent_slot_is_reseeded_on_its_own() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        {
            let _ = open_store(&tmp);
        }
        std::fs::remove_file(tmp.path().join("patients.json")).expect("Failed to remove slot");

        let store = open_store(&tmp);

        // Each slot falls back to its seed collection independently, and
        // the reseeded slot lands back on disk.
        assert_eq!(store.patients().len(), 3);
        assert_eq!(store.incidents().len(), 5);
        assert!(tmp.path().join("patients.json").is_file());
    }

    #[test]
    fn test_present_empty_slot_is_not_reseeded() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&tmp);
        for id in ["p1", "p2", "p3"] {
            store.delete_patient(&rid(id)).expect("Failed to delete");
        }

        // An emptied collection is a present slot, not a first run.
        let reopened = open_store(&tmp);
        assert!(reopened.patients().is_empty());
        assert!(reopened.incidents().is_empty());
    }

    #[test]
    fn test_sparse_stored_rows_load_intact() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let patients_json = r#"[{
            "id": "p7",
            "name": "Old Row",
            "dob": "1970-01-01",
            "contact": "5550000000",
            "createdAt": "2025-06-15T09:00:00Z",
            "updatedAt": "2025-06-15T09:00:00Z"
        }]"#;
        std::fs::write(tmp.path().join("patients.json"), patients_json)
            .expect("Failed to write slot");
        std::fs::write(tmp.path().join("incidents.json"), "[]").expect("Failed to write slot");

        // A row carrying only the identity fields is valid, not corrupt.
        let store = open_store(&tmp);
        assert_eq!(store.patients().len(), 1);
        assert!(store.patients()[0].health_info.is_none());
        assert!(tmp.path().join("patients.json").is_file());
    }

    #[test]
    fn test_calendar_day_and_range_queries() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let store = open_store(&tmp);

        let cleaning_day =
            NaiveDate::from_ymd_opt(2025, 7, 2).expect("Failed to build date");
        let on_day = store.appointments_on(cleaning_day);
        assert_eq!(on_day.len(), 1);
        assert_eq!(on_day[0].id, rid("i1"));

        assert_eq!(store.appointments_in_month(2025, 7).len(), 5);
        assert!(store.appointments_in_month(2025, 8).is_empty());

        let from = NaiveDate::from_ymd_opt(2025, 7, 3).expect("Failed to build date");
        let to = NaiveDate::from_ymd_opt(2025, 7, 8).expect("Failed to build date");
        let in_week: Vec<RecordId> = store
            .appointments_between(from, to)
            .iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(in_week, vec![rid("i2"), rid("i3"), rid("i4")]);
    }

    #[test]
    fn test_monthly_revenue_only_counts_that_month() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let store = open_store(&tmp);

        assert_eq!(store.revenue_for_month(2025, 7), 305.0);
        assert_eq!(store.revenue_for_month(2025, 8), 0.0);
    }

    #[test]
    fn test_patient_stats_rank_by_activity() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let store = open_store(&tmp);

        let stats = store.patient_stats();

        // p1 and p2 both have two incidents; the tie keeps the order their
        // ids are first met in the incidents.
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].patient_id, rid("p1"));
        assert_eq!(stats[0].appointments, 2);
        assert_eq!(stats[1].patient_id, rid("p2"));
        assert_eq!(stats[1].appointments, 2);
        assert_eq!(stats[2].patient_id, rid("p3"));
        assert_eq!(stats[2].appointments, 1);

        assert_eq!(store.top_patients(Some(2)).len(), 2);
    }

    #[test]
    fn test_patient_stats_skip_patients_without_incidents() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&tmp);

        store
            .add_patient(new_patient("Alice Green"))
            .expect("Failed to add patient");

        // Only ids appearing in the incidents get an entry; a patient with
        // nothing booked stays out of the ranking.
        let stats = store.patient_stats();
        assert_eq!(stats.len(), 3);
        assert!(stats.iter().all(|s| s.appointments > 0));
        assert!(stats.iter().all(|s| s.name.as_str() != "Alice Green"));
    }

    #[test]
    fn test_patient_stats_name_orphaned_incidents() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&tmp);
        let ghost = rid("p424242");

        // Reassigning i4 leaves p3 with nothing booked and the unknown id
        // with one incident.
        let patch = IncidentPatch {
            patient_id: Some(ghost),
            ..IncidentPatch::default()
        };
        store
            .update_incident(&rid("i4"), patch)
            .expect("Update should not fail");

        let stats = store.patient_stats();
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[2].patient_id, ghost);
        assert_eq!(stats[2].name.as_str(), "Unknown Patient");
        assert_eq!(stats[2].appointments, 1);
        assert!(stats.iter().all(|s| s.patient_id != rid("p3")));
    }

    #[test]
    fn test_patient_schedule_splits_around_now() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let mut store = open_store(&tmp);

        store
            .add_incident(new_incident(
                rid("p1"),
                "Next year's checkup",
                Utc::now() + Duration::days(365),
            ))
            .expect("Failed to add incident");

        let schedule = store.patient_schedule(&rid("p1"));

        assert_eq!(schedule.upcoming.len(), 1);
        assert_eq!(schedule.upcoming[0].title.as_str(), "Next year's checkup");
        // Seeded visits are behind us, most recent first.
        let past: Vec<RecordId> = schedule.past.iter().map(|i| i.id).collect();
        assert_eq!(past, vec![rid("i3"), rid("i1")]);
    }

    #[test]
    fn test_patient_summary_counts_and_spend() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let store = open_store(&tmp);

        let summary = store
            .patient_summary(&rid("p1"))
            .expect("p1 should have a summary");
        assert_eq!(summary.total_appointments, 2);
        assert_eq!(summary.completed_appointments, 1);
        assert_eq!(summary.pending_appointments, 1);
        assert_eq!(summary.total_spent, 120.0);

        assert!(store.patient_summary(&rid("p424242")).is_none());
    }

    #[test]
    fn test_incident_filters() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let store = open_store(&tmp);

        let scheduled = store.incidents_with_status(IncidentStatus::Scheduled);
        let ids: Vec<RecordId> = scheduled.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![rid("i4"), rid("i5")]);

        assert_eq!(store.patient_incidents(&rid("p2")).len(), 2);
        assert!(store.patient_incidents(&rid("p424242")).is_empty());
    }

    #[test]
    fn test_search_matches_name_email_and_contact() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let store = open_store(&tmp);

        let by_name = store.search_patients("JOHN");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id, rid("p1"));

        // Every seeded address is at entnt.in.
        assert_eq!(store.search_patients("ENTNT").len(), 3);

        // Contact numbers match as typed.
        let by_contact = store.search_patients("789012");
        assert_eq!(by_contact.len(), 1);
        assert_eq!(by_contact[0].id, rid("p3"));

        assert!(store.search_patients("zzz").is_empty());
    }
}

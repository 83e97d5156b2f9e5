//! First-run dataset.
//!
//! A domain slot that is absent on disk starts from its slice of this
//! fixed practice: three patients and five incidents spanning completed,
//! pending and scheduled work, so dashboards have something to show
//! straight away. The records carry a fixed stamp rather than the wall
//! clock, keeping a fresh store byte-for-byte reproducible.

use crate::model::{BloodType, Incident, IncidentStatus, Patient};
use chairside_attachments::Attachment;
use chairside_id::RecordId;
use chairside_types::{EmailAddress, NonEmptyText};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Moment stamped on every seeded record.
const SEED_STAMP: &str = "2025-06-15T09:00:00";

const SEED_REPORT_URI: &str = "data:application/pdf;base64,JVBERi0xLjQKJdPr6eEKMSAwIG9iago8PAovVHlwZSAvQ2F0YWxvZwovUGFnZXMgMiAwIFIKPj4KZW5kb2JqCjIgMCBvYmoKPDwKL1R5cGUgL1BhZ2VzCi9LaWRzIFszIDAgUl0KL0NvdW50IDEKPD4KZW5kb2JqCjMgMCBvYmoKPDwKL1R5cGUgL1BhZ2UKL1BhcmVudCAyIDAgUgovTWVkaWFCb3ggWzAgMCA2MTIgNzkyXQovUmVzb3VyY2VzIDw8Ci9Gb250IDw8Ci9GMSAxMCAwIFIKPj4KPj4KL0NvbnRlbnRzIDQgMCBSCj4+CmVuZG9iago=";

fn text(value: &str) -> NonEmptyText {
    NonEmptyText::new(value).expect("seed text is non-empty")
}

fn email(value: &str) -> EmailAddress {
    EmailAddress::new(value).expect("seed email is well-formed")
}

fn id(value: &str) -> RecordId {
    value.parse().expect("seed id is canonical")
}

fn date(value: &str) -> NaiveDate {
    value.parse().expect("seed date is well-formed")
}

// Seeded datetimes are wall-clock values without an offset; treat them as UTC.
fn instant(value: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .expect("seed datetime is well-formed")
        .and_utc()
}

/// Build the patients a fresh slot starts with.
pub fn patients() -> Vec<Patient> {
    let stamp = instant(SEED_STAMP);

    vec![
        Patient {
            id: id("p1"),
            name: text("John Doe"),
            dob: date("1990-05-10"),
            contact: text("1234567890"),
            email: Some(email("john@entnt.in")),
            address: Some(text("123 Main St, City, State 12345")),
            emergency_contact: Some(text("Jane Doe - 0987654321")),
            health_info: Some(text("No allergies, regular checkups needed")),
            blood_type: Some(BloodType::OPositive),
            insurance: Some(text("Delta Dental Plus")),
            created_at: stamp,
            updated_at: stamp,
        },
        Patient {
            id: id("p2"),
            name: text("Jane Smith"),
            dob: date("1985-08-15"),
            contact: text("2345678901"),
            email: Some(email("jane@entnt.in")),
            address: Some(text("456 Oak Ave, City, State 12345")),
            emergency_contact: Some(text("Bob Smith - 1122334455")),
            health_info: Some(text("Allergic to penicillin, sensitive to cold")),
            blood_type: Some(BloodType::APositive),
            insurance: Some(text("MetLife Dental")),
            created_at: stamp,
            updated_at: stamp,
        },
        Patient {
            id: id("p3"),
            name: text("Mike Wilson"),
            dob: date("1992-12-03"),
            contact: text("3456789012"),
            email: Some(email("mike@entnt.in")),
            address: Some(text("789 Pine Rd, City, State 12345")),
            emergency_contact: Some(text("Lisa Wilson - 2233445566")),
            health_info: Some(text("Previous orthodontic treatment, no known allergies")),
            blood_type: Some(BloodType::BNegative),
            insurance: Some(text("Guardian Dental")),
            created_at: stamp,
            updated_at: stamp,
        },
    ]
}

/// Build the incidents a fresh slot starts with.
pub fn incidents() -> Vec<Incident> {
    let stamp = instant(SEED_STAMP);

    let cleaning_report = Attachment {
        id: id("f1"),
        name: text("cleaning_report.pdf"),
        content_type: text("application/pdf"),
        size_bytes: 1024,
        url: text(SEED_REPORT_URI),
        uploaded_at: stamp,
    };

    vec![
        Incident {
            id: id("i1"),
            patient_id: id("p1"),
            title: text("Routine Cleaning"),
            description: text("Regular dental cleaning and checkup"),
            comments: Some(text("Patient maintains good oral hygiene")),
            appointment_date: instant("2025-07-02T10:00:00"),
            cost: 120.0,
            treatment: Some(text("Professional cleaning, fluoride treatment")),
            status: IncidentStatus::Completed,
            next_date: Some(instant("2026-01-02T10:00:00")),
            files: vec![cleaning_report],
            created_at: stamp,
            updated_at: stamp,
        },
        Incident {
            id: id("i2"),
            patient_id: id("p2"),
            title: text("Cavity Filling"),
            description: text("Small cavity in upper left molar"),
            comments: Some(text("Patient experienced mild sensitivity")),
            appointment_date: instant("2025-07-03T14:30:00"),
            cost: 185.0,
            treatment: Some(text("Composite filling")),
            status: IncidentStatus::Completed,
            next_date: Some(instant("2025-10-03T14:30:00")),
            files: Vec::new(),
            created_at: stamp,
            updated_at: stamp,
        },
        Incident {
            id: id("i3"),
            patient_id: id("p1"),
            title: text("Crown Consultation"),
            description: text("Consultation for crown placement on damaged tooth"),
            comments: Some(text("X-rays show good bone structure")),
            appointment_date: instant("2025-07-05T09:00:00"),
            cost: 0.0,
            treatment: Some(text("Initial consultation and X-rays")),
            status: IncidentStatus::Pending,
            next_date: Some(instant("2025-07-12T09:00:00")),
            files: Vec::new(),
            created_at: stamp,
            updated_at: stamp,
        },
        Incident {
            id: id("i4"),
            patient_id: id("p3"),
            title: text("Wisdom Tooth Extraction"),
            description: text("Impacted wisdom tooth removal"),
            comments: Some(text("Pre-surgical evaluation completed")),
            appointment_date: instant("2025-07-08T11:00:00"),
            cost: 350.0,
            treatment: Some(text("Surgical extraction")),
            status: IncidentStatus::Scheduled,
            next_date: Some(instant("2025-07-15T11:00:00")),
            files: Vec::new(),
            created_at: stamp,
            updated_at: stamp,
        },
        Incident {
            id: id("i5"),
            patient_id: id("p2"),
            title: text("Orthodontic Consultation"),
            description: text("Initial consultation for braces"),
            comments: Some(text("Moderate crowding, good candidate for treatment")),
            appointment_date: instant("2025-07-10T16:00:00"),
            cost: 75.0,
            treatment: Some(text("Consultation and treatment planning")),
            status: IncidentStatus::Scheduled,
            next_date: Some(instant("2025-07-17T16:00:00")),
            files: Vec::new(),
            created_at: stamp,
            updated_at: stamp,
        },
    ]
}

// =============================================================================================
// TESTS
// =============================================================================================

//! Form-level validation.
//!
//! This module turns the loosely-typed text a form collects into the typed
//! shapes the stores take. The stores trust their inputs; every rule lives
//! here, at the boundary, and a submission reports all of its problems at
//! once, keyed by field.

use crate::model::{BloodType, IncidentStatus, NewIncident, NewPatient};
use chairside_attachments::Attachment;
use chairside_id::{RecordId, RecordKind};
use chairside_types::{EmailAddress, NonEmptyText};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt;

/// The form fields a validation message can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Dob,
    Contact,
    Email,
    BloodType,
    PatientId,
    Title,
    Description,
    AppointmentDate,
    Cost,
    Status,
    NextDate,
}

impl Field {
    /// The wire name of the form field, as rendered forms know it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Dob => "dob",
            Field::Contact => "contact",
            Field::Email => "email",
            Field::BloodType => "bloodType",
            Field::PatientId => "patientId",
            Field::Title => "title",
            Field::Description => "description",
            Field::AppointmentDate => "appointmentDate",
            Field::Cost => "cost",
            Field::Status => "status",
            Field::NextDate => "nextDate",
        }
    }
}

/// Everything wrong with a submitted form, keyed by field.
///
/// At most one message per field; the checks are ordered so the first
/// problem found for a field is the one reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(Field, String)>,
}

impl ValidationErrors {
    fn push(&mut self, field: Field, message: &str) {
        self.errors.push((field, message.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The message attached to `field`, if any.
    pub fn message(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, message)| (*f, message.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field.as_str(), message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw text collected by the patient form.
#[derive(Debug, Clone, Default)]
pub struct PatientForm {
    pub name: String,
    pub dob: String,
    pub contact: String,
    pub email: String,
    pub address: String,
    pub emergency_contact: String,
    pub health_info: String,
    pub blood_type: String,
    pub insurance: String,
}

/// Raw text collected by the incident form.
///
/// `files` carries attachments already encoded by the attachment service;
/// file handling finishes before the form is submitted.
#[derive(Debug, Clone, Default)]
pub struct IncidentForm {
    pub patient_id: String,
    pub title: String,
    pub description: String,
    pub comments: String,
    pub appointment_date: String,
    pub cost: String,
    pub treatment: String,
    pub status: String,
    pub next_date: String,
    pub files: Vec<Attachment>,
}

// Forms submit local wall-clock datetimes without an offset, with or
// without seconds; treat them as UTC.
fn parse_form_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Check a patient form, producing the typed shape the store takes.
pub fn validate_patient_form(form: &PatientForm) -> Result<NewPatient, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let name = match NonEmptyText::new(&form.name) {
        Ok(name) => Some(name),
        Err(_) => {
            errors.push(Field::Name, "Name is required");
            None
        }
    };

    let dob = if form.dob.trim().is_empty() {
        errors.push(Field::Dob, "Date of birth is required");
        None
    } else {
        match form.dob.trim().parse::<NaiveDate>() {
            Ok(dob) => Some(dob),
            Err(_) => {
                errors.push(Field::Dob, "Date of birth is not a valid date");
                None
            }
        }
    };

    let contact = match NonEmptyText::new(&form.contact) {
        Ok(contact) => {
            let digits = contact
                .as_str()
                .chars()
                .filter(|c| c.is_ascii_digit())
                .count();
            if digits < 10 {
                errors.push(
                    Field::Contact,
                    "Please enter a valid phone number (at least 10 digits)",
                );
                None
            } else {
                Some(contact)
            }
        }
        Err(_) => {
            errors.push(Field::Contact, "Contact number is required");
            None
        }
    };

    let email = if form.email.trim().is_empty() {
        None
    } else {
        match EmailAddress::new(&form.email) {
            Ok(email) => Some(email),
            Err(_) => {
                errors.push(Field::Email, "Please enter a valid email address");
                None
            }
        }
    };

    let blood_type = if form.blood_type.trim().is_empty() {
        None
    } else {
        match BloodType::parse(&form.blood_type) {
            Some(blood_type) => Some(blood_type),
            None => {
                errors.push(Field::BloodType, "Blood type is not recognised");
                None
            }
        }
    };

    match (name, dob, contact) {
        (Some(name), Some(dob), Some(contact)) if errors.is_empty() => Ok(NewPatient {
            name,
            dob,
            contact,
            email,
            address: NonEmptyText::new(&form.address).ok(),
            emergency_contact: NonEmptyText::new(&form.emergency_contact).ok(),
            health_info: NonEmptyText::new(&form.health_info).ok(),
            blood_type,
            insurance: NonEmptyText::new(&form.insurance).ok(),
        }),
        _ => Err(errors),
    }
}

/// Check an incident form, producing the typed shape the store takes.
pub fn validate_incident_form(form: &IncidentForm) -> Result<NewIncident, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let patient_id = if form.patient_id.trim().is_empty() {
        errors.push(Field::PatientId, "Patient is required");
        None
    } else {
        match form.patient_id.trim().parse::<RecordId>() {
            Ok(id) if id.kind() == RecordKind::Patient => Some(id),
            Ok(_) | Err(_) => {
                errors.push(Field::PatientId, "Patient is not recognised");
                None
            }
        }
    };

    let title = match NonEmptyText::new(&form.title) {
        Ok(title) => {
            if title.as_str().chars().count() < 3 {
                errors.push(Field::Title, "Title must be at least 3 characters");
                None
            } else {
                Some(title)
            }
        }
        Err(_) => {
            errors.push(Field::Title, "Title is required");
            None
        }
    };

    let description = match NonEmptyText::new(&form.description) {
        Ok(description) => {
            if description.as_str().chars().count() < 10 {
                errors.push(Field::Description, "Description must be at least 10 characters");
                None
            } else {
                Some(description)
            }
        }
        Err(_) => {
            errors.push(Field::Description, "Description is required");
            None
        }
    };

    // The parsed value is kept separately so the next-date cross-check can
    // still run when the appointment is unacceptably in the past.
    let mut appointment_date = None;
    let mut parsed_appointment = None;
    if form.appointment_date.trim().is_empty() {
        errors.push(Field::AppointmentDate, "Appointment date is required");
    } else if let Some(when) = parse_form_datetime(&form.appointment_date) {
        parsed_appointment = Some(when);
        if when < Utc::now() {
            errors.push(Field::AppointmentDate, "Appointment date cannot be in the past");
        } else {
            appointment_date = Some(when);
        }
    } else {
        errors.push(Field::AppointmentDate, "Appointment date is not a valid date");
    }

    let cost = if form.cost.trim().is_empty() {
        Some(0.0)
    } else {
        match form.cost.trim().parse::<f64>() {
            Ok(cost) if cost.is_finite() => {
                if cost < 0.0 {
                    errors.push(Field::Cost, "Cost cannot be negative");
                    None
                } else {
                    Some(cost)
                }
            }
            _ => {
                errors.push(Field::Cost, "Cost is not a valid number");
                None
            }
        }
    };

    let status = if form.status.trim().is_empty() {
        None
    } else {
        match IncidentStatus::parse(&form.status) {
            Some(status) => Some(status),
            None => {
                errors.push(Field::Status, "Status is not recognised");
                None
            }
        }
    };

    let next_date = if form.next_date.trim().is_empty() {
        None
    } else if let Some(next) = parse_form_datetime(&form.next_date) {
        if parsed_appointment.is_some_and(|when| next <= when) {
            errors.push(
                Field::NextDate,
                "Next appointment must be after current appointment",
            );
            None
        } else {
            Some(next)
        }
    } else {
        errors.push(Field::NextDate, "Next appointment is not a valid date");
        None
    };

    match (patient_id, title, description, appointment_date, cost) {
        (Some(patient_id), Some(title), Some(description), Some(appointment_date), Some(cost))
            if errors.is_empty() =>
        {
            Ok(NewIncident {
                patient_id,
                title,
                description,
                comments: NonEmptyText::new(&form.comments).ok(),
                appointment_date,
                cost,
                treatment: NonEmptyText::new(&form.treatment).ok(),
                status,
                next_date,
                files: form.files.clone(),
            })
        }
        _ => Err(errors),
    }
}

// =============================================================================================
// TESTS
// =============================================================================================

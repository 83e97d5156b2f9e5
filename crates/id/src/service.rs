//! Internal implementation of record identifier services.
//!
//! This module contains the implementation details for the prefixed,
//! timestamp-based identifiers used throughout the chairside system.

use crate::{IdError, IdResult};
use chrono::Utc;
use std::{fmt, str::FromStr};

/// The kind of record an identifier names.
///
/// Each kind owns a one-letter prefix so that an identifier is
/// self-describing: `p…` is always a patient, `i…` an incident, `f…` a file
/// attachment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// A patient record (`p` prefix).
    Patient,
    /// An incident (appointment/treatment) record (`i` prefix).
    Incident,
    /// A file attachment (`f` prefix).
    Attachment,
}

impl RecordKind {
    /// Returns the one-letter prefix for this kind.
    pub fn prefix(self) -> char {
        match self {
            RecordKind::Patient => 'p',
            RecordKind::Incident => 'i',
            RecordKind::Attachment => 'f',
        }
    }

    /// Returns the kind for a prefix character, if it is a known prefix.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix {
            'p' => Some(RecordKind::Patient),
            'i' => Some(RecordKind::Incident),
            'f' => Some(RecordKind::Attachment),
            _ => None,
        }
    }
}

/// Chairside's canonical record identifier (kind prefix + decimal digits).
///
/// This wrapper type guarantees that once constructed, the contained
/// identifier is in canonical form: a known one-letter kind prefix followed
/// by one or more ASCII digits. The digits are the millisecond Unix timestamp
/// at which the record was created, except for seed fixtures which use small
/// counters (`p1`, `i2`).
///
/// # When to use this type
/// Use this wrapper whenever you are:
/// - Accepting an identifier string from *outside* the core (form input, a
///   persisted slot), or
/// - Minting identifiers for new records via [`RecordIdGenerator`].
///
/// Once you have a `RecordId`, you can safely assume the identifier is valid
/// and of a known kind.
///
/// # Errors
/// [`RecordId::parse`] returns [`IdError::InvalidInput`] if the input is not
/// already canonical.
///
/// # Display format
/// When displayed or converted to string, `RecordId` always produces the
/// canonical `<prefix><digits>` form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordId {
    kind: RecordKind,
    value: u64,
}

impl RecordId {
    /// Validates and parses an identifier string that must already be in
    /// canonical form.
    ///
    /// This does **not** normalise other forms (for example, uppercase
    /// prefixes or surrounding whitespace). Callers must provide the
    /// canonical representation.
    ///
    /// # Arguments
    ///
    /// * `input` - Identifier string to validate and wrap. Must be a known
    ///   kind prefix followed by decimal digits.
    ///
    /// # Returns
    ///
    /// Returns a validated [`RecordId`] on success.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] if `input` is not in canonical form
    /// or its numeric part does not fit in 64 bits.
    pub fn parse(input: &str) -> IdResult<Self> {
        if !Self::is_canonical(input) {
            return Err(IdError::InvalidInput(format!(
                "record id must be a kind prefix followed by decimal digits, got: '{}'",
                input
            )));
        }
        let kind = RecordKind::from_prefix(input.as_bytes()[0] as char)
            .expect("is_canonical guarantees a known prefix");
        let value = input[1..].parse::<u64>().map_err(|_| {
            IdError::InvalidInput(format!("record id number out of range: '{}'", input))
        })?;
        Ok(Self { kind, value })
    }

    /// Returns true if `input` is in chairside's canonical id form.
    ///
    /// This is a purely syntactic check that validates:
    /// - At least two bytes long
    /// - First byte is a known kind prefix
    /// - Every remaining byte is an ASCII decimal digit
    ///
    /// # Arguments
    ///
    /// * `input` - Candidate identifier string to validate.
    ///
    /// # Returns
    ///
    /// Returns `true` if `input` is canonical, otherwise `false`.
    pub fn is_canonical(input: &str) -> bool {
        let bytes = input.as_bytes();
        bytes.len() >= 2
            && RecordKind::from_prefix(bytes[0] as char).is_some()
            && bytes[1..].iter().all(|b| b.is_ascii_digit())
    }

    /// Returns the kind of record this identifier names.
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Returns the numeric component of this identifier.
    pub fn value(&self) -> u64 {
        self.value
    }
}

impl fmt::Display for RecordId {
    /// Formats the identifier in canonical `<prefix><digits>` form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.value)
    }
}

impl FromStr for RecordId {
    type Err = IdError;

    /// Parses a string into a `RecordId`, requiring canonical form.
    ///
    /// This is equivalent to calling [`RecordId::parse`].
    ///
    /// # Errors
    ///
    /// Returns [`IdError::InvalidInput`] if the string is not in canonical
    /// form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordId::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RecordId::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Mints strictly monotonic record identifiers, one sequence per kind.
///
/// The numeric component of a fresh identifier is the current millisecond
/// Unix timestamp. When a second identifier of the same kind is requested
/// within the same millisecond (or the clock steps backwards), the previous
/// value is incremented by one instead, so identifiers of one kind never
/// collide and always sort by creation order.
///
/// Call [`RecordIdGenerator::observe`] with every identifier loaded from
/// storage before minting, so fresh identifiers stay ahead of persisted ones.
#[derive(Debug, Default)]
pub struct RecordIdGenerator {
    last_patient: u64,
    last_incident: u64,
    last_attachment: u64,
}

impl RecordIdGenerator {
    /// Creates a generator with no observed history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an existing identifier so freshly minted ids stay ahead of it.
    ///
    /// Observing an identifier lower than the current high-water mark for its
    /// kind has no effect.
    pub fn observe(&mut self, id: &RecordId) {
        let slot = self.slot(id.kind());
        if id.value() > *slot {
            *slot = id.value();
        }
    }

    /// Mints the next identifier of the given kind.
    ///
    /// The identifier is guaranteed to be strictly greater (numerically) than
    /// every identifier of the same kind previously minted by or observed on
    /// this generator.
    pub fn next(&mut self, kind: RecordKind) -> RecordId {
        let now = Utc::now().timestamp_millis().max(0) as u64;
        let slot = self.slot(kind);
        let value = if now <= *slot { *slot + 1 } else { now };
        *slot = value;
        RecordId { kind, value }
    }

    fn slot(&mut self, kind: RecordKind) -> &mut u64 {
        match kind {
            RecordKind::Patient => &mut self.last_patient,
            RecordKind::Incident => &mut self.last_incident,
            RecordKind::Attachment => &mut self.last_attachment,
        }
    }
}

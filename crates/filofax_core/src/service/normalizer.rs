//! Seed normalization.
//!
//! # Responsibility
//! - Validate loosely typed seed records at the shape level.
//! - Convert seed records into canonical contacts with ids and UI state.
//!
//! # Invariants
//! - Record `i` becomes `contact-{i}` (zero-based, input order).
//! - Every produced contact starts collapsed.
//! - Domain fields are copied verbatim; `keyContacts` keeps input order.
//! - Normalization is pure: no I/O and no logging.

use crate::model::contact::{create_initials, Contact, ContactKind};
use crate::model::seed::{required_fields, SeedDocument, SeedRecord};
use serde::Deserialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACT_ID_PREFIX: &str = "contact-";
const BUNDLED_SEED: &str = include_str!("../../data/prepopulation.json");

pub type SeedResult<T> = Result<T, MalformedSeedError>;

/// Seed input failed shape validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedSeedError {
    /// Seed document is not valid JSON or lacks the `contacts` envelope.
    InvalidDocument(String),
    /// `contacts` is not a sequence.
    NotASequence,
    /// Record at `index` is not a JSON object.
    NotAnObject { index: usize },
    /// Record at `index` has a missing or unrecognized `kind`.
    UnknownKind { index: usize, kind: Option<String> },
    /// Record at `index` lacks a field required by its kind.
    MissingField { index: usize, field: &'static str },
    /// Record at `index` has a field of the wrong type.
    InvalidField { index: usize, message: String },
}

impl Display for MalformedSeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDocument(message) => write!(f, "invalid seed document: {message}"),
            Self::NotASequence => write!(f, "seed contacts must be a sequence"),
            Self::NotAnObject { index } => write!(f, "seed record {index} is not an object"),
            Self::UnknownKind {
                index,
                kind: Some(kind),
            } => write!(f, "seed record {index} has unknown kind `{kind}`"),
            Self::UnknownKind { index, kind: None } => {
                write!(f, "seed record {index} has no string `kind`")
            }
            Self::MissingField { index, field } => {
                write!(f, "seed record {index} is missing required field `{field}`")
            }
            Self::InvalidField { index, message } => {
                write!(f, "seed record {index} is malformed: {message}")
            }
        }
    }
}

impl Error for MalformedSeedError {}

/// Returns the seed document embedded in this build.
pub fn bundled_seed() -> &'static str {
    BUNDLED_SEED
}

/// Parses a `{ "contacts": [...] }` document and normalizes its records.
pub fn parse_seed_document(json: &str) -> SeedResult<Vec<Contact>> {
    let document: SeedDocument = serde_json::from_str(json)
        .map_err(|err| MalformedSeedError::InvalidDocument(err.to_string()))?;
    normalize(&document.contacts)
}

/// Validates and normalizes a loosely typed seed sequence.
///
/// # Errors
/// - `NotASequence` when `seed` is not a JSON array.
/// - Per-record errors carry the zero-based record index.
pub fn normalize(seed: &Value) -> SeedResult<Vec<Contact>> {
    let items = seed.as_array().ok_or(MalformedSeedError::NotASequence)?;
    let records = items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_seed_record(index, item))
        .collect::<SeedResult<Vec<_>>>()?;
    Ok(normalize_records(&records))
}

/// Normalizes already-typed seed records. Cannot fail.
pub fn normalize_records(records: &[SeedRecord]) -> Vec<Contact> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| Contact {
            id: contact_id(index),
            name: record.name.clone(),
            thumbnail: create_initials(&record.name),
            is_expanded: false,
            details: record.details.clone(),
        })
        .collect()
}

/// Identifier assigned to the seed record at `index`.
pub fn contact_id(index: usize) -> String {
    format!("{CONTACT_ID_PREFIX}{index}")
}

fn parse_seed_record(index: usize, item: &Value) -> SeedResult<SeedRecord> {
    let object = item
        .as_object()
        .ok_or(MalformedSeedError::NotAnObject { index })?;

    let kind = match object.get("kind").and_then(Value::as_str) {
        Some(raw) => ContactKind::parse(raw).ok_or_else(|| MalformedSeedError::UnknownKind {
            index,
            kind: Some(raw.to_string()),
        })?,
        None => return Err(MalformedSeedError::UnknownKind { index, kind: None }),
    };

    if let Some(field) = required_fields(kind)
        .iter()
        .copied()
        .find(|field| !object.contains_key(*field))
    {
        return Err(MalformedSeedError::MissingField { index, field });
    }

    SeedRecord::deserialize(item).map_err(|err| MalformedSeedError::InvalidField {
        index,
        message: err.to_string(),
    })
}

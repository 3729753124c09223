//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical `Contact` record and its per-kind details.
//! - Own the initials derivation used for card thumbnails.
//! - Provide the expand/collapse transition for one contact.
//!
//! # Invariants
//! - `id` is stable for the lifetime of a record.
//! - `thumbnail == create_initials(name)` for normalized records.
//! - `is_expanded` is the only field mutated after creation.

use serde::{Deserialize, Serialize};

/// Stable identifier for a contact within one collection.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ContactId = String;

/// Discriminant for the two contact projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    /// A single person.
    Individual,
    /// An organisation with key contacts.
    Company,
}

impl ContactKind {
    /// Wire name used for the `kind` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Company => "company",
        }
    }

    /// Parses a wire `kind` value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "individual" => Some(Self::Individual),
            "company" => Some(Self::Company),
            _ => None,
        }
    }
}

/// Person attached to a company card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyContact {
    pub name: String,
    pub email_address: String,
}

/// Fields carried only by individual contacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualDetails {
    pub phone_number: String,
    pub title: String,
    pub email_address: String,
    pub address: String,
    pub website: String,
}

/// Fields carried only by company contacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetails {
    pub phone_number: String,
    pub industry: String,
    pub email_address: String,
    pub address: String,
    pub website: String,
    /// Display order is significant.
    pub key_contacts: Vec<KeyContact>,
}

/// Kind-specific payload, tagged by `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContactDetails {
    Individual(IndividualDetails),
    Company(CompanyDetails),
}

impl ContactDetails {
    /// Returns the discriminant for this payload.
    pub fn kind(&self) -> ContactKind {
        match self {
            Self::Individual(_) => ContactKind::Individual,
            Self::Company(_) => ContactKind::Company,
        }
    }

    /// Card subtitle: job title for people, industry for companies.
    pub fn subtitle(&self) -> &str {
        match self {
            Self::Individual(details) => details.title.as_str(),
            Self::Company(details) => details.industry.as_str(),
        }
    }
}

/// Canonical contact record shared by session state, storage and render.
///
/// Serialized flat: common fields and the kind-specific fields live in one
/// JSON object, discriminated by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    /// Derived uppercase initials of `name`.
    pub thumbnail: String,
    /// Card expansion state. UI-only.
    #[serde(default)]
    pub is_expanded: bool,
    #[serde(flatten)]
    pub details: ContactDetails,
}

impl Contact {
    /// Creates a collapsed contact with a derived thumbnail.
    pub fn new(id: impl Into<ContactId>, name: impl Into<String>, details: ContactDetails) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            thumbnail: create_initials(&name),
            name,
            is_expanded: false,
            details,
        }
    }

    /// Returns the contact discriminant.
    pub fn kind(&self) -> ContactKind {
        self.details.kind()
    }

    /// Flips expand/collapse state. The only post-creation mutation.
    pub fn toggle(&mut self) {
        self.is_expanded = !self.is_expanded;
    }
}

/// Derives card initials from a display name.
///
/// Takes the first character of each whitespace-separated token and
/// uppercases it. Returns an empty string when `name` has no tokens.
pub fn create_initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|token| token.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

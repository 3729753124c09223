//! Seed record model.
//!
//! Seed records are the bundled first-run contacts. They share the contact
//! wire shape but carry no `id`, `thumbnail` or `isExpanded`; those are
//! assigned by the normalizer.

use crate::model::contact::{ContactDetails, ContactKind};
use serde::{Deserialize, Serialize};

/// Typed seed record after shape validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRecord {
    pub name: String,
    #[serde(flatten)]
    pub details: ContactDetails,
}

impl SeedRecord {
    /// Returns the record discriminant.
    pub fn kind(&self) -> ContactKind {
        self.details.kind()
    }
}

/// Bundled seed document envelope: `{ "contacts": [...] }`.
///
/// Records stay untyped here so the normalizer can report per-record
/// shape errors with their position.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedDocument {
    pub contacts: serde_json::Value,
}

/// Wire fields every seed record must carry for the given kind.
pub fn required_fields(kind: ContactKind) -> &'static [&'static str] {
    match kind {
        ContactKind::Individual => &[
            "name",
            "phoneNumber",
            "title",
            "emailAddress",
            "address",
            "website",
        ],
        ContactKind::Company => &[
            "name",
            "phoneNumber",
            "industry",
            "emailAddress",
            "address",
            "website",
            "keyContacts",
        ],
    }
}

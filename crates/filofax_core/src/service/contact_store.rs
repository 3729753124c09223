//! Contact state store.
//!
//! # Responsibility
//! - Load the contact collection from the backend, seeding on first run.
//! - Write the full collection through to the backend on every save.
//! - Provide the pure expand/collapse transition.
//!
//! # Invariants
//! - Persisted contacts are returned verbatim; they are never re-normalized
//!   or migrated.
//! - Unparsable or structurally mismatched blobs fail loudly and are never
//!   overwritten by `load`.
//! - `toggle_expanded` never mutates its input.

use crate::model::contact::Contact;
use crate::repo::kv_repo::{KvBackend, PersistenceError, PersistenceResult};
use crate::service::normalizer::{bundled_seed, parse_seed_document, MalformedSeedError};
use log::{error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed backend key holding the serialized contact collection.
pub const STORAGE_KEY: &str = "filofax_contacts";

/// Persisted blob exists but is not a valid contact collection.
#[derive(Debug)]
pub enum StorageCorruptError {
    /// Blob is not JSON or does not match the contact shape.
    Unparsable(serde_json::Error),
    /// Two persisted contacts share one id.
    DuplicateId(String),
}

impl Display for StorageCorruptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unparsable(err) => write!(f, "stored contacts are corrupt: {err}"),
            Self::DuplicateId(id) => write!(f, "stored contacts are corrupt: duplicate id `{id}`"),
        }
    }
}

impl Error for StorageCorruptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unparsable(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

/// Failure of `ContactStore::load`.
#[derive(Debug)]
pub enum LoadError {
    /// Bundled seed failed shape validation.
    MalformedSeed(MalformedSeedError),
    /// Persisted blob could not be parsed.
    StorageCorrupt(StorageCorruptError),
    /// Backend read, or the first-run seed write, failed.
    Persistence(PersistenceError),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedSeed(err) => write!(f, "{err}"),
            Self::StorageCorrupt(err) => write!(f, "{err}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedSeed(err) => Some(err),
            Self::StorageCorrupt(err) => Some(err),
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<MalformedSeedError> for LoadError {
    fn from(value: MalformedSeedError) -> Self {
        Self::MalformedSeed(value)
    }
}

impl From<StorageCorruptError> for LoadError {
    fn from(value: StorageCorruptError) -> Self {
        Self::StorageCorrupt(value)
    }
}

impl From<PersistenceError> for LoadError {
    fn from(value: PersistenceError) -> Self {
        Self::Persistence(value)
    }
}

/// Store bridging the contact collection to a key-value backend.
pub struct ContactStore<B: KvBackend> {
    backend: B,
    seed: &'static str,
}

impl<B: KvBackend> ContactStore<B> {
    /// Creates a store that seeds from the bundled document.
    pub fn new(backend: B) -> Self {
        Self::with_seed(backend, bundled_seed())
    }

    /// Creates a store that seeds from a caller-provided document.
    pub fn with_seed(backend: B, seed: &'static str) -> Self {
        Self { backend, seed }
    }

    /// Borrows the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consumes the store, returning the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Loads persisted contacts, or seeds and persists on first run.
    ///
    /// # Errors
    /// - `StorageCorrupt` when a blob exists but does not parse.
    /// - `MalformedSeed` when first-run seeding fails validation.
    /// - `Persistence` when reading, or writing the seed, fails.
    pub fn load(&mut self) -> Result<Vec<Contact>, LoadError> {
        let Some(blob) = self.backend.get(STORAGE_KEY)? else {
            let contacts = parse_seed_document(self.seed).map_err(|err| {
                error!("event=contacts_load module=store status=error source=seed error={err}");
                err
            })?;
            self.save(&contacts)?;
            info!(
                "event=contacts_load module=store status=ok source=seed count={}",
                contacts.len()
            );
            return Ok(contacts);
        };

        let contacts = decode_contacts(&blob).map_err(|err| {
            error!(
                "event=contacts_load module=store status=error source=storage error_code=storage_corrupt bytes={}",
                blob.len()
            );
            err
        })?;
        info!(
            "event=contacts_load module=store status=ok source=storage count={}",
            contacts.len()
        );
        Ok(contacts)
    }

    /// Serializes the full collection and overwrites the stored blob.
    pub fn save(&mut self, contacts: &[Contact]) -> PersistenceResult<()> {
        let blob = serde_json::to_string(contacts)?;
        match self.backend.set(STORAGE_KEY, &blob) {
            Ok(()) => {
                info!(
                    "event=contacts_save module=store status=ok count={} bytes={}",
                    contacts.len(),
                    blob.len()
                );
                Ok(())
            }
            Err(err) => {
                warn!("event=contacts_save module=store status=error error={err}");
                Err(err)
            }
        }
    }
}

/// Returns a copy of `contacts` with `id`'s expansion state flipped.
///
/// An unknown `id` yields an unchanged copy; stale ids from an old render
/// are not an error.
pub fn toggle_expanded(contacts: &[Contact], id: &str) -> Vec<Contact> {
    contacts
        .iter()
        .map(|contact| {
            let mut next = contact.clone();
            if next.id == id {
                next.toggle();
            }
            next
        })
        .collect()
}

/// Parses a persisted blob into contacts without any coercion.
pub fn decode_contacts(blob: &str) -> Result<Vec<Contact>, StorageCorruptError> {
    let contacts: Vec<Contact> =
        serde_json::from_str(blob).map_err(StorageCorruptError::Unparsable)?;

    let mut seen = HashSet::with_capacity(contacts.len());
    if let Some(duplicate) = contacts
        .iter()
        .find(|contact| !seen.insert(contact.id.as_str()))
    {
        return Err(StorageCorruptError::DuplicateId(duplicate.id.clone()));
    }

    Ok(contacts)
}

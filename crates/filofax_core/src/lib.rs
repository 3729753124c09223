//! Core domain logic for the Filofax contact directory.
//! This crate is the single source of truth for contact invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{
    create_initials, CompanyDetails, Contact, ContactDetails, ContactId, ContactKind,
    IndividualDetails, KeyContact,
};
pub use model::seed::SeedRecord;
pub use render::render_app;
pub use repo::kv_repo::{
    KvBackend, MemoryKvBackend, PersistenceError, PersistenceResult, SqliteKvBackend,
};
pub use service::contact_store::{
    decode_contacts, toggle_expanded, ContactStore, LoadError, StorageCorruptError, STORAGE_KEY,
};
pub use service::normalizer::{
    bundled_seed, normalize, normalize_records, parse_seed_document, MalformedSeedError,
};
pub use service::session::{Session, UiAction};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

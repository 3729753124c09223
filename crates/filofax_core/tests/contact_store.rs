use filofax_core::{
    normalize, toggle_expanded, Contact, ContactStore, KvBackend, LoadError, MemoryKvBackend,
    PersistenceError, PersistenceResult, StorageCorruptError, STORAGE_KEY,
};
use serde_json::json;

const TINY_SEED: &str = r#"{
    "contacts": [
        {
            "kind": "individual",
            "name": "Jane Doe",
            "phoneNumber": "555",
            "title": "Eng",
            "emailAddress": "j@x.com",
            "address": "A1",
            "website": "w1"
        },
        {
            "kind": "company",
            "name": "Acme Corp",
            "phoneNumber": "020",
            "industry": "Retail",
            "emailAddress": "c@x.com",
            "address": "B2",
            "website": "w2",
            "keyContacts": [{ "name": "Zed", "emailAddress": "z@x.com" }]
        }
    ]
}"#;

/// Backend whose writes can be switched off to simulate quota errors.
#[derive(Default)]
struct FlakyBackend {
    inner: MemoryKvBackend,
    reject_writes: bool,
}

impl KvBackend for FlakyBackend {
    fn get(&self, key: &str) -> PersistenceResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> PersistenceResult<()> {
        if self.reject_writes {
            return Err(PersistenceError::Backend("quota exceeded".to_string()));
        }
        self.inner.set(key, value)
    }
}

fn sample_contacts() -> Vec<Contact> {
    normalize(&json!([
        {
            "kind": "individual",
            "name": "Jane Doe",
            "phoneNumber": "555",
            "title": "Eng",
            "emailAddress": "j@x.com",
            "address": "A1",
            "website": "w1"
        },
        {
            "kind": "company",
            "name": "Acme Corp",
            "phoneNumber": "020",
            "industry": "Retail",
            "emailAddress": "c@x.com",
            "address": "B2",
            "website": "w2",
            "keyContacts": []
        }
    ]))
    .unwrap()
}

#[test]
fn first_load_seeds_and_persists() {
    let mut store = ContactStore::with_seed(MemoryKvBackend::new(), TINY_SEED);

    let contacts = store.load().unwrap();

    assert_eq!(contacts.len(), 2);
    assert_eq!(contacts[0].id, "contact-0");
    assert_eq!(contacts[1].thumbnail, "AC");
    let blob = store.backend().get(STORAGE_KEY).unwrap().expect("seed should be written");
    let persisted: Vec<Contact> = serde_json::from_str(&blob).unwrap();
    assert_eq!(persisted, contacts);
}

#[test]
fn default_store_seeds_from_bundled_document() {
    let mut store = ContactStore::new(MemoryKvBackend::new());
    let contacts = store.load().unwrap();
    assert!(!contacts.is_empty());
}

#[test]
fn later_load_returns_persisted_state_not_seed() {
    let mut backend = MemoryKvBackend::new();
    let mut contacts = sample_contacts();
    contacts[1].is_expanded = true;
    contacts[1].thumbnail = "custom".to_string();
    backend
        .set(STORAGE_KEY, &serde_json::to_string(&contacts).unwrap())
        .unwrap();

    let mut store = ContactStore::with_seed(backend, TINY_SEED);
    let loaded = store.load().unwrap();

    assert_eq!(loaded, contacts);
}

#[test]
fn save_then_load_round_trips() {
    let mut store = ContactStore::with_seed(MemoryKvBackend::new(), TINY_SEED);
    let contacts = toggle_expanded(&sample_contacts(), "contact-0");

    store.save(&contacts).unwrap();

    assert_eq!(store.load().unwrap(), contacts);
}

#[test]
fn save_overwrites_whole_collection() {
    let mut store = ContactStore::with_seed(MemoryKvBackend::new(), TINY_SEED);
    store.save(&sample_contacts()).unwrap();
    store.save(&sample_contacts()[..1]).unwrap();

    assert_eq!(store.load().unwrap().len(), 1);
}

#[test]
fn malformed_json_blob_is_storage_corrupt() {
    let mut backend = MemoryKvBackend::new();
    backend.set(STORAGE_KEY, "{not json").unwrap();
    let mut store = ContactStore::with_seed(backend, TINY_SEED);

    let err = store.load().unwrap_err();

    assert!(matches!(
        err,
        LoadError::StorageCorrupt(StorageCorruptError::Unparsable(_))
    ));
    assert_eq!(
        store.backend().get(STORAGE_KEY).unwrap().as_deref(),
        Some("{not json"),
        "corrupt data must not be overwritten"
    );
}

#[test]
fn legacy_field_names_are_storage_corrupt() {
    let mut backend = MemoryKvBackend::new();
    let legacy = json!([{
        "id": "contact-0",
        "name": "Jane Doe",
        "thumbnail": "JD",
        "isExpanded": false,
        "type": "individual",
        "info": {
            "phoneNumber": "555",
            "title": "Eng",
            "email": "j@x.com",
            "address": "A1",
            "website": "w1"
        }
    }]);
    backend.set(STORAGE_KEY, &legacy.to_string()).unwrap();
    let mut store = ContactStore::with_seed(backend, TINY_SEED);

    let err = store.load().unwrap_err();
    assert!(matches!(err, LoadError::StorageCorrupt(_)));
}

#[test]
fn malformed_seed_fails_first_load_without_writing() {
    let mut store = ContactStore::with_seed(
        MemoryKvBackend::new(),
        r#"{"contacts": [{"kind": "robot", "name": "R2"}]}"#,
    );

    let err = store.load().unwrap_err();

    assert!(matches!(err, LoadError::MalformedSeed(_)));
    assert_eq!(store.backend().get(STORAGE_KEY).unwrap(), None);
}

#[test]
fn seed_write_failure_surfaces_persistence_error() {
    let backend = FlakyBackend {
        reject_writes: true,
        ..FlakyBackend::default()
    };
    let mut store = ContactStore::with_seed(backend, TINY_SEED);

    let err = store.load().unwrap_err();
    assert!(matches!(
        err,
        LoadError::Persistence(PersistenceError::Backend(_))
    ));
}

#[test]
fn save_failure_propagates_persistence_error() {
    let backend = FlakyBackend {
        reject_writes: true,
        ..FlakyBackend::default()
    };
    let mut store = ContactStore::with_seed(backend, TINY_SEED);

    let err = store.save(&sample_contacts()).unwrap_err();
    assert!(err.to_string().contains("quota exceeded"));
}

#[test]
fn toggle_twice_restores_original_collection() {
    let contacts = sample_contacts();
    for id in ["contact-0", "contact-1", "missing"] {
        let twice = toggle_expanded(&toggle_expanded(&contacts, id), id);
        assert_eq!(twice, contacts);
    }
}

#[test]
fn toggle_unknown_id_is_noop() {
    let contacts = sample_contacts();
    assert_eq!(toggle_expanded(&contacts, "contact-99"), contacts);
}

#[test]
fn toggle_does_not_mutate_input() {
    let contacts = sample_contacts();
    let snapshot = contacts.clone();

    let toggled = toggle_expanded(&contacts, "contact-0");

    assert_eq!(contacts, snapshot);
    assert!(toggled[0].is_expanded);
    assert_eq!(toggled[1], contacts[1]);
}

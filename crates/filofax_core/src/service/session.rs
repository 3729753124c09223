//! Session state and UI action dispatch.
//!
//! # Responsibility
//! - Own the current contact collection for one session.
//! - Map UI actions onto store transitions with write-through persistence.
//!
//! # Invariants
//! - In-memory state is authoritative: a failed write never rolls back.
//! - Every successful dispatch leaves backend and memory identical.

use crate::model::contact::Contact;
use crate::render::render_app;
use crate::repo::kv_repo::{KvBackend, PersistenceError};
use crate::service::contact_store::{toggle_expanded, ContactStore, LoadError};
use log::{debug, warn};

const TOGGLE_ACTION: &str = "toggle";

/// User intent raised by the rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Flip expansion of the card keyed by `id`.
    Toggle { id: String },
}

impl UiAction {
    /// Builds an action from a control's `data-action` and its card's `data-id`.
    ///
    /// Returns `None` for unknown actions or a missing card id.
    pub fn from_attributes(action: &str, card_id: Option<&str>) -> Option<Self> {
        match (action, card_id) {
            (TOGGLE_ACTION, Some(id)) => Some(Self::Toggle { id: id.to_string() }),
            _ => None,
        }
    }
}

/// Session-scoped owner of store and contact state.
pub struct Session<B: KvBackend> {
    store: ContactStore<B>,
    contacts: Vec<Contact>,
}

impl<B: KvBackend> Session<B> {
    /// Loads contacts through `store` and starts a session.
    pub fn open(mut store: ContactStore<B>) -> Result<Self, LoadError> {
        let contacts = store.load()?;
        Ok(Self { store, contacts })
    }

    /// Current contact collection.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Looks up one contact by id.
    pub fn contact(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.id == id)
    }

    /// Applies `action`, then writes the full collection through.
    ///
    /// # Errors
    /// - `PersistenceError` when the write fails. The in-memory change is
    ///   kept and the next successful dispatch persists it.
    pub fn dispatch(&mut self, action: &UiAction) -> Result<(), PersistenceError> {
        match action {
            UiAction::Toggle { id } => {
                if self.contact(id).is_none() {
                    debug!("event=ui_dispatch module=session action=toggle status=noop");
                }
                self.contacts = toggle_expanded(&self.contacts, id);
            }
        }

        self.store.save(&self.contacts).map_err(|err| {
            warn!("event=ui_dispatch module=session status=persist_failed keep_memory=true");
            err
        })
    }

    /// Renders the current state as page markup.
    pub fn render(&self) -> String {
        render_app(&self.contacts)
    }

    /// Ends the session, returning the store.
    pub fn into_store(self) -> ContactStore<B> {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::UiAction;

    #[test]
    fn from_attributes_maps_toggle_only() {
        assert_eq!(
            UiAction::from_attributes("toggle", Some("contact-2")),
            Some(UiAction::Toggle {
                id: "contact-2".to_string()
            })
        );
        assert_eq!(UiAction::from_attributes("toggle", None), None);
        assert_eq!(UiAction::from_attributes("delete", Some("contact-2")), None);
    }
}

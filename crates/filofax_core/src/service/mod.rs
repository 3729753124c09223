//! Core use-case services.
//!
//! # Responsibility
//! - Turn seed data into canonical contacts.
//! - Orchestrate load/save/toggle against a key-value backend.
//! - Keep shells (CLI, UI) decoupled from storage details.

pub mod contact_store;
pub mod normalizer;
pub mod session;

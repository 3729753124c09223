//! Key-value persistence backends.
//!
//! # Responsibility
//! - Define the blob-store contract the contact store writes through.
//! - Provide in-memory and SQLite implementations of that contract.
//!
//! # Invariants
//! - Backends store opaque strings; they never interpret contact JSON.
//! - `set` is a total overwrite of the value under a key.

pub mod kv_repo;

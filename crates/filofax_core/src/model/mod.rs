//! Canonical domain model for the contact directory.
//!
//! # Responsibility
//! - Define the contact shape used in memory, in storage and by render.
//! - Define the looser seed shape consumed by the normalizer.
//!
//! # Invariants
//! - Every contact carries a collection-unique `id`.
//! - `thumbnail` is always derived from `name`, never set independently.

pub mod contact;
pub mod seed;

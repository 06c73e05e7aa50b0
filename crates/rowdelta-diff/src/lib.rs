//! Diff engine for rowdelta.
//!
//! Computes the minimal set of structural edits (inserts, deletes, moves,
//! content updates) between two versions of a two-level ordered collection
//! of sections and rows.
//!
//! # Key Types
//!
//! - [`DiffEngine`] -- Stateful engine: each computed "after" tree becomes the
//!   next "before" tree
//! - [`ChangeSet`] -- The computed inserts/deletes/updates/moves, with
//!   move-corrected update positions
//! - [`Element`] / [`Capabilities`] -- Declared per-type capabilities that
//!   drive default comparator selection
//! - [`ComparatorPair`] -- Resolved identity and equality comparators
//! - [`Shared`] -- A reference-identity element handle for mutable models

pub mod capabilities;
pub mod changeset;
pub mod engine;
pub mod shared;

pub use capabilities::{Capabilities, Comparator, ComparatorPair, Element, EqualityPolicy};
pub use changeset::ChangeSet;
pub use engine::DiffEngine;
pub use shared::Shared;

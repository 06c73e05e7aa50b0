//! Foundation types for rowdelta.
//!
//! This crate provides the positional types shared by the diff and apply
//! crates. Every other rowdelta crate depends on `rowdelta-types`.
//!
//! # Key Types
//!
//! - [`RowPath`] — A (section, row) position in a two-level ordered collection
//! - [`RowMove`] — A relocation of one element between two positions

pub mod path;

pub use path::{RowMove, RowPath};

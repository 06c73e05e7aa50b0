//! Update application for rowdelta.
//!
//! Translates a computed [`ChangeSet`](rowdelta_diff::ChangeSet) into an
//! ordered sequence of batched operations against an incrementally
//! updatable list/grid view.
//!
//! # Key Types
//!
//! - [`UpdatableView`] / [`ViewOp`] -- The abstract view contract: one atomic
//!   batch operation
//! - [`apply_change_set`] -- Two-batch delivery: structural edits, then
//!   move-corrected reloads
//! - [`ViewSync`] -- Session facade owning one diff engine and one view
//! - [`LegacyBatchAdapter`] -- Adapts begin/end-style widgets, guaranteeing
//!   an opened batch is closed
//! - [`ModelView`] / [`RecordingView`] -- In-memory implementations for
//!   headless use and tests

pub mod applier;
pub mod error;
pub mod model;
pub mod recording;
pub mod view;

pub use applier::{apply_change_set, ViewSync};
pub use error::ApplyError;
pub use model::ModelView;
pub use recording::RecordingView;
pub use view::{LegacyBatchAdapter, LegacyView, UpdatableView, ViewOp};

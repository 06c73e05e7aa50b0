//! A call-recording view for tests and dry runs.

use std::convert::Infallible;

use crate::view::{UpdatableView, ViewOp};

/// Records every batch issued to it, preserving batch boundaries and the
/// order of operations inside each batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingView {
    batches: Vec<Vec<ViewOp>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    /// The batches received so far, in issue order.
    pub fn batches(&self) -> &[Vec<ViewOp>] {
        &self.batches
    }

    /// All operations across batches, flattened in issue order.
    pub fn ops(&self) -> impl Iterator<Item = &ViewOp> {
        self.batches.iter().flatten()
    }

    /// Total number of operations received.
    pub fn op_count(&self) -> usize {
        self.ops().count()
    }

    /// Returns `true` if any batch was issued, even an empty one.
    pub fn was_called(&self) -> bool {
        !self.batches.is_empty()
    }

    /// Forget everything recorded.
    pub fn clear(&mut self) {
        self.batches.clear();
    }
}

impl UpdatableView for RecordingView {
    type Error = Infallible;

    fn perform_batch(&mut self, ops: &[ViewOp]) -> Result<(), Infallible> {
        self.batches.push(ops.to_vec());
        Ok(())
    }
}

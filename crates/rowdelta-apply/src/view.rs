//! The abstract view contract and the legacy begin/end adapter.

use rowdelta_types::RowPath;

/// A single operation inside a view batch.
///
/// Within one batch, delete paths address pre-batch positions, insert paths
/// address post-batch positions, and a move's endpoints straddle both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewOp {
    /// Remove the rows at the given pre-batch positions.
    Delete(Vec<RowPath>),
    /// Insert rows at the given post-batch positions.
    Insert(Vec<RowPath>),
    /// Relocate one row from a pre-batch position to a post-batch position.
    Move { from: RowPath, to: RowPath },
    /// Re-render the rows at the given positions.
    Reload(Vec<RowPath>),
}

/// An incrementally updatable list/grid view.
///
/// One operation covers both widget styles: a widget with a true atomic
/// batch primitive implements `perform_batch` directly; a widget that only
/// exposes a begin/end bracket is wrapped in [`LegacyBatchAdapter`].
pub trait UpdatableView {
    type Error;

    /// Apply `ops` as one atomic visual transition, in the order given.
    fn perform_batch(&mut self, ops: &[ViewOp]) -> Result<(), Self::Error>;
}

/// A widget exposing only a begin/end update bracket.
pub trait LegacyView {
    type Error;

    fn begin_updates(&mut self) -> Result<(), Self::Error>;
    fn end_updates(&mut self) -> Result<(), Self::Error>;
    fn delete_rows(&mut self, paths: &[RowPath]) -> Result<(), Self::Error>;
    fn insert_rows(&mut self, paths: &[RowPath]) -> Result<(), Self::Error>;
    fn move_row(&mut self, from: RowPath, to: RowPath) -> Result<(), Self::Error>;
    fn reload_rows(&mut self, paths: &[RowPath]) -> Result<(), Self::Error>;
}

/// Presents a [`LegacyView`] as an [`UpdatableView`].
///
/// Once `begin_updates` has succeeded, `end_updates` is always called, even
/// when an operation inside the bracket fails; the widget is never left in
/// a pending-update state. The first failure is the one reported.
pub struct LegacyBatchAdapter<V> {
    inner: V,
}

impl<V> LegacyBatchAdapter<V> {
    pub fn new(inner: V) -> Self {
        Self { inner }
    }

    pub fn view(&self) -> &V {
        &self.inner
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.inner
    }

    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<V: LegacyView> UpdatableView for LegacyBatchAdapter<V> {
    type Error = V::Error;

    fn perform_batch(&mut self, ops: &[ViewOp]) -> Result<(), V::Error> {
        self.inner.begin_updates()?;

        let mut outcome = Ok(());
        for op in ops {
            let step = match op {
                ViewOp::Delete(paths) => self.inner.delete_rows(paths),
                ViewOp::Insert(paths) => self.inner.insert_rows(paths),
                ViewOp::Move { from, to } => self.inner.move_row(*from, *to),
                ViewOp::Reload(paths) => self.inner.reload_rows(paths),
            };
            if step.is_err() {
                outcome = step;
                break;
            }
        }

        let closed = self.inner.end_updates();
        outcome.and(closed)
    }
}

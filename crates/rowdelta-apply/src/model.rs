//! An in-memory view backed by a plain section/row model.
//!
//! Useful for headless application of change sets and as the reference
//! implementation of the batch index contract: within one batch, deletions
//! and move sources are taken out against pre-batch indices (descending),
//! then insertions and move destinations are filled in against the
//! resulting state (ascending).

use rowdelta_types::RowPath;

use crate::error::ApplyError;
use crate::view::{UpdatableView, ViewOp};

/// A model-backed [`UpdatableView`].
///
/// Inserted and reloaded rows pull their content from a caller-supplied
/// source closure, playing the role a widget's data source plays: insert
/// and reload paths are resolved against the post-batch state the source
/// describes.
///
/// Sections grow on demand when an insertion targets one past the current
/// end; section-level operations are not modeled. A failed operation leaves
/// the model partially updated.
pub struct ModelView<K> {
    rows: Vec<Vec<K>>,
    source: Box<dyn Fn(RowPath) -> K>,
}

impl<K> ModelView<K> {
    /// Create a view over an initial model and a content source.
    pub fn new(rows: Vec<Vec<K>>, source: impl Fn(RowPath) -> K + 'static) -> Self {
        Self {
            rows,
            source: Box::new(source),
        }
    }

    /// The current model state.
    pub fn rows(&self) -> &[Vec<K>] {
        &self.rows
    }

    /// Replace the content source.
    pub fn set_source(&mut self, source: impl Fn(RowPath) -> K + 'static) {
        self.source = Box::new(source);
    }

    fn get(&self, path: RowPath) -> Result<&K, ApplyError> {
        self.rows
            .get(path.section)
            .ok_or(ApplyError::SectionOutOfBounds(path.section))?
            .get(path.row)
            .ok_or(ApplyError::RowOutOfBounds(path))
    }

    fn remove_at(&mut self, path: RowPath) -> Result<K, ApplyError> {
        let section = self
            .rows
            .get_mut(path.section)
            .ok_or(ApplyError::SectionOutOfBounds(path.section))?;
        if path.row >= section.len() {
            return Err(ApplyError::RowOutOfBounds(path));
        }
        Ok(section.remove(path.row))
    }

    fn insert_at(&mut self, path: RowPath, value: K) -> Result<(), ApplyError> {
        while self.rows.len() <= path.section {
            self.rows.push(Vec::new());
        }
        let section = &mut self.rows[path.section];
        if path.row > section.len() {
            return Err(ApplyError::RowOutOfBounds(path));
        }
        section.insert(path.row, value);
        Ok(())
    }
}

impl<K: Clone> UpdatableView for ModelView<K> {
    type Error = ApplyError;

    fn perform_batch(&mut self, ops: &[ViewOp]) -> Result<(), ApplyError> {
        let mut removals: Vec<RowPath> = Vec::new();
        // Staged value None means "pull from the source at insertion time".
        let mut insertions: Vec<(RowPath, Option<K>)> = Vec::new();
        let mut reloads: Vec<RowPath> = Vec::new();

        // Stage first: move sources are read against pre-batch state.
        for op in ops {
            match op {
                ViewOp::Delete(paths) => removals.extend(paths.iter().copied()),
                ViewOp::Insert(paths) => {
                    insertions.extend(paths.iter().map(|&path| (path, None)));
                }
                ViewOp::Move { from, to } => {
                    let value = self.get(*from)?.clone();
                    removals.push(*from);
                    insertions.push((*to, Some(value)));
                }
                ViewOp::Reload(paths) => reloads.extend(paths.iter().copied()),
            }
        }

        // Pre-batch indices: remove from the highest path down so earlier
        // positions stay valid.
        removals.sort_unstable();
        for &path in removals.iter().rev() {
            self.remove_at(path)?;
        }

        // Post-batch indices: fill from the lowest path up so every row
        // lands at its final position.
        insertions.sort_by_key(|&(path, _)| path);
        for (path, staged) in insertions {
            let value = match staged {
                Some(value) => value,
                None => (self.source)(path),
            };
            self.insert_at(path, value)?;
        }

        for path in reloads {
            let fresh = (self.source)(path);
            let section = self
                .rows
                .get_mut(path.section)
                .ok_or(ApplyError::SectionOutOfBounds(path.section))?;
            let slot = section
                .get_mut(path.row)
                .ok_or(ApplyError::RowOutOfBounds(path))?;
            *slot = fresh;
        }

        Ok(())
    }
}

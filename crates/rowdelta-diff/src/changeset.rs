//! The computed change set between two tree versions.

use serde::{Deserialize, Serialize};

use rowdelta_types::{RowMove, RowPath};

/// The structural edits that turn one tree version into the next.
///
/// Insert paths index the after-tree; delete and raw update paths index the
/// before-tree; a move's `from` indexes the before-tree and its `to` the
/// after-tree. Raw update paths are deliberately pre-move positions -- use
/// [`corrected_updates`] before reloading a view whose structural edits have
/// already been committed.
///
/// [`corrected_updates`]: ChangeSet::corrected_updates
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Paths of elements added to the tree.
    pub inserts: Vec<RowPath>,
    /// Paths of elements removed from the tree.
    pub deletes: Vec<RowPath>,
    /// Paths of elements whose content changed, in before-tree coordinates.
    pub updates: Vec<RowPath>,
    /// Elements relocated from one position to another.
    pub moves: Vec<RowMove>,
}

impl ChangeSet {
    /// Create a change set from its four collections.
    pub fn new(
        inserts: Vec<RowPath>,
        deletes: Vec<RowPath>,
        updates: Vec<RowPath>,
        moves: Vec<RowMove>,
    ) -> Self {
        Self {
            inserts,
            deletes,
            updates,
            moves,
        }
    }

    /// Returns `true` if all four collections are empty.
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty()
            && self.deletes.is_empty()
            && self.updates.is_empty()
            && self.moves.is_empty()
    }

    /// Returns `true` if any collection is non-empty.
    pub fn has_changes(&self) -> bool {
        !self.is_empty()
    }

    /// Total number of recorded edits.
    pub fn len(&self) -> usize {
        self.inserts.len() + self.deletes.len() + self.updates.len() + self.moves.len()
    }

    /// The update paths after moves have been applied.
    ///
    /// Each raw update path that equals some move's `from` is rewritten to
    /// that move's `to` (first matching move wins); paths with no matching
    /// move pass through unchanged. These are the only paths guaranteed
    /// valid once the structural batch has committed.
    pub fn corrected_updates(&self) -> Vec<RowPath> {
        self.updates
            .iter()
            .map(|&path| self.apply_moves(path))
            .collect()
    }

    fn apply_moves(&self, path: RowPath) -> RowPath {
        for mv in &self.moves {
            if mv.from == path {
                return mv.to;
            }
        }
        path
    }
}

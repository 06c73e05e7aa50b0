//! The stateful diff engine.
//!
//! [`DiffEngine`] owns a "before" tree and compares it against each "after"
//! tree it is fed. Computing a change set commits the after-tree as the new
//! before-tree, so repeated calls chain: every diff is taken against the
//! last committed state.
//!
//! All four passes run over the canonical enumeration of a tree -- section
//! index outer, row index inner -- and matching is first-match in that
//! order. One engine instance must not be driven concurrently; the commit
//! step is a read-modify-write of the before-tree.

use tracing::debug;

use rowdelta_types::{RowMove, RowPath};

use crate::capabilities::{ComparatorPair, Element, EqualityPolicy};
use crate::changeset::ChangeSet;

/// Enumerate a tree in canonical (path, element) order.
fn enumerate<T>(tree: &[Vec<T>]) -> impl Iterator<Item = (RowPath, &T)> {
    tree.iter().enumerate().flat_map(|(section, rows)| {
        rows.iter()
            .enumerate()
            .map(move |(row, element)| (RowPath::new(section, row), element))
    })
}

/// Computes [`ChangeSet`]s between successive versions of a two-level tree.
///
/// The engine never mutates the elements it holds; under the hash-snapshot
/// equality policy it reads their content hashes at commit time.
pub struct DiffEngine<T: Element + Clone> {
    before: Vec<Vec<T>>,
    comparators: ComparatorPair<T>,
    /// Instance-keyed content hashes captured from the before-tree at the
    /// last commit. Populated only under the hash-snapshot policy.
    before_hashes: Vec<(T, u64)>,
}

impl<T: Element + Clone + 'static> DiffEngine<T> {
    /// Create an engine with capability-resolved default comparators.
    pub fn new(before: Vec<Vec<T>>) -> Self {
        Self::with_comparators(before, ComparatorPair::resolve())
    }

    /// Create an engine with a caller-supplied comparator pair.
    pub fn with_comparators(before: Vec<Vec<T>>, comparators: ComparatorPair<T>) -> Self {
        let mut engine = Self {
            before,
            comparators,
            before_hashes: Vec::new(),
        };
        engine.capture_hashes();
        engine
    }

    /// The tree the next change set will be computed against.
    pub fn before_tree(&self) -> &[Vec<T>] {
        &self.before
    }

    /// The active comparator pair.
    pub fn comparators(&self) -> &ComparatorPair<T> {
        &self.comparators
    }

    /// Replace the identity comparator.
    pub fn set_identity_comparator(&mut self, identity: impl Fn(&T, &T) -> bool + 'static) {
        self.comparators.set_identity(identity);
    }

    /// Replace the equality comparator. Overriding drops the hash-snapshot
    /// policy, so the snapshot is released.
    pub fn set_equality_comparator(&mut self, equality: impl Fn(&T, &T) -> bool + 'static) {
        self.comparators.set_equality(equality);
        self.capture_hashes();
    }

    /// Compute the change set that turns the held before-tree into `after`,
    /// then commit `after` as the new before-tree.
    ///
    /// The commit is a documented side effect: the next call diffs against
    /// `after`, and under the hash-snapshot policy fresh content hashes are
    /// captured from it.
    pub fn compute_change_set(&mut self, after: Vec<Vec<T>>) -> ChangeSet {
        let change_set = ChangeSet::new(
            self.find_inserts(&after),
            self.find_deletes(&after),
            self.find_updates(&after),
            self.find_moves(&after),
        );

        self.before = after;
        self.capture_hashes();

        debug!(
            inserts = change_set.inserts.len(),
            deletes = change_set.deletes.len(),
            updates = change_set.updates.len(),
            moves = change_set.moves.len(),
            "computed change set and committed after-tree"
        );
        change_set
    }

    /// Is the content of `old` and `new` equal under the active policy?
    ///
    /// Consulted only for identity-matched pairs. Under the hash-snapshot
    /// policy this compares the hash captured from `old` at the last commit
    /// against a freshly computed hash of `new`.
    pub fn content_equal(&self, old: &T, new: &T) -> bool {
        match self.comparators.equality() {
            EqualityPolicy::Comparator(eq) => eq(old, new),
            EqualityPolicy::HashSnapshot => self.snapshot_hash(old) == Some(new.content_hash()),
        }
    }

    fn find_inserts(&self, after: &[Vec<T>]) -> Vec<RowPath> {
        enumerate(after)
            .filter(|&(_, element)| !self.contains_identity(&self.before, element))
            .map(|(path, _)| path)
            .collect()
    }

    fn find_deletes(&self, after: &[Vec<T>]) -> Vec<RowPath> {
        enumerate(&self.before)
            .filter(|&(_, element)| !self.contains_identity(after, element))
            .map(|(path, _)| path)
            .collect()
    }

    fn find_updates(&self, after: &[Vec<T>]) -> Vec<RowPath> {
        enumerate(&self.before)
            .filter(|&(_, old)| match self.first_match(after, old) {
                Some((_, new)) => !self.content_equal(old, new),
                None => false,
            })
            .map(|(path, _)| path)
            .collect()
    }

    fn find_moves(&self, after: &[Vec<T>]) -> Vec<RowMove> {
        enumerate(after)
            .filter_map(|(new_path, element)| {
                self.first_match(&self.before, element)
                    .map(|(old_path, _)| old_path)
                    .filter(|&old_path| old_path != new_path)
                    .map(|old_path| RowMove::new(old_path, new_path))
            })
            .collect()
    }

    fn contains_identity(&self, tree: &[Vec<T>], element: &T) -> bool {
        self.first_match(tree, element).is_some()
    }

    /// First element of `tree`, in canonical order, that identity-matches
    /// `element`. Callers must keep identity collision-free; with duplicate
    /// matches the earliest wins.
    fn first_match<'t>(&self, tree: &'t [Vec<T>], element: &T) -> Option<(RowPath, &'t T)> {
        enumerate(tree).find(|&(_, candidate)| self.comparators.same_identity(candidate, element))
    }

    fn capture_hashes(&mut self) {
        self.before_hashes.clear();
        if matches!(self.comparators.equality(), EqualityPolicy::HashSnapshot) {
            self.before_hashes = enumerate(&self.before)
                .map(|(_, element)| (element.clone(), element.content_hash()))
                .collect();
        }
    }

    /// The hash captured for this instance at the last commit. Keyed by
    /// [`Element::same_instance`], not the overridable identity comparator,
    /// since the snapshot exists to observe one instance twice.
    fn snapshot_hash(&self, element: &T) -> Option<u64> {
        self.before_hashes
            .iter()
            .find(|(held, _)| held.same_instance(element))
            .map(|&(_, hash)| hash)
    }
}

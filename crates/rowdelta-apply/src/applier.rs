//! Ordered delivery of change sets to a view.

use tracing::debug;

use rowdelta_diff::{ChangeSet, ComparatorPair, DiffEngine, Element};

use crate::view::{UpdatableView, ViewOp};

/// Apply `change_set` to `view`.
///
/// An empty change set issues no calls at all. Otherwise exactly two batches
/// are issued: first the structural batch -- deletes, then inserts, then each
/// move in list order, the sub-order the view's index bookkeeping requires --
/// and then a reload batch carrying the move-corrected update paths, which
/// are the only positions guaranteed valid once the structural batch has
/// committed. The batches are never merged: a reload in the same atomic
/// batch as a move of the same row is not guaranteed to resolve against the
/// right generation of data.
///
/// Failures from the view are propagated unchanged; no retries.
pub fn apply_change_set<V: UpdatableView>(
    view: &mut V,
    change_set: &ChangeSet,
) -> Result<(), V::Error> {
    if !change_set.has_changes() {
        return Ok(());
    }

    let mut structural = Vec::new();
    if !change_set.deletes.is_empty() {
        structural.push(ViewOp::Delete(change_set.deletes.clone()));
    }
    if !change_set.inserts.is_empty() {
        structural.push(ViewOp::Insert(change_set.inserts.clone()));
    }
    for mv in &change_set.moves {
        structural.push(ViewOp::Move {
            from: mv.from,
            to: mv.to,
        });
    }

    debug!(ops = structural.len(), "issuing structural batch");
    view.perform_batch(&structural)?;

    let corrected = change_set.corrected_updates();
    let reloads = if corrected.is_empty() {
        Vec::new()
    } else {
        vec![ViewOp::Reload(corrected)]
    };
    debug!(reloads = change_set.updates.len(), "issuing reload batch");
    view.perform_batch(&reloads)
}

/// A session tying one [`DiffEngine`] to one view.
///
/// Each [`sync`](ViewSync::sync) call diffs the supplied tree against the
/// engine's committed state and applies the result. The commit happens
/// before application, so a view failure leaves the engine one tree ahead
/// of the view; callers that recover from view errors should rebuild the
/// session.
pub struct ViewSync<T: Element + Clone, V: UpdatableView> {
    engine: DiffEngine<T>,
    view: V,
}

impl<T: Element + Clone + 'static, V: UpdatableView> ViewSync<T, V> {
    /// Create a session with capability-resolved default comparators.
    pub fn new(view: V, initial: Vec<Vec<T>>) -> Self {
        Self {
            engine: DiffEngine::new(initial),
            view,
        }
    }

    /// Create a session with a caller-supplied comparator pair.
    pub fn with_comparators(view: V, initial: Vec<Vec<T>>, comparators: ComparatorPair<T>) -> Self {
        Self {
            engine: DiffEngine::with_comparators(initial, comparators),
            view,
        }
    }

    /// Replace the identity comparator.
    pub fn set_identity_comparator(&mut self, identity: impl Fn(&T, &T) -> bool + 'static) {
        self.engine.set_identity_comparator(identity);
    }

    /// Replace the equality comparator.
    pub fn set_equality_comparator(&mut self, equality: impl Fn(&T, &T) -> bool + 'static) {
        self.engine.set_equality_comparator(equality);
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Diff `after` against the committed state, apply the result to the
    /// view, and return the computed change set.
    pub fn sync(&mut self, after: Vec<Vec<T>>) -> Result<ChangeSet, V::Error> {
        let change_set = self.engine.compute_change_set(after);
        apply_change_set(&mut self.view, &change_set)?;
        Ok(change_set)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use rowdelta_diff::Capabilities;
    use rowdelta_types::{RowMove, RowPath};

    use super::*;
    use crate::model::ModelView;
    use crate::recording::RecordingView;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        id: u32,
        text: &'static str,
    }

    impl Item {
        fn new(id: u32) -> Self {
            Self { id, text: "" }
        }
    }

    impl Element for Item {
        const CAPABILITIES: Capabilities =
            Capabilities::none().with_value_equality().with_stable_id();

        fn value_eq(&self, other: &Self) -> bool {
            self == other
        }

        fn same_id(&self, other: &Self) -> bool {
            self.id == other.id
        }
    }

    fn path(section: usize, row: usize) -> RowPath {
        RowPath::new(section, row)
    }

    fn full_change_set() -> ChangeSet {
        ChangeSet::new(
            vec![path(0, 2)],
            vec![path(0, 0)],
            vec![path(0, 1)],
            vec![RowMove::new(path(0, 1), path(0, 0))],
        )
    }

    #[test]
    fn empty_change_set_issues_no_calls() {
        let mut view = RecordingView::new();
        apply_change_set(&mut view, &ChangeSet::default()).unwrap();
        assert!(!view.was_called());
    }

    #[test]
    fn issues_exactly_two_batches() {
        let mut view = RecordingView::new();
        apply_change_set(&mut view, &full_change_set()).unwrap();
        assert_eq!(view.batches().len(), 2);
    }

    #[test]
    fn structural_batch_orders_deletes_then_inserts_then_moves() {
        let mut view = RecordingView::new();
        apply_change_set(&mut view, &full_change_set()).unwrap();

        assert_eq!(
            view.batches()[0],
            vec![
                ViewOp::Delete(vec![path(0, 0)]),
                ViewOp::Insert(vec![path(0, 2)]),
                ViewOp::Move {
                    from: path(0, 1),
                    to: path(0, 0),
                },
            ]
        );
    }

    #[test]
    fn reload_batch_carries_move_corrected_paths() {
        let mut view = RecordingView::new();
        apply_change_set(&mut view, &full_change_set()).unwrap();

        // The raw update path (0, 1) is a move source; the reload targets
        // the move destination instead.
        assert_eq!(view.batches()[1], vec![ViewOp::Reload(vec![path(0, 0)])]);
    }

    #[test]
    fn update_only_change_set_still_issues_both_batches() {
        let update_only = ChangeSet::new(vec![], vec![], vec![path(1, 3)], vec![]);
        let mut view = RecordingView::new();
        apply_change_set(&mut view, &update_only).unwrap();

        assert_eq!(view.batches().len(), 2);
        assert!(view.batches()[0].is_empty());
        assert_eq!(view.batches()[1], vec![ViewOp::Reload(vec![path(1, 3)])]);
    }

    #[test]
    fn sync_applies_and_returns_each_change_set() {
        let mut session = ViewSync::new(RecordingView::new(), vec![vec![Item::new(1)]]);

        let first = session
            .sync(vec![vec![Item::new(1), Item::new(2)]])
            .unwrap();
        assert_eq!(first.inserts, vec![path(0, 1)]);
        assert_eq!(session.view().batches().len(), 2);

        // Unchanged input diffs against the committed state: no new calls.
        let second = session
            .sync(vec![vec![Item::new(1), Item::new(2)]])
            .unwrap();
        assert!(second.is_empty());
        assert_eq!(session.view().batches().len(), 2);
    }

    #[test]
    fn sync_with_comparator_overrides() {
        let mut session = ViewSync::new(RecordingView::new(), vec![vec![Item::new(1)]]);
        // Treat every element as the same entity with equal content.
        session.set_identity_comparator(|_, _| true);
        session.set_equality_comparator(|_, _| true);

        let change_set = session.sync(vec![vec![Item::new(9)]]).unwrap();
        assert!(change_set.is_empty());
        assert!(!session.view().was_called());
    }

    #[test]
    fn view_accessors_expose_the_owned_view() {
        let mut session = ViewSync::new(RecordingView::new(), vec![vec![Item::new(1)]]);
        session.sync(vec![vec![]]).unwrap();
        assert!(session.view().was_called());

        session.view_mut().clear();
        assert!(!session.view().was_called());

        let view = session.into_view();
        assert!(!view.was_called());
    }

    fn unique_id_tree() -> impl Strategy<Value = Vec<Vec<Item>>> {
        proptest::collection::vec(proptest::collection::vec(0u32..24, 0..5), 0..4).prop_map(
            |sections| {
                let mut seen = HashSet::new();
                sections
                    .into_iter()
                    .map(|section| {
                        section
                            .into_iter()
                            .filter(|id| seen.insert(*id))
                            .map(Item::new)
                            .collect()
                    })
                    .collect()
            },
        )
    }

    fn enumerate_ids(tree: &[Vec<Item>]) -> Vec<(RowPath, u32)> {
        tree.iter()
            .enumerate()
            .flat_map(|(section, rows)| {
                rows.iter()
                    .enumerate()
                    .map(move |(row, item)| (RowPath::new(section, row), item.id))
            })
            .collect()
    }

    proptest! {
        #[test]
        fn applying_the_change_set_reconstructs_the_after_tree(
            before in unique_id_tree(),
            after in unique_id_tree(),
        ) {
            let mut engine = DiffEngine::new(before.clone());
            let change_set = engine.compute_change_set(after.clone());

            let source = after.clone();
            let mut view = ModelView::new(before, move |p: RowPath| {
                source[p.section][p.row].clone()
            });
            apply_change_set(&mut view, &change_set).unwrap();

            prop_assert_eq!(enumerate_ids(view.rows()), enumerate_ids(&after));
        }
    }
}

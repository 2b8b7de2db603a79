//! Aggregate reconciliation: diff a submitted state collection against
//! the persisted rows of the same country.
//!
//! The plan is computed purely in memory; the persistence adapter applies
//! it as one batch inside the unit-of-work transaction. A submitted id of
//! [`State::PENDING_ID`] marks an insert; any other id marks a full-replace
//! update. The delete set is the identifier difference between the
//! persisted rows and the submission, and is the only place surviving
//! states are determined.

use std::collections::HashSet;

use crate::domain::State;

/// Insert/update/delete marks produced by diffing one aggregate.
///
/// ## Invariants
/// - The three sets are disjoint by construction: a submitted state lands
///   in exactly one of `inserts`/`updates`, and `delete_ids` only contains
///   ids absent from the submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReconcilePlan {
    inserts: Vec<State>,
    updates: Vec<State>,
    delete_ids: Vec<i32>,
}

impl ReconcilePlan {
    /// Diff `submitted` against the identifiers of the persisted rows.
    ///
    /// A non-pending submitted id that matches no persisted row stays an
    /// update mark; the database rejects it at commit time rather than
    /// this function failing fast.
    pub fn diff(current_ids: &[i32], submitted: Vec<State>) -> Self {
        let submitted_ids: HashSet<i32> = submitted
            .iter()
            .filter(|state| !state.is_pending_insert())
            .map(State::id)
            .collect();

        let (inserts, updates): (Vec<State>, Vec<State>) = submitted
            .into_iter()
            .partition(State::is_pending_insert);

        let delete_ids = current_ids
            .iter()
            .copied()
            .filter(|id| !submitted_ids.contains(id))
            .collect();

        Self {
            inserts,
            updates,
            delete_ids,
        }
    }

    /// States to be inserted as new rows.
    pub fn inserts(&self) -> &[State] {
        &self.inserts
    }

    /// States whose persisted rows are fully replaced.
    pub fn updates(&self) -> &[State] {
        &self.updates
    }

    /// Identifiers of persisted rows absent from the submission.
    pub fn delete_ids(&self) -> &[i32] {
        &self.delete_ids
    }

    /// Whether the plan carries no marks at all.
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty() && self.updates.is_empty() && self.delete_ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn state(id: i32, name: &str) -> State {
        State::new(id, Uuid::new_v4(), name, 100).expect("valid state")
    }

    #[rstest]
    fn marks_decompose_into_disjoint_sets() {
        let current = [1, 2, 3];
        let submitted = vec![state(0, "new"), state(1, "kept"), state(3, "kept too")];

        let plan = ReconcilePlan::diff(&current, submitted);

        assert_eq!(plan.inserts().len(), 1);
        assert_eq!(plan.updates().len(), 2);
        assert_eq!(plan.delete_ids(), [2]);

        let update_ids: HashSet<i32> = plan.updates().iter().map(State::id).collect();
        for id in plan.delete_ids() {
            assert!(!update_ids.contains(id));
        }
    }

    #[rstest]
    fn update_id_union_equals_submitted_non_pending_ids() {
        let submitted = vec![state(4, "a"), state(9, "b"), state(0, "c")];
        let plan = ReconcilePlan::diff(&[4, 9], submitted);

        let update_ids: HashSet<i32> = plan.updates().iter().map(State::id).collect();
        assert_eq!(update_ids, HashSet::from([4, 9]));
    }

    #[rstest]
    fn delete_set_is_current_minus_submitted() {
        let plan = ReconcilePlan::diff(&[10, 20, 30], vec![state(20, "only survivor")]);
        assert_eq!(plan.delete_ids(), [10, 30]);
    }

    #[rstest]
    fn resubmission_after_reconciliation_is_updates_only() {
        // First pass: one insert, one delete.
        let first = ReconcilePlan::diff(&[1, 2], vec![state(1, "a2"), state(0, "c")]);
        assert_eq!(first.inserts().len(), 1);
        assert_eq!(first.delete_ids(), [2]);

        // Simulate the post-commit store: update kept id 1, insert got id 3.
        let resubmitted = vec![state(1, "a2"), state(3, "c")];
        let second = ReconcilePlan::diff(&[1, 3], resubmitted);

        assert!(second.inserts().is_empty());
        assert!(second.delete_ids().is_empty());
        assert_eq!(second.updates().len(), 2);
    }

    #[rstest]
    fn unknown_submitted_id_stays_an_update_mark() {
        let plan = ReconcilePlan::diff(&[1], vec![state(99, "phantom")]);
        assert_eq!(plan.updates().len(), 1);
        assert_eq!(plan.delete_ids(), [1]);
    }

    #[rstest]
    fn empty_submission_deletes_everything() {
        let plan = ReconcilePlan::diff(&[5, 6], Vec::new());
        assert!(plan.inserts().is_empty());
        assert!(plan.updates().is_empty());
        assert_eq!(plan.delete_ids(), [5, 6]);
    }

    #[rstest]
    fn empty_on_both_sides_yields_an_empty_plan() {
        let plan = ReconcilePlan::diff(&[], Vec::new());
        assert!(plan.is_empty());
    }
}

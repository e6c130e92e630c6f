use parentmanager_domain::{Relationship, UserId};

use crate::RoleSyncOutcome;

/// Result of one child id inside an assignment pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildAssignmentOutcome {
    /// A relationship row was inserted.
    Assigned {
        /// The inserted row.
        relationship: Relationship,
        /// What role synchronization did for the new row.
        role_sync: RoleSyncOutcome,
    },
    /// The pair was already related; nothing was written.
    AlreadyAssigned,
    /// The existence check or insert failed.
    Failed(String),
}

/// One attempted child assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildAssignment {
    /// Child that was attempted.
    pub child_id: UserId,
    /// What happened.
    pub outcome: ChildAssignmentOutcome,
}

/// Per-child detail of an assignment pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignChildrenReport {
    /// Parent the children were assigned to.
    pub parent_id: UserId,
    /// Outcomes in input order.
    pub assignments: Vec<ChildAssignment>,
}

impl AssignChildrenReport {
    /// True iff no existence check or insert failed.
    ///
    /// Role synchronization failures are soft and do not count.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        !self
            .assignments
            .iter()
            .any(|assignment| matches!(assignment.outcome, ChildAssignmentOutcome::Failed(_)))
    }

    /// Children that received a new relationship row.
    #[must_use]
    pub fn assigned_child_ids(&self) -> Vec<UserId> {
        self.assignments
            .iter()
            .filter(|assignment| {
                matches!(assignment.outcome, ChildAssignmentOutcome::Assigned { .. })
            })
            .map(|assignment| assignment.child_id)
            .collect()
    }

    /// Children whose assignment failed.
    #[must_use]
    pub fn failed_child_ids(&self) -> Vec<UserId> {
        self.assignments
            .iter()
            .filter(|assignment| matches!(assignment.outcome, ChildAssignmentOutcome::Failed(_)))
            .map(|assignment| assignment.child_id)
            .collect()
    }
}

/// Detail of a single child removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveChildReport {
    /// The row found before deletion, if any.
    pub relationship: Option<Relationship>,
    /// Role revocation for the found row; `None` when nothing was found.
    pub role_sync: Option<RoleSyncOutcome>,
    /// Rows the delete reported, `None` if the delete itself failed.
    pub rows_deleted: Option<u64>,
}

impl RemoveChildReport {
    /// Mirrors the delete primitive: true even when no row matched.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.rows_deleted.is_some()
    }
}

/// Detail of a cascading parent removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveParentReport {
    /// Parent whose status was removed.
    pub parent_id: UserId,
    /// Whether the parent's relationships could be read. When false no
    /// grant, row or marker was touched.
    pub relationships_listed: bool,
    /// Role revocation per former child.
    pub role_revocations: Vec<(UserId, RoleSyncOutcome)>,
    /// Relationship rows deleted, `None` if the delete failed.
    pub relationships_removed: Option<u64>,
    /// Whether the parent marker ended up cleared.
    pub marker_cleared: bool,
}

impl RemoveParentReport {
    /// True when the relationships were listed and deleted and the marker
    /// cleared.
    ///
    /// Role revocation failures are swallowed and do not count.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.relationships_listed && self.relationships_removed.is_some() && self.marker_cleared
    }
}

/// Per-user detail of a mark-as-parent pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkParentsReport {
    /// `(user, marked)` in input order.
    pub results: Vec<(UserId, bool)>,
}

impl MarkParentsReport {
    /// True iff every user ended up marked.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.results.iter().all(|(_, marked)| *marked)
    }
}

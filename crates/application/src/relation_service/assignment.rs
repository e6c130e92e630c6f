use parentmanager_domain::{RelationshipId, UserId};
use tracing::{info, warn};

use super::{
    AssignChildrenReport, ChildAssignment, ChildAssignmentOutcome, RelationService,
    RemoveChildReport,
};

impl RelationService {
    /// Relates every child in `child_ids` to the parent.
    ///
    /// Each id is attempted regardless of earlier failures. Existing pairs are
    /// left untouched and rows already inserted are never rolled back.
    pub async fn assign_children(
        &self,
        parent_id: UserId,
        child_ids: &[UserId],
    ) -> AssignChildrenReport {
        let mut assignments = Vec::with_capacity(child_ids.len());

        for &child_id in child_ids {
            let outcome = self.assign_child(parent_id, child_id).await;
            assignments.push(ChildAssignment { child_id, outcome });
        }

        let report = AssignChildrenReport {
            parent_id,
            assignments,
        };
        info!(
            %parent_id,
            requested = child_ids.len(),
            assigned = report.assigned_child_ids().len(),
            failed = report.failed_child_ids().len(),
            "assigned children"
        );

        report
    }

    async fn assign_child(&self, parent_id: UserId, child_id: UserId) -> ChildAssignmentOutcome {
        match self
            .relationships
            .relationship_exists(parent_id, child_id)
            .await
        {
            Ok(true) => return ChildAssignmentOutcome::AlreadyAssigned,
            Ok(false) => {}
            Err(error) => {
                warn!(%parent_id, %child_id, %error, "failed to check existing relationship");
                return ChildAssignmentOutcome::Failed(error.to_string());
            }
        }

        match self
            .relationships
            .insert_relationship(parent_id, child_id, Self::now())
            .await
        {
            Ok(relationship) => {
                let role_sync = self
                    .role_sync
                    .on_relationship_created(parent_id, child_id)
                    .await;
                ChildAssignmentOutcome::Assigned {
                    relationship,
                    role_sync,
                }
            }
            Err(error) => {
                warn!(%parent_id, %child_id, %error, "failed to insert relationship");
                ChildAssignmentOutcome::Failed(error.to_string())
            }
        }
    }

    /// Removes one relationship, revoking its role grant first.
    ///
    /// The delete runs even when the lookup finds nothing.
    pub async fn remove_child(&self, relationship_id: RelationshipId) -> RemoveChildReport {
        let relationship = match self.relationships.find_relationship(relationship_id).await {
            Ok(relationship) => relationship,
            Err(error) => {
                warn!(%relationship_id, %error, "failed to look up relationship");
                None
            }
        };

        let role_sync = match &relationship {
            Some(relationship) => Some(
                self.role_sync
                    .on_relationship_removed(relationship.parent_id(), relationship.child_id())
                    .await,
            ),
            None => None,
        };

        let rows_deleted = match self.relationships.delete_relationship(relationship_id).await {
            Ok(rows) => Some(rows),
            Err(error) => {
                warn!(%relationship_id, %error, "failed to delete relationship");
                None
            }
        };

        info!(%relationship_id, ?rows_deleted, "removed child");

        RemoveChildReport {
            relationship,
            role_sync,
            rows_deleted,
        }
    }
}

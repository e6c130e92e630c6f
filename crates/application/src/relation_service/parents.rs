use parentmanager_core::AppResult;
use parentmanager_domain::UserId;
use tracing::{info, warn};

use super::{MarkParentsReport, RelationService, RemoveParentReport};

impl RelationService {
    /// Sets or clears the parent marker. Repeating the current state is a no-op.
    ///
    /// Returns `false` if the store failed.
    pub async fn set_parent_status(&self, user_id: UserId, is_parent: bool) -> bool {
        match self.apply_parent_status(user_id, is_parent).await {
            Ok(()) => true,
            Err(error) => {
                warn!(%user_id, is_parent, %error, "failed to update parent status");
                false
            }
        }
    }

    async fn apply_parent_status(&self, user_id: UserId, is_parent: bool) -> AppResult<()> {
        if self.markers.is_parent(user_id).await? == is_parent {
            return Ok(());
        }

        if is_parent {
            self.markers.mark_parent(user_id, Self::now()).await
        } else {
            self.markers.clear_parent(user_id).await
        }
    }

    /// Marks every account as parent, attempting all of them.
    pub async fn mark_as_parents(&self, user_ids: &[UserId]) -> MarkParentsReport {
        let mut results = Vec::with_capacity(user_ids.len());
        for &user_id in user_ids {
            results.push((user_id, self.set_parent_status(user_id, true).await));
        }

        let report = MarkParentsReport { results };
        info!(
            requested = user_ids.len(),
            succeeded = report.succeeded(),
            "marked users as parents"
        );

        report
    }

    /// Removes parent status, cascading to every relationship of the parent.
    ///
    /// Grants are revoked first, then relationships deleted, then the marker
    /// cleared. Failures along the way are logged and processing continues,
    /// except a failed relationship listing, which leaves grants, rows and
    /// the marker untouched.
    pub async fn remove_parent(&self, parent_id: UserId) -> RemoveParentReport {
        let relationships = match self
            .relationships
            .list_relationships_for_parent(parent_id)
            .await
        {
            Ok(relationships) => relationships,
            Err(error) => {
                warn!(%parent_id, %error, "failed to list relationships of parent");
                return RemoveParentReport {
                    parent_id,
                    relationships_listed: false,
                    role_revocations: Vec::new(),
                    relationships_removed: None,
                    marker_cleared: false,
                };
            }
        };

        let mut role_revocations = Vec::with_capacity(relationships.len());
        for relationship in &relationships {
            let outcome = self
                .role_sync
                .on_relationship_removed(parent_id, relationship.child_id())
                .await;
            role_revocations.push((relationship.child_id(), outcome));
        }

        let relationships_removed = match self
            .relationships
            .delete_relationships_for_parent(parent_id)
            .await
        {
            Ok(rows) => Some(rows),
            Err(error) => {
                warn!(%parent_id, %error, "failed to delete relationships of parent");
                None
            }
        };

        let marker_cleared = self.set_parent_status(parent_id, false).await;

        info!(
            %parent_id,
            ?relationships_removed,
            marker_cleared,
            "removed parent"
        );

        RemoveParentReport {
            parent_id,
            relationships_listed: true,
            role_revocations,
            relationships_removed,
            marker_cleared,
        }
    }
}

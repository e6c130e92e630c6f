use std::sync::Arc;

use parentmanager_core::AppResult;
use parentmanager_domain::{ParentListQuery, UserId};

use crate::{
    CandidateUser, ChildSummary, ParentMarkerRepository, ParentPage, RelationshipRepository,
    RoleSyncService,
};

mod assignment;
mod parents;
mod reports;

pub use reports::{
    AssignChildrenReport, ChildAssignment, ChildAssignmentOutcome, MarkParentsReport,
    RemoveChildReport, RemoveParentReport,
};

/// Authoritative store operations for parent markers and relationships.
///
/// Mutations never return errors: every persistence failure is logged and
/// folded into the returned report. Nothing is rolled back.
#[derive(Clone)]
pub struct RelationService {
    markers: Arc<dyn ParentMarkerRepository>,
    relationships: Arc<dyn RelationshipRepository>,
    role_sync: RoleSyncService,
}

impl RelationService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        markers: Arc<dyn ParentMarkerRepository>,
        relationships: Arc<dyn RelationshipRepository>,
        role_sync: RoleSyncService,
    ) -> Self {
        Self {
            markers,
            relationships,
            role_sync,
        }
    }

    /// Lists one page of parents.
    pub async fn list_parents(&self, query: &ParentListQuery) -> AppResult<ParentPage> {
        self.markers.list_parents(query).await
    }

    /// Lists accounts that can still be marked as parent.
    pub async fn list_parent_candidates(&self) -> AppResult<Vec<CandidateUser>> {
        self.markers.list_parent_candidates().await
    }

    /// Lists children of a parent. Unknown parents have no children.
    pub async fn list_children(&self, parent_id: UserId) -> AppResult<Vec<ChildSummary>> {
        self.relationships.list_children(parent_id).await
    }

    /// Lists accounts that are neither parents nor anyone's child.
    pub async fn list_unassigned_candidates(
        &self,
        exclude_parent_id: Option<UserId>,
    ) -> AppResult<Vec<CandidateUser>> {
        self.relationships
            .list_unassigned_candidates(exclude_parent_id)
            .await
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }
}

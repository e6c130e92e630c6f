use std::sync::Arc;

use parentmanager_core::{AppError, AppResult, UserIdentity};
use parentmanager_domain::{Capability, ParentListQuery, RelationshipId, UserId};
use tracing::info;

use crate::{CandidateUser, CapabilityChecker, ChildSummary, ParentPage, RelationService};

/// Capability-gated entry points for parent administration.
///
/// Reads propagate store errors. Mutations reduce store failures to `false`
/// and only fail for authorization or validation problems.
#[derive(Clone)]
pub struct ParentManagerService {
    capability_checker: Arc<dyn CapabilityChecker>,
    relation_service: RelationService,
}

impl ParentManagerService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        capability_checker: Arc<dyn CapabilityChecker>,
        relation_service: RelationService,
    ) -> Self {
        Self {
            capability_checker,
            relation_service,
        }
    }

    /// Lists one page of parents with child counts.
    pub async fn list_parents(
        &self,
        actor: &UserIdentity,
        query: &ParentListQuery,
    ) -> AppResult<ParentPage> {
        self.require_manage(actor).await?;
        self.relation_service.list_parents(query).await
    }

    /// Lists accounts that can be marked as parent.
    pub async fn list_parent_candidates(
        &self,
        actor: &UserIdentity,
    ) -> AppResult<Vec<CandidateUser>> {
        self.require_manage(actor).await?;
        self.relation_service.list_parent_candidates().await
    }

    /// Lists children assigned to a parent.
    pub async fn get_children(
        &self,
        actor: &UserIdentity,
        parent_id: UserId,
    ) -> AppResult<Vec<ChildSummary>> {
        self.require_manage(actor).await?;
        self.relation_service.list_children(parent_id).await
    }

    /// Lists accounts that are free to be assigned as children.
    pub async fn get_unassigned_users(
        &self,
        actor: &UserIdentity,
        exclude_parent_id: Option<UserId>,
    ) -> AppResult<Vec<CandidateUser>> {
        self.require_manage(actor).await?;
        self.relation_service
            .list_unassigned_candidates(exclude_parent_id)
            .await
    }

    /// Assigns children to a parent. Returns `false` if any insert failed.
    pub async fn assign_children(
        &self,
        actor: &UserIdentity,
        parent_id: UserId,
        child_ids: &[UserId],
    ) -> AppResult<bool> {
        self.require_manage(actor).await?;
        if child_ids.is_empty() {
            return Err(AppError::Validation(
                "at least one child must be selected".to_owned(),
            ));
        }

        let report = self
            .relation_service
            .assign_children(parent_id, child_ids)
            .await;
        info!(
            actor = actor.subject(),
            %parent_id,
            assigned = report.assigned_child_ids().len(),
            failed = report.failed_child_ids().len(),
            "children assignment requested"
        );

        Ok(report.succeeded())
    }

    /// Removes one relationship. Unknown ids are not an error.
    pub async fn remove_child(
        &self,
        actor: &UserIdentity,
        relationship_id: RelationshipId,
    ) -> AppResult<bool> {
        self.require_manage(actor).await?;
        Ok(self
            .relation_service
            .remove_child(relationship_id)
            .await
            .succeeded())
    }

    /// Removes parent status and every relationship of the parent.
    pub async fn remove_parent(&self, actor: &UserIdentity, parent_id: UserId) -> AppResult<bool> {
        self.require_manage(actor).await?;
        Ok(self
            .relation_service
            .remove_parent(parent_id)
            .await
            .succeeded())
    }

    /// Marks the selected accounts as parents.
    pub async fn mark_as_parents(
        &self,
        actor: &UserIdentity,
        user_ids: &[UserId],
    ) -> AppResult<bool> {
        self.require_manage(actor).await?;
        if user_ids.is_empty() {
            return Err(AppError::Validation(
                "at least one user must be selected".to_owned(),
            ));
        }

        Ok(self
            .relation_service
            .mark_as_parents(user_ids)
            .await
            .succeeded())
    }

    async fn require_manage(&self, actor: &UserIdentity) -> AppResult<()> {
        self.capability_checker
            .require_capability(actor, Capability::ParentsManage)
            .await
    }
}

use std::sync::Arc;

use chrono::DateTime;
use parentmanager_core::{AppResult, UserIdentity};
use parentmanager_domain::{Capability, UserId};
use tracing::info;

use crate::{CapabilityChecker, PrivacyRepository, RelationshipSide, SubjectRelationshipRow};

/// One exported relationship, seen from the data subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedRelationship {
    /// The other account in the relationship.
    pub user_id: UserId,
    /// Display name of the other account.
    pub full_name: String,
    /// Relationship creation time in RFC3339.
    pub created_at: String,
}

/// Personal data held about one account.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserDataExport {
    /// Accounts this user is parent of.
    pub children: Vec<ExportedRelationship>,
    /// Accounts this user is child of.
    pub parents: Vec<ExportedRelationship>,
}

impl UserDataExport {
    /// Returns whether nothing is stored about the account.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.parents.is_empty()
    }
}

/// Export and erasure of relationship data for privacy requests.
///
/// Erasure removes relationship rows only; role grants stay with the host.
#[derive(Clone)]
pub struct PrivacyService {
    capability_checker: Arc<dyn CapabilityChecker>,
    repository: Arc<dyn PrivacyRepository>,
}

impl PrivacyService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        capability_checker: Arc<dyn CapabilityChecker>,
        repository: Arc<dyn PrivacyRepository>,
    ) -> Self {
        Self {
            capability_checker,
            repository,
        }
    }

    /// Exports relationships where the account is parent or child.
    pub async fn export_user_data(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
    ) -> AppResult<UserDataExport> {
        self.require_privacy(actor).await?;

        let rows = self
            .repository
            .list_relationships_for_subject(user_id)
            .await?;

        let mut export = UserDataExport::default();
        for row in rows {
            let side = row.side;
            let entry = exported(row);
            match side {
                RelationshipSide::Parent => export.children.push(entry),
                RelationshipSide::Child => export.parents.push(entry),
            }
        }

        Ok(export)
    }

    /// Deletes relationships where the account is parent or child.
    pub async fn delete_data_for_user(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
    ) -> AppResult<u64> {
        self.require_privacy(actor).await?;

        let deleted = self
            .repository
            .delete_relationships_for_subject(user_id)
            .await?;
        info!(actor = actor.subject(), %user_id, deleted, "erased relationship data for user");

        Ok(deleted)
    }

    /// Deletes every stored relationship.
    pub async fn delete_data_for_all_users(&self, actor: &UserIdentity) -> AppResult<u64> {
        self.require_privacy(actor).await?;

        let deleted = self.repository.delete_all_relationships().await?;
        info!(actor = actor.subject(), deleted, "erased all relationship data");

        Ok(deleted)
    }

    /// Lists accounts that appear in any relationship.
    pub async fn list_users_with_data(&self, actor: &UserIdentity) -> AppResult<Vec<UserId>> {
        self.require_privacy(actor).await?;
        self.repository.list_users_with_relationships().await
    }

    async fn require_privacy(&self, actor: &UserIdentity) -> AppResult<()> {
        self.capability_checker
            .require_capability(actor, Capability::PrivacyManage)
            .await
    }
}

fn exported(row: SubjectRelationshipRow) -> ExportedRelationship {
    ExportedRelationship {
        user_id: row.counterpart_id,
        full_name: row.counterpart_name.full_name(),
        created_at: DateTime::from_timestamp(row.created_at, 0)
            .map(|timestamp| timestamp.to_rfc3339())
            .unwrap_or_default(),
    }
}

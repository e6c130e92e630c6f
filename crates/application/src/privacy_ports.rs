use async_trait::async_trait;

use parentmanager_core::AppResult;
use parentmanager_domain::{PersonName, UserId};

/// Side of a relationship the data subject stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipSide {
    /// The subject is the parent; the counterpart is a child.
    Parent,
    /// The subject is the child; the counterpart is a parent.
    Child,
}

/// Stored relationship seen from one data subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectRelationshipRow {
    /// Side the subject stands on.
    pub side: RelationshipSide,
    /// The other account in the relationship.
    pub counterpart_id: UserId,
    /// Name of the other account.
    pub counterpart_name: PersonName,
    /// Creation time as a unix timestamp.
    pub created_at: i64,
}

/// Repository port for privacy export and erasure requests.
#[async_trait]
pub trait PrivacyRepository: Send + Sync {
    /// Lists every relationship the account takes part in, ordered by creation time.
    async fn list_relationships_for_subject(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<SubjectRelationshipRow>>;

    /// Lists accounts that appear in any relationship.
    async fn list_users_with_relationships(&self) -> AppResult<Vec<UserId>>;

    /// Deletes every relationship the account takes part in.
    async fn delete_relationships_for_subject(&self, user_id: UserId) -> AppResult<u64>;

    /// Deletes every relationship.
    async fn delete_all_relationships(&self) -> AppResult<u64>;
}

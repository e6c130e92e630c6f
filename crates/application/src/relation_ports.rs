use async_trait::async_trait;

use parentmanager_core::AppResult;
use parentmanager_domain::{ParentListQuery, PersonName, Relationship, RelationshipId, UserId};

/// Row of the parent listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentSummary {
    /// Parent account.
    pub user_id: UserId,
    /// Parent name.
    pub name: PersonName,
    /// Parent email.
    pub email: String,
    /// Last access as a unix timestamp, `None` if the account never signed in.
    pub last_access: Option<i64>,
    /// Number of children currently assigned.
    pub child_count: i64,
}

/// One page of the parent listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParentPage {
    /// Parents on the requested page.
    pub parents: Vec<ParentSummary>,
    /// Number of parents matching the filter across all pages.
    pub total: u64,
}

/// Child assigned to a parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildSummary {
    /// Child account.
    pub user_id: UserId,
    /// Relationship row linking the child to the parent.
    pub relationship_id: RelationshipId,
    /// Child name.
    pub name: PersonName,
    /// Child email.
    pub email: String,
}

/// Account offered in a selection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateUser {
    /// Account identifier.
    pub user_id: UserId,
    /// Account name.
    pub name: PersonName,
    /// Account email.
    pub email: String,
}

/// Repository port for the parent membership marker and the parent listing.
#[async_trait]
pub trait ParentMarkerRepository: Send + Sync {
    /// Lists one page of active parents with their child counts.
    async fn list_parents(&self, query: &ParentListQuery) -> AppResult<ParentPage>;

    /// Lists active accounts not currently marked as parent, ordered by name.
    async fn list_parent_candidates(&self) -> AppResult<Vec<CandidateUser>>;

    /// Returns whether the account carries the parent marker.
    async fn is_parent(&self, user_id: UserId) -> AppResult<bool>;

    /// Adds the parent marker. `now` is a unix timestamp.
    async fn mark_parent(&self, user_id: UserId, now: i64) -> AppResult<()>;

    /// Removes the parent marker.
    async fn clear_parent(&self, user_id: UserId) -> AppResult<()>;
}

/// Repository port for parent/child relationship rows.
#[async_trait]
pub trait RelationshipRepository: Send + Sync {
    /// Lists active children of a parent ordered by last name, first name.
    async fn list_children(&self, parent_id: UserId) -> AppResult<Vec<ChildSummary>>;

    /// Lists active accounts that are neither parents nor assigned as anyone's child.
    async fn list_unassigned_candidates(
        &self,
        exclude_parent_id: Option<UserId>,
    ) -> AppResult<Vec<CandidateUser>>;

    /// Returns whether the pair is already related.
    async fn relationship_exists(&self, parent_id: UserId, child_id: UserId) -> AppResult<bool>;

    /// Inserts a relationship row. `created_at` is a unix timestamp.
    async fn insert_relationship(
        &self,
        parent_id: UserId,
        child_id: UserId,
        created_at: i64,
    ) -> AppResult<Relationship>;

    /// Finds one relationship row.
    async fn find_relationship(
        &self,
        relationship_id: RelationshipId,
    ) -> AppResult<Option<Relationship>>;

    /// Deletes one relationship row and returns the number of rows removed.
    async fn delete_relationship(&self, relationship_id: RelationshipId) -> AppResult<u64>;

    /// Lists every relationship where the account is the parent.
    async fn list_relationships_for_parent(&self, parent_id: UserId)
    -> AppResult<Vec<Relationship>>;

    /// Deletes every relationship where the account is the parent.
    async fn delete_relationships_for_parent(&self, parent_id: UserId) -> AppResult<u64>;
}

use super::*;

use parentmanager_application::{ChildSummary, RelationshipRepository};
use parentmanager_core::AppError;

#[async_trait]
impl RelationshipRepository for InMemoryParentRepository {
    async fn list_children(&self, parent_id: UserId) -> AppResult<Vec<ChildSummary>> {
        let state = self.state.read().await;

        let mut children: Vec<ChildSummary> = state
            .relationships
            .values()
            .filter(|relationship| relationship.parent_id() == parent_id)
            .filter_map(|relationship| {
                let child = state
                    .users
                    .get(&relationship.child_id())
                    .filter(|user| !user.deleted)?;
                Some(ChildSummary {
                    user_id: relationship.child_id(),
                    relationship_id: relationship.id(),
                    name: child.name.clone(),
                    email: child.email.clone(),
                })
            })
            .collect();
        children.sort_by(|left, right| compare_names(&left.name, &right.name));

        Ok(children)
    }

    async fn list_unassigned_candidates(
        &self,
        exclude_parent_id: Option<UserId>,
    ) -> AppResult<Vec<CandidateUser>> {
        let state = self.state.read().await;

        let mut candidates: Vec<CandidateUser> = state
            .active_users()
            .filter(|(user_id, _)| {
                Some(**user_id) != exclude_parent_id
                    && !state.markers.contains(user_id)
                    && !state
                        .relationships
                        .values()
                        .any(|relationship| relationship.child_id() == **user_id)
            })
            .map(|(user_id, user)| InMemoryParentState::candidate(*user_id, user))
            .collect();
        candidates.sort_by(|left, right| compare_names(&left.name, &right.name));

        Ok(candidates)
    }

    async fn relationship_exists(&self, parent_id: UserId, child_id: UserId) -> AppResult<bool> {
        Ok(self.state.read().await.relationships.values().any(|relationship| {
            relationship.parent_id() == parent_id && relationship.child_id() == child_id
        }))
    }

    async fn insert_relationship(
        &self,
        parent_id: UserId,
        child_id: UserId,
        created_at: i64,
    ) -> AppResult<Relationship> {
        let mut state = self.state.write().await;

        if parent_id == child_id {
            return Err(AppError::Conflict(format!(
                "user '{parent_id}' cannot be their own child"
            )));
        }
        if !state.users.contains_key(&parent_id) || !state.users.contains_key(&child_id) {
            return Err(AppError::NotFound(format!(
                "user '{parent_id}' or '{child_id}' does not exist"
            )));
        }
        if state.relationships.values().any(|relationship| {
            relationship.parent_id() == parent_id && relationship.child_id() == child_id
        }) {
            return Err(AppError::Conflict(format!(
                "user '{child_id}' is already a child of '{parent_id}'"
            )));
        }

        state.next_relationship_id += 1;
        let relationship = Relationship::new(
            RelationshipId::from_i64(state.next_relationship_id),
            parent_id,
            child_id,
            created_at,
        );
        state
            .relationships
            .insert(relationship.id(), relationship.clone());

        Ok(relationship)
    }

    async fn find_relationship(
        &self,
        relationship_id: RelationshipId,
    ) -> AppResult<Option<Relationship>> {
        Ok(self
            .state
            .read()
            .await
            .relationships
            .get(&relationship_id)
            .cloned())
    }

    async fn delete_relationship(&self, relationship_id: RelationshipId) -> AppResult<u64> {
        let removed = self
            .state
            .write()
            .await
            .relationships
            .remove(&relationship_id);
        Ok(u64::from(removed.is_some()))
    }

    async fn list_relationships_for_parent(
        &self,
        parent_id: UserId,
    ) -> AppResult<Vec<Relationship>> {
        Ok(self
            .state
            .read()
            .await
            .relationships
            .values()
            .filter(|relationship| relationship.parent_id() == parent_id)
            .cloned()
            .collect())
    }

    async fn delete_relationships_for_parent(&self, parent_id: UserId) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let before = state.relationships.len();
        state
            .relationships
            .retain(|_, relationship| relationship.parent_id() != parent_id);
        Ok((before - state.relationships.len()) as u64)
    }
}

use super::*;

use parentmanager_application::{PrivacyRepository, RelationshipSide, SubjectRelationshipRow};

#[async_trait]
impl PrivacyRepository for InMemoryParentRepository {
    async fn list_relationships_for_subject(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<SubjectRelationshipRow>> {
        let state = self.state.read().await;

        let mut rows: Vec<SubjectRelationshipRow> = state
            .relationships
            .values()
            .filter_map(|relationship| {
                let (side, counterpart_id) = if relationship.parent_id() == user_id {
                    (RelationshipSide::Parent, relationship.child_id())
                } else if relationship.child_id() == user_id {
                    (RelationshipSide::Child, relationship.parent_id())
                } else {
                    return None;
                };
                let counterpart = state.users.get(&counterpart_id)?;
                Some(SubjectRelationshipRow {
                    side,
                    counterpart_id,
                    counterpart_name: counterpart.name.clone(),
                    created_at: relationship.created_at(),
                })
            })
            .collect();
        rows.sort_by_key(|row| (row.created_at, row.counterpart_id));

        Ok(rows)
    }

    async fn list_users_with_relationships(&self) -> AppResult<Vec<UserId>> {
        let state = self.state.read().await;
        let users: BTreeSet<UserId> = state
            .relationships
            .values()
            .flat_map(|relationship| [relationship.parent_id(), relationship.child_id()])
            .collect();
        Ok(users.into_iter().collect())
    }

    async fn delete_relationships_for_subject(&self, user_id: UserId) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let before = state.relationships.len();
        state
            .relationships
            .retain(|_, relationship| !relationship.involves(user_id));
        Ok((before - state.relationships.len()) as u64)
    }

    async fn delete_all_relationships(&self) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let deleted = state.relationships.len() as u64;
        state.relationships.clear();
        Ok(deleted)
    }
}

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use parentmanager_application::{CandidateUser, ParentMarkerRepository, ParentPage, ParentSummary};
use parentmanager_core::{AppError, AppResult};
use parentmanager_domain::{
    ParentListQuery, ParentSortColumn, PersonName, Relationship, RelationshipId, SortDirection,
    UserId,
};
use tokio::sync::RwLock;

mod privacy;
mod relationships;

/// Host account as the in-memory store keeps it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HostUser {
    name: PersonName,
    email: String,
    last_access: Option<i64>,
    deleted: bool,
}

#[derive(Debug, Default)]
struct InMemoryParentState {
    users: BTreeMap<UserId, HostUser>,
    markers: BTreeSet<UserId>,
    relationships: BTreeMap<RelationshipId, Relationship>,
    next_user_id: i64,
    next_relationship_id: i64,
}

impl InMemoryParentState {
    fn active_users(&self) -> impl Iterator<Item = (&UserId, &HostUser)> {
        self.users.iter().filter(|(_, user)| !user.deleted)
    }

    fn child_count(&self, parent_id: UserId) -> i64 {
        self.relationships
            .values()
            .filter(|relationship| relationship.parent_id() == parent_id)
            .count() as i64
    }

    fn candidate(user_id: UserId, user: &HostUser) -> CandidateUser {
        CandidateUser {
            user_id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// In-memory store for host accounts, parent markers and relationships.
#[derive(Debug, Default)]
pub struct InMemoryParentRepository {
    state: RwLock<InMemoryParentState>,
}

impl InMemoryParentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an active host account and returns its id.
    pub async fn insert_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        last_access: Option<i64>,
    ) -> UserId {
        let mut state = self.state.write().await;
        state.next_user_id += 1;
        let user_id = UserId::from_i64(state.next_user_id);
        state.users.insert(
            user_id,
            HostUser {
                name: PersonName::new(first_name, last_name),
                email: email.to_owned(),
                last_access,
                deleted: false,
            },
        );
        user_id
    }

    /// Flags a host account as deleted, hiding it from every listing.
    pub async fn mark_user_deleted(&self, user_id: UserId) {
        if let Some(user) = self.state.write().await.users.get_mut(&user_id) {
            user.deleted = true;
        }
    }
}

fn compare_parents(
    sort: ParentSortColumn,
    left: &ParentSummary,
    right: &ParentSummary,
) -> Ordering {
    match sort {
        ParentSortColumn::FirstName => left.name.first_name().cmp(right.name.first_name()),
        ParentSortColumn::LastName => left.name.last_name().cmp(right.name.last_name()),
        ParentSortColumn::Email => left.email.cmp(&right.email),
        ParentSortColumn::ChildCount => left.child_count.cmp(&right.child_count),
        ParentSortColumn::LastAccess => left
            .last_access
            .unwrap_or_default()
            .cmp(&right.last_access.unwrap_or_default()),
    }
}

fn compare_names(left: &PersonName, right: &PersonName) -> Ordering {
    left.last_name()
        .cmp(right.last_name())
        .then_with(|| left.first_name().cmp(right.first_name()))
}

#[async_trait]
impl ParentMarkerRepository for InMemoryParentRepository {
    async fn list_parents(&self, query: &ParentListQuery) -> AppResult<ParentPage> {
        let state = self.state.read().await;

        let mut parents: Vec<ParentSummary> = state
            .markers
            .iter()
            .filter_map(|user_id| {
                let user = state.users.get(user_id).filter(|user| !user.deleted)?;
                query
                    .matches(&user.name, &user.email)
                    .then(|| ParentSummary {
                        user_id: *user_id,
                        name: user.name.clone(),
                        email: user.email.clone(),
                        last_access: user.last_access,
                        child_count: state.child_count(*user_id),
                    })
            })
            .collect();

        parents.sort_by(|left, right| {
            let ordering = compare_parents(query.sort(), left, right);
            let ordering = match query.direction() {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            ordering.then_with(|| left.user_id.cmp(&right.user_id))
        });

        let total = parents.len() as u64;
        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let parents = parents
            .into_iter()
            .skip(offset)
            .take(query.per_page() as usize)
            .collect();

        Ok(ParentPage { parents, total })
    }

    async fn list_parent_candidates(&self) -> AppResult<Vec<CandidateUser>> {
        let state = self.state.read().await;

        let mut candidates: Vec<CandidateUser> = state
            .active_users()
            .filter(|(user_id, _)| !state.markers.contains(user_id))
            .map(|(user_id, user)| InMemoryParentState::candidate(*user_id, user))
            .collect();
        candidates.sort_by(|left, right| compare_names(&left.name, &right.name));

        Ok(candidates)
    }

    async fn is_parent(&self, user_id: UserId) -> AppResult<bool> {
        Ok(self.state.read().await.markers.contains(&user_id))
    }

    async fn mark_parent(&self, user_id: UserId, _now: i64) -> AppResult<()> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&user_id) {
            return Err(AppError::NotFound(format!("user '{user_id}' does not exist")));
        }
        state.markers.insert(user_id);
        Ok(())
    }

    async fn clear_parent(&self, user_id: UserId) -> AppResult<()> {
        self.state.write().await.markers.remove(&user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests;

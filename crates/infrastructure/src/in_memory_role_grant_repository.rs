use async_trait::async_trait;
use parentmanager_application::RoleGrantRepository;
use parentmanager_core::AppResult;
use parentmanager_domain::{RoleGrant, RoleId, UserId};
use tokio::sync::RwLock;

/// In-memory stand-in for the host role assignment table.
#[derive(Debug, Default)]
pub struct InMemoryRoleGrantRepository {
    grants: RwLock<Vec<RoleGrant>>,
}

impl InMemoryRoleGrantRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every stored grant in insertion order.
    pub async fn grants(&self) -> Vec<RoleGrant> {
        self.grants.read().await.clone()
    }
}

#[async_trait]
impl RoleGrantRepository for InMemoryRoleGrantRepository {
    async fn has_role(
        &self,
        role_id: RoleId,
        user_id: UserId,
        scope_user_id: UserId,
    ) -> AppResult<bool> {
        Ok(self.grants.read().await.iter().any(|grant| {
            grant.role_id() == role_id
                && grant.user_id() == user_id
                && grant.scope_user_id() == scope_user_id
        }))
    }

    async fn create_grant(&self, grant: &RoleGrant) -> AppResult<()> {
        self.grants.write().await.push(grant.clone());
        Ok(())
    }

    async fn remove_grant(&self, grant: &RoleGrant) -> AppResult<u64> {
        let mut grants = self.grants.write().await;
        let before = grants.len();
        grants.retain(|stored| stored != grant);
        Ok((before - grants.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use parentmanager_application::RoleGrantRepository;
    use parentmanager_domain::{RoleGrant, RoleId, UserId};

    use super::InMemoryRoleGrantRepository;

    #[tokio::test]
    async fn has_role_ignores_component_but_removal_does_not() {
        let repository = InMemoryRoleGrantRepository::new();
        let role = RoleId::from_i64(3);
        let (parent, child) = (UserId::from_i64(1), UserId::from_i64(2));
        let manual = RoleGrant::new(role, parent, child, "manual");

        assert!(repository.create_grant(&manual).await.is_ok());
        assert!(matches!(repository.has_role(role, parent, child).await, Ok(true)));

        let owned = RoleGrant::for_parent(role, parent, child);
        assert!(matches!(repository.remove_grant(&owned).await, Ok(0)));
        assert_eq!(repository.grants().await, vec![manual]);
    }
}

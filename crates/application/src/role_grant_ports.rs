use async_trait::async_trait;

use parentmanager_core::AppResult;
use parentmanager_domain::{RoleGrant, RoleId, UserId};

/// Port onto the host access-control store.
#[async_trait]
pub trait RoleGrantRepository: Send + Sync {
    /// Returns whether `user_id` holds `role_id` in the context of `scope_user_id`,
    /// whichever component created the grant.
    async fn has_role(
        &self,
        role_id: RoleId,
        user_id: UserId,
        scope_user_id: UserId,
    ) -> AppResult<bool>;

    /// Creates a grant.
    async fn create_grant(&self, grant: &RoleGrant) -> AppResult<()>;

    /// Removes the grant matching every field of `grant`, component included.
    ///
    /// Returns the number of grants removed.
    async fn remove_grant(&self, grant: &RoleGrant) -> AppResult<u64>;
}

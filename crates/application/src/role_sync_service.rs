use std::sync::Arc;

use parentmanager_domain::{RoleGrant, RoleSyncSettings, UserId};
use tracing::{debug, warn};

use crate::RoleGrantRepository;

/// What role synchronization did in reaction to one relationship change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleSyncOutcome {
    /// Configuration disables synchronization for this change.
    Skipped,
    /// The parent already held the role in the child's context.
    AlreadyGranted,
    /// A new grant was created.
    Granted,
    /// The component-tagged grant was removed (or was already absent).
    Revoked,
    /// The access-control store rejected the change.
    Failed(String),
}

impl RoleSyncOutcome {
    /// Returns whether the store reported an error.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Mirrors relationship changes into host role grants.
#[derive(Clone)]
pub struct RoleSyncService {
    settings: RoleSyncSettings,
    role_grants: Arc<dyn RoleGrantRepository>,
}

impl RoleSyncService {
    /// Creates a service bound to a fixed configuration snapshot.
    #[must_use]
    pub fn new(settings: RoleSyncSettings, role_grants: Arc<dyn RoleGrantRepository>) -> Self {
        Self {
            settings,
            role_grants,
        }
    }

    /// Grants the parent role in the child's context after a relationship is created.
    pub async fn on_relationship_created(
        &self,
        parent_id: UserId,
        child_id: UserId,
    ) -> RoleSyncOutcome {
        let Some(role_id) = self.settings.role_to_grant() else {
            return RoleSyncOutcome::Skipped;
        };

        match self.role_grants.has_role(role_id, parent_id, child_id).await {
            Ok(true) => return RoleSyncOutcome::AlreadyGranted,
            Ok(false) => {}
            Err(error) => {
                warn!(%parent_id, %child_id, %role_id, %error, "failed to check parent role grant");
                return RoleSyncOutcome::Failed(error.to_string());
            }
        }

        let grant = RoleGrant::for_parent(role_id, parent_id, child_id);
        match self.role_grants.create_grant(&grant).await {
            Ok(()) => {
                debug!(%parent_id, %child_id, %role_id, "granted parent role");
                RoleSyncOutcome::Granted
            }
            Err(error) => {
                warn!(%parent_id, %child_id, %role_id, %error, "failed to assign parent role");
                RoleSyncOutcome::Failed(error.to_string())
            }
        }
    }

    /// Revokes this component's parent role grant before a relationship is removed.
    ///
    /// Runs whenever a role is configured, even with auto-assign switched off.
    pub async fn on_relationship_removed(
        &self,
        parent_id: UserId,
        child_id: UserId,
    ) -> RoleSyncOutcome {
        let Some(role_id) = self.settings.role_to_revoke() else {
            return RoleSyncOutcome::Skipped;
        };

        let grant = RoleGrant::for_parent(role_id, parent_id, child_id);
        match self.role_grants.remove_grant(&grant).await {
            Ok(removed) => {
                debug!(%parent_id, %child_id, %role_id, removed, "revoked parent role");
                RoleSyncOutcome::Revoked
            }
            Err(error) => {
                warn!(%parent_id, %child_id, %role_id, %error, "failed to unassign parent role");
                RoleSyncOutcome::Failed(error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::UserId;

/// Component tag stamped on every grant this system creates.
///
/// Removal only ever targets grants carrying this tag.
pub const PARENT_MANAGER_COMPONENT: &str = "parentmanager";

/// Identifier of a host access-control role. Zero means "no role".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleId(i64);

impl RoleId {
    /// Creates a role identifier from a configured value.
    #[must_use]
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Returns whether the value names a real role.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.0 > 0
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A role held by `user_id` inside the personal context of `scope_user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleGrant {
    role_id: RoleId,
    user_id: UserId,
    scope_user_id: UserId,
    component: String,
}

impl RoleGrant {
    /// Creates a grant tuple with an explicit component tag.
    #[must_use]
    pub fn new(
        role_id: RoleId,
        user_id: UserId,
        scope_user_id: UserId,
        component: impl Into<String>,
    ) -> Self {
        Self {
            role_id,
            user_id,
            scope_user_id,
            component: component.into(),
        }
    }

    /// Creates the grant a parent receives in its child's context.
    #[must_use]
    pub fn for_parent(role_id: RoleId, parent_id: UserId, child_id: UserId) -> Self {
        Self::new(role_id, parent_id, child_id, PARENT_MANAGER_COMPONENT)
    }

    /// Returns the granted role.
    #[must_use]
    pub fn role_id(&self) -> RoleId {
        self.role_id
    }

    /// Returns the user holding the role.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the user whose personal context scopes the grant.
    #[must_use]
    pub fn scope_user_id(&self) -> UserId {
        self.scope_user_id
    }

    /// Returns the component tag.
    #[must_use]
    pub fn component(&self) -> &str {
        self.component.as_str()
    }

    /// Returns whether this system owns the grant.
    #[must_use]
    pub fn is_owned_by_parent_manager(&self) -> bool {
        self.component == PARENT_MANAGER_COMPONENT
    }
}

/// Administrator configuration driving role synchronization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSyncSettings {
    auto_role_assign_enabled: bool,
    parent_role_id: RoleId,
}

impl RoleSyncSettings {
    /// Creates settings from configured values.
    #[must_use]
    pub fn new(auto_role_assign_enabled: bool, parent_role_id: RoleId) -> Self {
        Self {
            auto_role_assign_enabled,
            parent_role_id,
        }
    }

    /// Settings with synchronization fully switched off.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(false, RoleId::from_i64(0))
    }

    /// Returns whether new relationships should grant the role.
    #[must_use]
    pub fn auto_role_assign_enabled(&self) -> bool {
        self.auto_role_assign_enabled
    }

    /// Returns the configured parent role.
    #[must_use]
    pub fn parent_role_id(&self) -> RoleId {
        self.parent_role_id
    }

    /// Role to grant when a relationship is created.
    ///
    /// Requires both the auto-assign flag and a configured role.
    #[must_use]
    pub fn role_to_grant(&self) -> Option<RoleId> {
        (self.auto_role_assign_enabled && self.parent_role_id.is_configured())
            .then_some(self.parent_role_id)
    }

    /// Role to revoke when a relationship is removed.
    ///
    /// Only the configured role is consulted; the auto-assign flag is ignored.
    #[must_use]
    pub fn role_to_revoke(&self) -> Option<RoleId> {
        self.parent_role_id
            .is_configured()
            .then_some(self.parent_role_id)
    }
}

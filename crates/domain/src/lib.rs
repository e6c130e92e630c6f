//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod listing;
mod relationship;
mod role_grant;
mod security;
mod user;

pub use listing::{
    DEFAULT_PARENTS_PER_PAGE, MAX_PARENTS_PER_PAGE, ParentListQuery, ParentSortColumn,
    SortDirection,
};
pub use relationship::{Relationship, RelationshipId};
pub use role_grant::{PARENT_MANAGER_COMPONENT, RoleGrant, RoleId, RoleSyncSettings};
pub use security::Capability;
pub use user::{PersonName, UserId};

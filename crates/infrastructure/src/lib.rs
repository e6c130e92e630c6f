//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_authorization_repository;
mod in_memory_parent_repository;
mod in_memory_role_grant_repository;
mod postgres_authorization_repository;
mod postgres_parent_marker_repository;
mod postgres_privacy_repository;
mod postgres_relationship_repository;
mod postgres_role_grant_repository;

#[cfg(test)]
mod test_support;

pub use in_memory_authorization_repository::InMemoryAuthorizationRepository;
pub use in_memory_parent_repository::InMemoryParentRepository;
pub use in_memory_role_grant_repository::InMemoryRoleGrantRepository;
pub use postgres_authorization_repository::PostgresAuthorizationRepository;
pub use postgres_parent_marker_repository::PostgresParentMarkerRepository;
pub use postgres_privacy_repository::PostgresPrivacyRepository;
pub use postgres_relationship_repository::PostgresRelationshipRepository;
pub use postgres_role_grant_repository::PostgresRoleGrantRepository;

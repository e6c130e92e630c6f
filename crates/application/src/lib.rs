//! Application services and ports.

#![forbid(unsafe_code)]

mod authorization_service;
mod parent_manager_service;
mod privacy_ports;
mod privacy_service;
mod relation_ports;
mod relation_service;
mod role_grant_ports;
mod role_sync_service;

pub use authorization_service::{AuthorizationRepository, AuthorizationService, CapabilityChecker};
pub use parent_manager_service::ParentManagerService;
pub use privacy_ports::{PrivacyRepository, RelationshipSide, SubjectRelationshipRow};
pub use privacy_service::{ExportedRelationship, PrivacyService, UserDataExport};
pub use relation_ports::{
    CandidateUser, ChildSummary, ParentMarkerRepository, ParentPage, ParentSummary,
    RelationshipRepository,
};
pub use relation_service::{
    AssignChildrenReport, ChildAssignment, ChildAssignmentOutcome, MarkParentsReport,
    RelationService, RemoveChildReport, RemoveParentReport,
};
pub use role_grant_ports::RoleGrantRepository;
pub use role_sync_service::{RoleSyncOutcome, RoleSyncService};

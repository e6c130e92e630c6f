mod common;
mod parents;
mod privacy;

pub use common::{
    BootstrapRequest, HealthDependencyStatus, HealthResponse, SuccessResponse,
    UserIdentityResponse,
};
pub use parents::{
    AssignChildrenRequest, CandidateListResponse, CandidateUserResponse, ChildListResponse,
    ChildResponse, MarkParentsRequest, ParentListParams, ParentListResponse, ParentResponse,
    UnassignedUsersParams,
};
pub use privacy::{
    ExportedRelationshipResponse, PrivacyDeletionResponse, UserDataExportResponse,
    UsersWithDataResponse,
};

mod conversions;
mod types;

pub use types::{
    AssignChildrenRequest, CandidateListResponse, CandidateUserResponse, ChildListResponse,
    ChildResponse, MarkParentsRequest, ParentListParams, ParentListResponse, ParentResponse,
    UnassignedUsersParams,
};

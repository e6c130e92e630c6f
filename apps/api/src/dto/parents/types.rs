use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query string of the parent listing.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/parent-list-params.ts"
)]
pub struct ParentListParams {
    pub page: Option<u32>,
    pub perpage: Option<u32>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub dir: Option<String>,
}

/// One row of the parent listing.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/parent-response.ts"
)]
pub struct ParentResponse {
    pub id: i64,
    pub fullname: String,
    pub email: String,
    pub childcount: i64,
    /// Unix timestamp, `null` for accounts that never signed in.
    pub lastaccess: Option<i64>,
}

/// One page of the parent listing.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/parent-list-response.ts"
)]
pub struct ParentListResponse {
    pub parents: Vec<ParentResponse>,
    pub total: u64,
    pub page: u32,
    pub perpage: u32,
}

/// Account offered for selection.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/candidate-user-response.ts"
)]
pub struct CandidateUserResponse {
    pub id: i64,
    pub fullname: String,
    pub email: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/candidate-list-response.ts"
)]
pub struct CandidateListResponse {
    pub users: Vec<CandidateUserResponse>,
}

/// Child assigned to a parent.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/child-response.ts"
)]
pub struct ChildResponse {
    pub id: i64,
    pub relationid: i64,
    pub fullname: String,
    pub email: String,
    pub profileurl: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/child-list-response.ts"
)]
pub struct ChildListResponse {
    pub children: Vec<ChildResponse>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/unassigned-users-params.ts"
)]
pub struct UnassignedUsersParams {
    pub exclude_parent_id: Option<i64>,
}

/// Incoming payload for relating children to a parent.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/assign-children-request.ts"
)]
pub struct AssignChildrenRequest {
    pub childids: Vec<i64>,
}

/// Incoming payload for marking accounts as parents.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/mark-parents-request.ts"
)]
pub struct MarkParentsRequest {
    pub userids: Vec<i64>,
}

use parentmanager_application::{ExportedRelationship, UserDataExport};
use parentmanager_domain::UserId;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/exported-relationship-response.ts"
)]
pub struct ExportedRelationshipResponse {
    pub id: i64,
    pub fullname: String,
    /// RFC3339 creation time.
    pub timecreated: String,
}

/// Relationship data stored about one account.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-data-export-response.ts"
)]
pub struct UserDataExportResponse {
    pub userid: i64,
    pub children: Vec<ExportedRelationshipResponse>,
    pub parents: Vec<ExportedRelationshipResponse>,
}

#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/privacy-deletion-response.ts"
)]
pub struct PrivacyDeletionResponse {
    pub deleted: u64,
}

#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/users-with-data-response.ts"
)]
pub struct UsersWithDataResponse {
    pub userids: Vec<i64>,
}

impl From<ExportedRelationship> for ExportedRelationshipResponse {
    fn from(value: ExportedRelationship) -> Self {
        Self {
            id: value.user_id.as_i64(),
            fullname: value.full_name,
            timecreated: value.created_at,
        }
    }
}

impl UserDataExportResponse {
    pub fn new(user_id: UserId, export: UserDataExport) -> Self {
        Self {
            userid: user_id.as_i64(),
            children: export.children.into_iter().map(Into::into).collect(),
            parents: export.parents.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Vec<UserId>> for UsersWithDataResponse {
    fn from(value: Vec<UserId>) -> Self {
        Self {
            userids: value.into_iter().map(|user_id| user_id.as_i64()).collect(),
        }
    }
}

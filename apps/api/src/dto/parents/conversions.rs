use parentmanager_application::{CandidateUser, ChildSummary, ParentSummary};

use crate::profile_links::ProfileLinks;

use super::types::{CandidateUserResponse, ChildResponse, ParentResponse};

impl From<ParentSummary> for ParentResponse {
    fn from(value: ParentSummary) -> Self {
        Self {
            id: value.user_id.as_i64(),
            fullname: value.name.full_name(),
            email: value.email,
            childcount: value.child_count,
            lastaccess: value.last_access,
        }
    }
}

impl From<CandidateUser> for CandidateUserResponse {
    fn from(value: CandidateUser) -> Self {
        Self {
            id: value.user_id.as_i64(),
            fullname: value.name.full_name(),
            email: value.email,
        }
    }
}

impl ChildResponse {
    /// Builds the response row, linking to the child's host profile.
    pub fn from_summary(value: ChildSummary, profile_links: &ProfileLinks) -> Self {
        Self {
            id: value.user_id.as_i64(),
            relationid: value.relationship_id.as_i64(),
            fullname: value.name.full_name(),
            email: value.email,
            profileurl: profile_links.profile_url(value.user_id),
        }
    }
}

use axum::Json;
use axum::extract::{Extension, Path, Query, State};

use parentmanager_core::{AppResult, UserIdentity};
use parentmanager_domain::{ParentListQuery, ParentSortColumn, SortDirection, UserId};

use crate::dto::{
    AssignChildrenRequest, CandidateListResponse, CandidateUserResponse, ChildListResponse,
    ChildResponse, MarkParentsRequest, ParentListParams, ParentListResponse, ParentResponse,
    SuccessResponse, UnassignedUsersParams,
};
use crate::error::ApiResult;
use crate::state::AppState;

mod children;
mod listing;

pub use children::{
    assign_children_handler, get_children_handler, remove_child_handler, unassigned_users_handler,
};
pub use listing::{
    list_parent_candidates_handler, list_parents_handler, mark_parents_handler,
    remove_parent_handler,
};
#[cfg(test)]
use listing::parent_list_query;

fn user_ids_from_transport(values: &[i64]) -> AppResult<Vec<UserId>> {
    values.iter().copied().map(UserId::from_transport).collect()
}

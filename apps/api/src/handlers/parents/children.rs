use super::*;

use parentmanager_domain::RelationshipId;

pub async fn get_children_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(parent_id): Path<i64>,
) -> ApiResult<Json<ChildListResponse>> {
    let parent_id = UserId::from_transport(parent_id)?;
    let children = state
        .parent_manager_service
        .get_children(&user, parent_id)
        .await?
        .into_iter()
        .map(|child| ChildResponse::from_summary(child, &state.profile_links))
        .collect();

    Ok(Json(ChildListResponse { children }))
}

pub async fn unassigned_users_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(params): Query<UnassignedUsersParams>,
) -> ApiResult<Json<CandidateListResponse>> {
    let exclude_parent_id = params
        .exclude_parent_id
        .map(UserId::from_transport)
        .transpose()?;
    let users = state
        .parent_manager_service
        .get_unassigned_users(&user, exclude_parent_id)
        .await?
        .into_iter()
        .map(CandidateUserResponse::from)
        .collect();

    Ok(Json(CandidateListResponse { users }))
}

pub async fn assign_children_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(parent_id): Path<i64>,
    Json(payload): Json<AssignChildrenRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let parent_id = UserId::from_transport(parent_id)?;
    let child_ids = user_ids_from_transport(&payload.childids)?;
    let success = state
        .parent_manager_service
        .assign_children(&user, parent_id, &child_ids)
        .await?;

    Ok(Json(SuccessResponse { success }))
}

pub async fn remove_child_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(relation_id): Path<i64>,
) -> ApiResult<Json<SuccessResponse>> {
    let relationship_id = RelationshipId::from_transport(relation_id)?;
    let success = state
        .parent_manager_service
        .remove_child(&user, relationship_id)
        .await?;

    Ok(Json(SuccessResponse { success }))
}

use super::*;

pub async fn list_parents_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(params): Query<ParentListParams>,
) -> ApiResult<Json<ParentListResponse>> {
    let query = parent_list_query(params, state.parents_per_page);
    let page = state
        .parent_manager_service
        .list_parents(&user, &query)
        .await?;

    Ok(Json(ParentListResponse {
        parents: page.parents.into_iter().map(ParentResponse::from).collect(),
        total: page.total,
        page: query.page(),
        perpage: query.per_page(),
    }))
}

pub async fn list_parent_candidates_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<CandidateListResponse>> {
    let users = state
        .parent_manager_service
        .list_parent_candidates(&user)
        .await?
        .into_iter()
        .map(CandidateUserResponse::from)
        .collect();

    Ok(Json(CandidateListResponse { users }))
}

pub async fn mark_parents_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<MarkParentsRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let user_ids = user_ids_from_transport(&payload.userids)?;
    let success = state
        .parent_manager_service
        .mark_as_parents(&user, &user_ids)
        .await?;

    Ok(Json(SuccessResponse { success }))
}

pub async fn remove_parent_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(parent_id): Path<i64>,
) -> ApiResult<Json<SuccessResponse>> {
    let parent_id = UserId::from_transport(parent_id)?;
    let success = state
        .parent_manager_service
        .remove_parent(&user, parent_id)
        .await?;

    Ok(Json(SuccessResponse { success }))
}

pub(super) fn parent_list_query(params: ParentListParams, default_per_page: u32) -> ParentListQuery {
    ParentListQuery::new(
        params.search,
        params
            .sort
            .as_deref()
            .map(ParentSortColumn::parse_or_default)
            .unwrap_or_default(),
        params
            .dir
            .as_deref()
            .map(SortDirection::parse_or_default)
            .unwrap_or_default(),
        params.page.unwrap_or_default(),
        params.perpage.unwrap_or(default_per_page),
    )
}

use axum::Json;
use axum::extract::{Extension, Path, State};

use parentmanager_core::UserIdentity;
use parentmanager_domain::UserId;

use crate::dto::{PrivacyDeletionResponse, UserDataExportResponse, UsersWithDataResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn export_user_data_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<UserDataExportResponse>> {
    let user_id = UserId::from_transport(user_id)?;
    let export = state.privacy_service.export_user_data(&user, user_id).await?;

    Ok(Json(UserDataExportResponse::new(user_id, export)))
}

pub async fn delete_user_data_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<PrivacyDeletionResponse>> {
    let user_id = UserId::from_transport(user_id)?;
    let deleted = state
        .privacy_service
        .delete_data_for_user(&user, user_id)
        .await?;

    Ok(Json(PrivacyDeletionResponse { deleted }))
}

pub async fn delete_all_user_data_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<PrivacyDeletionResponse>> {
    let deleted = state.privacy_service.delete_data_for_all_users(&user).await?;

    Ok(Json(PrivacyDeletionResponse { deleted }))
}

pub async fn list_users_with_data_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<UsersWithDataResponse>> {
    let users = state.privacy_service.list_users_with_data(&user).await?;

    Ok(Json(UsersWithDataResponse::from(users)))
}

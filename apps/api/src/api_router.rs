use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{delete, get, post};
use parentmanager_core::AppError;
use tower_http::trace::TraceLayer;
use tower_sessions::SessionManagerLayer;
use tower_sessions_sqlx_store::PostgresStore;

use crate::handlers::{parents, privacy};
use crate::state::AppState;
use crate::{auth, handlers, middleware};

mod cors;

pub fn build_router(
    app_state: AppState,
    frontend_url: &str,
    session_layer: SessionManagerLayer<PostgresStore>,
) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route(
            "/api/parents",
            get(parents::list_parents_handler).post(parents::mark_parents_handler),
        )
        .route(
            "/api/parents/candidates",
            get(parents::list_parent_candidates_handler),
        )
        .route(
            "/api/parents/{parent_id}",
            delete(parents::remove_parent_handler),
        )
        .route(
            "/api/parents/{parent_id}/children",
            get(parents::get_children_handler).post(parents::assign_children_handler),
        )
        .route(
            "/api/users/unassigned",
            get(parents::unassigned_users_handler),
        )
        .route(
            "/api/relationships/{relation_id}",
            delete(parents::remove_child_handler),
        )
        .route(
            "/api/privacy/users",
            get(privacy::list_users_with_data_handler)
                .delete(privacy::delete_all_user_data_handler),
        )
        .route(
            "/api/privacy/users/{user_id}",
            get(privacy::export_user_data_handler).delete(privacy::delete_user_data_handler),
        )
        .route("/auth/me", get(auth::me_handler))
        .route_layer(from_fn(middleware::require_auth));

    let cors_layer = cors::build_cors_layer(frontend_url)?;

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/bootstrap", post(auth::bootstrap_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .merge(protected_routes)
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(session_layer)
        .with_state(app_state))
}

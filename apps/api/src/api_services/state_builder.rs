use std::sync::Arc;

use parentmanager_application::{
    AuthorizationService, CapabilityChecker, ParentManagerService, PrivacyService,
    RelationService, RoleSyncService,
};
use parentmanager_core::AppError;
use parentmanager_infrastructure::{
    PostgresAuthorizationRepository, PostgresParentMarkerRepository, PostgresPrivacyRepository,
    PostgresRelationshipRepository, PostgresRoleGrantRepository,
};
use sqlx::PgPool;
use tracing::info;

use crate::api_config::ApiConfig;
use crate::profile_links::ProfileLinks;
use crate::state::AppState;

pub fn build_app_state(pool: PgPool, config: &ApiConfig) -> Result<AppState, AppError> {
    let capability_checker: Arc<dyn CapabilityChecker> = Arc::new(AuthorizationService::new(
        Arc::new(PostgresAuthorizationRepository::new(pool.clone())),
    ));

    let role_sync_settings = config.role_sync_settings();
    info!(
        auto_assign = role_sync_settings.auto_role_assign_enabled(),
        parent_role_id = role_sync_settings.parent_role_id().as_i64(),
        "role synchronization configured"
    );

    let relation_service = RelationService::new(
        Arc::new(PostgresParentMarkerRepository::new(pool.clone())),
        Arc::new(PostgresRelationshipRepository::new(pool.clone())),
        RoleSyncService::new(
            role_sync_settings,
            Arc::new(PostgresRoleGrantRepository::new(pool.clone())),
        ),
    );

    Ok(AppState {
        parent_manager_service: ParentManagerService::new(
            capability_checker.clone(),
            relation_service,
        ),
        privacy_service: PrivacyService::new(
            capability_checker,
            Arc::new(PostgresPrivacyRepository::new(pool.clone())),
        ),
        profile_links: ProfileLinks::new(&config.host_base_url)?,
        frontend_url: config.frontend_url.clone(),
        bootstrap_token: config.bootstrap_token.clone(),
        parents_per_page: config.parents_per_page,
        postgres_pool: pool,
    })
}

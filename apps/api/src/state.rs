use parentmanager_application::{ParentManagerService, PrivacyService};
use sqlx::PgPool;

use crate::profile_links::ProfileLinks;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub parent_manager_service: ParentManagerService,
    pub privacy_service: PrivacyService,
    pub profile_links: ProfileLinks,
    pub frontend_url: String,
    pub bootstrap_token: String,
    pub parents_per_page: u32,
    pub postgres_pool: PgPool,
}

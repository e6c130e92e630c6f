use std::str::FromStr;

use async_trait::async_trait;

use parentmanager_application::AuthorizationRepository;
use parentmanager_core::{AppError, AppResult};
use parentmanager_domain::Capability;

use sqlx::{FromRow, PgPool};

/// PostgreSQL-backed repository for subject capability lookups.
#[derive(Clone)]
pub struct PostgresAuthorizationRepository {
    pool: PgPool,
}

impl PostgresAuthorizationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CapabilityRow {
    capability: String,
}

#[async_trait]
impl AuthorizationRepository for PostgresAuthorizationRepository {
    async fn list_capabilities_for_subject(&self, subject: &str) -> AppResult<Vec<Capability>> {
        let rows = sqlx::query_as::<_, CapabilityRow>(
            r#"
            SELECT capability
            FROM user_capabilities
            WHERE subject = $1
            ORDER BY capability
            "#,
        )
        .bind(subject)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load capabilities: {error}")))?;

        rows.into_iter()
            .map(|row| {
                Capability::from_str(row.capability.as_str()).map_err(|error| {
                    AppError::Internal(format!(
                        "failed to decode capability '{}' for subject '{subject}': {error}",
                        row.capability
                    ))
                })
            })
            .collect()
    }
}

use async_trait::async_trait;

use parentmanager_application::RoleGrantRepository;
use parentmanager_core::{AppError, AppResult};
use parentmanager_domain::{RoleGrant, RoleId, UserId};

use sqlx::PgPool;

/// PostgreSQL-backed adapter onto the host `role_assignments` table.
#[derive(Clone)]
pub struct PostgresRoleGrantRepository {
    pool: PgPool,
}

impl PostgresRoleGrantRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleGrantRepository for PostgresRoleGrantRepository {
    async fn has_role(
        &self,
        role_id: RoleId,
        user_id: UserId,
        scope_user_id: UserId,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM role_assignments
                WHERE role_id = $1 AND user_id = $2 AND scope_user_id = $3
            )
            "#,
        )
        .bind(role_id.as_i64())
        .bind(user_id.as_i64())
        .bind(scope_user_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to check role assignment: {error}")))
    }

    async fn create_grant(&self, grant: &RoleGrant) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO role_assignments (role_id, user_id, scope_user_id, component)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(grant.role_id().as_i64())
        .bind(grant.user_id().as_i64())
        .bind(grant.scope_user_id().as_i64())
        .bind(grant.component())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to assign role '{}' to user '{}': {error}",
                grant.role_id().as_i64(),
                grant.user_id()
            ))
        })?;

        Ok(())
    }

    async fn remove_grant(&self, grant: &RoleGrant) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM role_assignments
            WHERE role_id = $1 AND user_id = $2 AND scope_user_id = $3 AND component = $4
            "#,
        )
        .bind(grant.role_id().as_i64())
        .bind(grant.user_id().as_i64())
        .bind(grant.scope_user_id().as_i64())
        .bind(grant.component())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to unassign role '{}' from user '{}': {error}",
                grant.role_id().as_i64(),
                grant.user_id()
            ))
        })?;

        Ok(result.rows_affected())
    }
}

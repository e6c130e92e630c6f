use async_trait::async_trait;

use parentmanager_application::{CandidateUser, ParentMarkerRepository, ParentPage};
use parentmanager_core::{AppError, AppResult};
use parentmanager_domain::{ParentListQuery, PersonName, UserId};

use sqlx::{FromRow, PgPool};

mod listing;

/// PostgreSQL-backed repository for the parent membership marker.
#[derive(Clone)]
pub struct PostgresParentMarkerRepository {
    pool: PgPool,
}

impl PostgresParentMarkerRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct CandidateRow {
    pub(crate) id: i64,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) email: String,
}

impl From<CandidateRow> for CandidateUser {
    fn from(row: CandidateRow) -> Self {
        Self {
            user_id: UserId::from_i64(row.id),
            name: PersonName::new(row.first_name, row.last_name),
            email: row.email,
        }
    }
}

#[async_trait]
impl ParentMarkerRepository for PostgresParentMarkerRepository {
    async fn list_parents(&self, query: &ParentListQuery) -> AppResult<ParentPage> {
        self.list_parents_impl(query).await
    }

    async fn list_parent_candidates(&self) -> AppResult<Vec<CandidateUser>> {
        let rows = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT users.id, users.first_name, users.last_name, users.email
            FROM users
            LEFT JOIN parent_markers AS markers ON markers.user_id = users.id
            WHERE users.deleted = FALSE
                AND markers.user_id IS NULL
            ORDER BY users.last_name, users.first_name, users.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list parent candidates: {error}"))
        })?;

        Ok(rows.into_iter().map(CandidateUser::from).collect())
    }

    async fn is_parent(&self, user_id: UserId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (SELECT 1 FROM parent_markers WHERE user_id = $1)
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to read parent marker for user '{user_id}': {error}"
            ))
        })
    }

    async fn mark_parent(&self, user_id: UserId, now: i64) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO parent_markers (user_id, created_at, modified_at)
            VALUES ($1, $2, $2)
            ON CONFLICT (user_id) DO UPDATE SET modified_at = EXCLUDED.modified_at
            "#,
        )
        .bind(user_id.as_i64())
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|error| map_marker_error(error, user_id))?;

        Ok(())
    }

    async fn clear_parent(&self, user_id: UserId) -> AppResult<()> {
        sqlx::query(
            r#"
            DELETE FROM parent_markers
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to clear parent marker for user '{user_id}': {error}"
            ))
        })?;

        Ok(())
    }
}

fn map_marker_error(error: sqlx::Error, user_id: UserId) -> AppError {
    match &error {
        sqlx::Error::Database(database_error)
            if database_error.code().as_deref() == Some("23503") =>
        {
            AppError::NotFound(format!("user '{user_id}' does not exist"))
        }
        _ => AppError::Internal(format!(
            "failed to mark user '{user_id}' as parent: {error}"
        )),
    }
}

#[cfg(test)]
mod tests;

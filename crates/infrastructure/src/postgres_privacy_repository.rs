use async_trait::async_trait;

use parentmanager_application::{PrivacyRepository, RelationshipSide, SubjectRelationshipRow};
use parentmanager_core::{AppError, AppResult};
use parentmanager_domain::{PersonName, UserId};

use sqlx::{FromRow, PgPool};

/// PostgreSQL-backed repository for privacy export and erasure.
#[derive(Clone)]
pub struct PostgresPrivacyRepository {
    pool: PgPool,
}

impl PostgresPrivacyRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SubjectRelationshipDbRow {
    side: String,
    counterpart_id: i64,
    first_name: String,
    last_name: String,
    created_at: i64,
}

impl TryFrom<SubjectRelationshipDbRow> for SubjectRelationshipRow {
    type Error = AppError;

    fn try_from(row: SubjectRelationshipDbRow) -> Result<Self, Self::Error> {
        let side = match row.side.as_str() {
            "parent" => RelationshipSide::Parent,
            "child" => RelationshipSide::Child,
            other => {
                return Err(AppError::Internal(format!(
                    "unknown relationship side '{other}'"
                )));
            }
        };

        Ok(Self {
            side,
            counterpart_id: UserId::from_i64(row.counterpart_id),
            counterpart_name: PersonName::new(row.first_name, row.last_name),
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl PrivacyRepository for PostgresPrivacyRepository {
    async fn list_relationships_for_subject(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<SubjectRelationshipRow>> {
        let rows = sqlx::query_as::<_, SubjectRelationshipDbRow>(
            r#"
            SELECT 'parent' AS side, relationships.child_id AS counterpart_id,
                users.first_name, users.last_name, relationships.created_at
            FROM relationships
            INNER JOIN users ON users.id = relationships.child_id
            WHERE relationships.parent_id = $1
            UNION ALL
            SELECT 'child' AS side, relationships.parent_id AS counterpart_id,
                users.first_name, users.last_name, relationships.created_at
            FROM relationships
            INNER JOIN users ON users.id = relationships.parent_id
            WHERE relationships.child_id = $1
            ORDER BY created_at, counterpart_id
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to export relationships for user '{user_id}': {error}"
            ))
        })?;

        rows.into_iter()
            .map(SubjectRelationshipRow::try_from)
            .collect()
    }

    async fn list_users_with_relationships(&self) -> AppResult<Vec<UserId>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT parent_id AS user_id FROM relationships
            UNION
            SELECT child_id AS user_id FROM relationships
            ORDER BY user_id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list users with relationships: {error}"))
        })?;

        Ok(ids.into_iter().map(UserId::from_i64).collect())
    }

    async fn delete_relationships_for_subject(&self, user_id: UserId) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM relationships
            WHERE parent_id = $1 OR child_id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to erase relationships for user '{user_id}': {error}"
            ))
        })?;

        Ok(result.rows_affected())
    }

    async fn delete_all_relationships(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM relationships")
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to erase all relationships: {error}"))
            })?;

        Ok(result.rows_affected())
    }
}

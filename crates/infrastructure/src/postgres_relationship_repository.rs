use async_trait::async_trait;

use parentmanager_application::{CandidateUser, ChildSummary, RelationshipRepository};
use parentmanager_core::{AppError, AppResult};
use parentmanager_domain::{PersonName, Relationship, RelationshipId, UserId};

use sqlx::{FromRow, PgPool};

use crate::postgres_parent_marker_repository::CandidateRow;

/// PostgreSQL-backed repository for parent/child relationship rows.
#[derive(Clone)]
pub struct PostgresRelationshipRepository {
    pool: PgPool,
}

impl PostgresRelationshipRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RelationshipRow {
    id: i64,
    parent_id: i64,
    child_id: i64,
    created_at: i64,
}

impl From<RelationshipRow> for Relationship {
    fn from(row: RelationshipRow) -> Self {
        Relationship::new(
            RelationshipId::from_i64(row.id),
            UserId::from_i64(row.parent_id),
            UserId::from_i64(row.child_id),
            row.created_at,
        )
    }
}

#[derive(Debug, FromRow)]
struct ChildRow {
    id: i64,
    relationship_id: i64,
    first_name: String,
    last_name: String,
    email: String,
}

#[async_trait]
impl RelationshipRepository for PostgresRelationshipRepository {
    async fn list_children(&self, parent_id: UserId) -> AppResult<Vec<ChildSummary>> {
        let rows = sqlx::query_as::<_, ChildRow>(
            r#"
            SELECT users.id, relationships.id AS relationship_id,
                users.first_name, users.last_name, users.email
            FROM relationships
            INNER JOIN users ON users.id = relationships.child_id
            WHERE relationships.parent_id = $1
                AND users.deleted = FALSE
            ORDER BY users.last_name, users.first_name, users.id
            "#,
        )
        .bind(parent_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list children of parent '{parent_id}': {error}"
            ))
        })?;

        Ok(rows
            .into_iter()
            .map(|row| ChildSummary {
                user_id: UserId::from_i64(row.id),
                relationship_id: RelationshipId::from_i64(row.relationship_id),
                name: PersonName::new(row.first_name, row.last_name),
                email: row.email,
            })
            .collect())
    }

    async fn list_unassigned_candidates(
        &self,
        exclude_parent_id: Option<UserId>,
    ) -> AppResult<Vec<CandidateUser>> {
        let rows = sqlx::query_as::<_, CandidateRow>(
            r#"
            SELECT users.id, users.first_name, users.last_name, users.email
            FROM users
            WHERE users.deleted = FALSE
                AND ($1::BIGINT IS NULL OR users.id <> $1)
                AND NOT EXISTS (
                    SELECT 1 FROM parent_markers AS markers
                    WHERE markers.user_id = users.id
                )
                AND NOT EXISTS (
                    SELECT 1 FROM relationships
                    WHERE relationships.child_id = users.id
                )
            ORDER BY users.last_name, users.first_name, users.id
            "#,
        )
        .bind(exclude_parent_id.map(|user_id| user_id.as_i64()))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list unassigned users: {error}"))
        })?;

        Ok(rows.into_iter().map(CandidateUser::from).collect())
    }

    async fn relationship_exists(&self, parent_id: UserId, child_id: UserId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM relationships
                WHERE parent_id = $1 AND child_id = $2
            )
            "#,
        )
        .bind(parent_id.as_i64())
        .bind(child_id.as_i64())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to check relationship '{parent_id}' -> '{child_id}': {error}"
            ))
        })
    }

    async fn insert_relationship(
        &self,
        parent_id: UserId,
        child_id: UserId,
        created_at: i64,
    ) -> AppResult<Relationship> {
        let result = sqlx::query_as::<_, RelationshipRow>(
            r#"
            INSERT INTO relationships (parent_id, child_id, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, parent_id, child_id, created_at
            "#,
        )
        .bind(parent_id.as_i64())
        .bind(child_id.as_i64())
        .bind(created_at)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(Relationship::from(row)),
            Err(error) => Err(map_relationship_conflict(error, parent_id, child_id)),
        }
    }

    async fn find_relationship(
        &self,
        relationship_id: RelationshipId,
    ) -> AppResult<Option<Relationship>> {
        let row = sqlx::query_as::<_, RelationshipRow>(
            r#"
            SELECT id, parent_id, child_id, created_at
            FROM relationships
            WHERE id = $1
            "#,
        )
        .bind(relationship_id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to find relationship '{relationship_id}': {error}"
            ))
        })?;

        Ok(row.map(Relationship::from))
    }

    async fn delete_relationship(&self, relationship_id: RelationshipId) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM relationships
            WHERE id = $1
            "#,
        )
        .bind(relationship_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to delete relationship '{relationship_id}': {error}"
            ))
        })?;

        Ok(result.rows_affected())
    }

    async fn list_relationships_for_parent(
        &self,
        parent_id: UserId,
    ) -> AppResult<Vec<Relationship>> {
        let rows = sqlx::query_as::<_, RelationshipRow>(
            r#"
            SELECT id, parent_id, child_id, created_at
            FROM relationships
            WHERE parent_id = $1
            ORDER BY id
            "#,
        )
        .bind(parent_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to list relationships of parent '{parent_id}': {error}"
            ))
        })?;

        Ok(rows.into_iter().map(Relationship::from).collect())
    }

    async fn delete_relationships_for_parent(&self, parent_id: UserId) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM relationships
            WHERE parent_id = $1
            "#,
        )
        .bind(parent_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to delete relationships of parent '{parent_id}': {error}"
            ))
        })?;

        Ok(result.rows_affected())
    }
}

fn map_relationship_conflict(error: sqlx::Error, parent_id: UserId, child_id: UserId) -> AppError {
    if let sqlx::Error::Database(database_error) = &error {
        match database_error.code().as_deref() {
            Some("23505") => {
                return AppError::Conflict(format!(
                    "user '{child_id}' is already a child of '{parent_id}'"
                ));
            }
            Some("23514") => {
                return AppError::Conflict(format!(
                    "user '{parent_id}' cannot be their own child"
                ));
            }
            Some("23503") => {
                return AppError::NotFound(format!(
                    "user '{parent_id}' or '{child_id}' does not exist"
                ));
            }
            _ => {}
        }
    }

    AppError::Internal(format!("failed to insert relationship: {error}"))
}

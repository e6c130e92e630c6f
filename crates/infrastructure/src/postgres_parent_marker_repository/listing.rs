use super::*;

use parentmanager_application::ParentSummary;
use parentmanager_domain::ParentSortColumn;
use sqlx::{Postgres, QueryBuilder};

#[derive(Debug, FromRow)]
struct ParentRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    last_access: i64,
    child_count: i64,
}

impl From<ParentRow> for ParentSummary {
    fn from(row: ParentRow) -> Self {
        Self {
            user_id: UserId::from_i64(row.id),
            name: PersonName::new(row.first_name, row.last_name),
            email: row.email,
            last_access: (row.last_access > 0).then_some(row.last_access),
            child_count: row.child_count,
        }
    }
}

impl PostgresParentMarkerRepository {
    pub(super) async fn list_parents_impl(&self, query: &ParentListQuery) -> AppResult<ParentPage> {
        let pattern = query.search().map(like_pattern);

        let mut count_builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "SELECT COUNT(*) FROM parent_markers AS markers \
             INNER JOIN users ON users.id = markers.user_id \
             WHERE users.deleted = FALSE",
        );
        push_search_filter(&mut count_builder, pattern.as_deref());

        let total = count_builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to count parents: {error}")))?;

        let limit = i64::from(query.per_page());
        let offset = i64::try_from(query.offset()).map_err(|error| {
            AppError::Validation(format!("invalid parent listing offset: {error}"))
        })?;

        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "SELECT users.id, users.first_name, users.last_name, users.email, users.last_access, \
             COUNT(relationships.id) AS child_count \
             FROM parent_markers AS markers \
             INNER JOIN users ON users.id = markers.user_id \
             LEFT JOIN relationships ON relationships.parent_id = users.id \
             WHERE users.deleted = FALSE",
        );
        push_search_filter(&mut builder, pattern.as_deref());
        builder.push(
            " GROUP BY users.id, users.first_name, users.last_name, users.email, users.last_access",
        );
        builder.push(" ORDER BY ");
        builder.push(order_column(query.sort()));
        builder.push(" ");
        builder.push(query.direction().as_sql());
        builder.push(", users.id ASC LIMIT ");
        builder.push_bind(limit);
        builder.push(" OFFSET ");
        builder.push_bind(offset);

        let rows = builder
            .build_query_as::<ParentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to list parents: {error}")))?;

        Ok(ParentPage {
            parents: rows.into_iter().map(ParentSummary::from).collect(),
            total: u64::try_from(total).unwrap_or_default(),
        })
    }
}

fn push_search_filter(builder: &mut QueryBuilder<'_, Postgres>, pattern: Option<&str>) {
    let Some(pattern) = pattern else {
        return;
    };

    builder.push(" AND (users.first_name ILIKE ");
    builder.push_bind(pattern.to_owned());
    builder.push(" OR users.last_name ILIKE ");
    builder.push_bind(pattern.to_owned());
    builder.push(" OR users.email ILIKE ");
    builder.push_bind(pattern.to_owned());
    builder.push(")");
}

fn order_column(sort: ParentSortColumn) -> &'static str {
    match sort {
        ParentSortColumn::FirstName => "users.first_name",
        ParentSortColumn::LastName => "users.last_name",
        ParentSortColumn::Email => "users.email",
        ParentSortColumn::ChildCount => "child_count",
        ParentSortColumn::LastAccess => "users.last_access",
    }
}

/// Wraps a search term for `ILIKE`, escaping its wildcards.
pub(super) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for character in term.chars() {
        if matches!(character, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(character);
    }
    pattern.push('%');
    pattern
}

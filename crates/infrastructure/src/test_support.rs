use parentmanager_domain::UserId;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Connects to `DATABASE_URL` and migrates, or returns `None` when unset.
pub(crate) async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres tests: {error}");
    }

    Some(pool)
}

/// Inserts a host account and returns its id.
pub(crate) async fn seed_user(pool: &PgPool, first_name: &str, last_name: &str) -> UserId {
    let inserted = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO users (first_name, last_name, email, last_access)
        VALUES ($1, $2, $3, 0)
        RETURNING id
        "#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(format!(
        "{}.{}@example.org",
        first_name.to_lowercase(),
        last_name.to_lowercase()
    ))
    .fetch_one(pool)
    .await;

    match inserted {
        Ok(id) => UserId::from_i64(id),
        Err(error) => panic!("failed to seed user: {error}"),
    }
}

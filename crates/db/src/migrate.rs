use sqlx::SqlitePool;
use tracing::info;

const MIGRATIONS: &[(&str, &str)] = &[(
    "001_initial_schema",
    include_str!("../migrations/001_initial_schema.sql"),
)];

/// Run forward-only migrations. Tracks applied migrations in a `_migrations` table.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // Create migrations tracking table
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS _migrations (
            name TEXT PRIMARY KEY,
            applied_ts INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    for (name, sql) in MIGRATIONS {
        let applied: Option<(String,)> =
            sqlx::query_as("SELECT name FROM _migrations WHERE name = ?")
                .bind(name)
                .fetch_optional(pool)
                .await?;

        if applied.is_some() {
            continue;
        }

        info!(migration = name, "applying migration");
        // All statements plus the bookkeeping insert commit atomically, so a
        // failure mid-migration leaves no half-applied schema behind.
        let mut tx = pool.begin().await?;
        // Execute migration statements (split on semicolons for multi-statement)
        for statement in sql.split(';') {
            let trimmed = statement.trim();
            if trimmed.is_empty() {
                continue;
            }
            sqlx::query(trimmed).execute(&mut *tx).await?;
        }

        let now = chrono::Utc::now().timestamp();
        sqlx::query("INSERT INTO _migrations (name, applied_ts) VALUES (?, ?)")
            .bind(name)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!(migration = name, "migration applied");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn successful_migration_is_recorded() {
        let pool = crate::connect(":memory:").await.unwrap();
        run(&pool).await.unwrap();

        let recorded: Option<(String,)> =
            sqlx::query_as("SELECT name FROM _migrations WHERE name = '001_initial_schema'")
                .fetch_optional(&pool)
                .await
                .unwrap();
        assert!(recorded.is_some());
    }

    #[tokio::test]
    async fn failed_migration_leaves_nothing_behind() {
        let pool = crate::connect(":memory:").await.unwrap();
        // Occupy a table name the migration also creates, so it fails after
        // earlier statements already ran.
        sqlx::query("CREATE TABLE media_translations (x INTEGER)")
            .execute(&pool)
            .await
            .unwrap();

        assert!(run(&pool).await.is_err());

        // the tables created before the failure rolled back with it
        let media: Option<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'media'",
        )
        .fetch_optional(&pool)
        .await
        .unwrap();
        assert!(media.is_none());

        let recorded: Option<(String,)> =
            sqlx::query_as("SELECT name FROM _migrations WHERE name = '001_initial_schema'")
                .fetch_optional(&pool)
                .await
                .unwrap();
        assert!(recorded.is_none());
    }
}

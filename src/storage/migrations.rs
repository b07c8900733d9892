use sqlx::{Executor, SqlitePool};

use crate::domain::error::DomainError;

/// Ensures the `apps` relation exists. Existing rows are never touched.
pub async fn migrate(pool: &SqlitePool) -> Result<(), DomainError> {
    let migration = r#"
    PRAGMA journal_mode = WAL;
    PRAGMA synchronous = NORMAL;

    CREATE TABLE IF NOT EXISTS apps (
        id INTEGER PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        owner TEXT NOT NULL,
        language TEXT NOT NULL,
        framework TEXT NOT NULL
    );
    "#;

    pool.execute(migration)
        .await
        .map_err(|error| DomainError::Storage(format!("migration failed: {error}")))?;

    Ok(())
}

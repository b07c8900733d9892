use crate::{
    domain::{
        error::DomainError,
        models::{AppDetail, AppSummary},
    },
    storage::SqliteStore,
};

impl SqliteStore {
    pub async fn list_apps(&self) -> Result<Vec<AppSummary>, DomainError> {
        let rows = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM apps ORDER BY id ASC")
            .fetch_all(self.pool())
            .await
            .map_err(|error| DomainError::Storage(format!("failed to list apps: {error}")))?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| AppSummary { id, name })
            .collect())
    }

    pub async fn get_app(&self, id: i64) -> Result<Option<AppDetail>, DomainError> {
        let row = sqlx::query_as::<_, (i64, String, String, String, String)>(
            "SELECT id, name, owner, language, framework FROM apps WHERE id = ? LIMIT 1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|error| DomainError::Storage(format!("failed to get app: {error}")))?;

        Ok(row.map(map_app_row))
    }

    pub async fn count_apps(&self) -> Result<u64, DomainError> {
        let (count,) = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM apps")
            .fetch_one(self.pool())
            .await
            .map_err(|error| DomainError::Storage(format!("failed to count apps: {error}")))?;

        Ok(u64::try_from(count).unwrap_or(0))
    }
}

fn map_app_row(row: (i64, String, String, String, String)) -> AppDetail {
    let (id, name, owner, language, framework) = row;
    AppDetail {
        id,
        name,
        owner,
        language,
        framework,
    }
}

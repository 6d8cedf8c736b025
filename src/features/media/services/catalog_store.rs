use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::core::error::{AppError, Result};
use crate::features::media::models::{MediaRecord, NewMediaRecord};

/// Durable storage of catalog rows
pub struct CatalogStore {
    pool: SqlitePool,
}

impl CatalogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Ensure the schema exists. Safe to run on every start.
    pub async fn init(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Catalog schema is up to date");
        Ok(())
    }

    /// Append a record and return its assigned id
    pub async fn insert(&self, media: &NewMediaRecord<'_>) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO media (title, file_path, thumbnail_path, category)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(media.title)
        .bind(media.file_path)
        .bind(media.thumbnail_path)
        .bind(media.category)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert media record: {:?}", e);
            AppError::Database(e)
        })?;

        let id = result.last_insert_rowid();
        debug!("Inserted media record id={}", id);
        Ok(id)
    }

    /// Every record in insertion order
    pub async fn list_all(&self) -> Result<Vec<MediaRecord>> {
        sqlx::query_as::<_, MediaRecord>(
            r#"
            SELECT id, title, file_path, thumbnail_path, category
            FROM media
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list media records: {:?}", e);
            AppError::Database(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::test_pool;

    fn record<'a>(title: &'a str, file: &'a str, thumb: &'a str) -> NewMediaRecord<'a> {
        NewMediaRecord {
            title,
            file_path: file,
            thumbnail_path: thumb,
            category: "Music",
        }
    }

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(test_pool(tmp.path()).await);

        store.init().await.unwrap();
        store.init().await.unwrap();

        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids_and_lists_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(test_pool(tmp.path()).await);
        store.init().await.unwrap();

        let first = store.insert(&record("One", "1.mp4", "1.jpg")).await.unwrap();
        let second = store.insert(&record("Two", "2.mp4", "2.jpg")).await.unwrap();
        assert!(second > first);

        let all = store.list_all().await.unwrap();
        assert_eq!(
            all,
            vec![
                MediaRecord {
                    id: first,
                    title: "One".to_string(),
                    file_path: "1.mp4".to_string(),
                    thumbnail_path: "1.jpg".to_string(),
                    category: "Music".to_string(),
                },
                MediaRecord {
                    id: second,
                    title: "Two".to_string(),
                    file_path: "2.mp4".to_string(),
                    thumbnail_path: "2.jpg".to_string(),
                    category: "Music".to_string(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_table_is_storage_error() {
        let tmp = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(test_pool(tmp.path()).await);

        assert!(matches!(
            store.insert(&record("One", "1.mp4", "1.jpg")).await,
            Err(AppError::Database(_))
        ));
        assert!(matches!(store.list_all().await, Err(AppError::Database(_))));
    }
}

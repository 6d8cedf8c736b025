use std::path::Path;
use std::sync::Arc;

use axum_test::TestServer;
use sqlx::SqlitePool;
use tempfile::TempDir;
use utoipa::OpenApi;

use crate::core::config::{DatabaseConfig, FilenamePolicy, StorageConfig};
use crate::core::database;
use crate::core::openapi::ApiDoc;
use crate::core::router::{create_router, AppServices};
use crate::features::categories::CategoryRegistry;
use crate::features::media::{CatalogStore, MediaService};
use crate::modules::storage::AssetStore;

pub const TEST_BASE_URL: &str = "http://localhost:5000";

/// Storage rooted in `dir`; bucket directories are not created up front
pub fn test_storage_config(dir: &Path, filename_policy: FilenamePolicy) -> StorageConfig {
    StorageConfig {
        video_dir: dir.join("local_videos"),
        thumbnail_dir: dir.join("thumbnails"),
        public_base_url: TEST_BASE_URL.to_string(),
        max_upload_size: 1024 * 1024,
        filename_policy,
    }
}

/// Pool on a fresh SQLite file in `dir`, without schema
pub async fn test_pool(dir: &Path) -> SqlitePool {
    let config = DatabaseConfig {
        url: format!("sqlite://{}", dir.join("catalog.db").display()),
        max_connections: 1,
        min_connections: 1,
        acquire_timeout_secs: 5,
        idle_timeout_secs: 60,
        max_lifetime_secs: 600,
    };
    database::create_pool(&config)
        .await
        .expect("Failed to create test pool")
}

/// `true` when the directory is missing or has no entries
pub fn dir_is_empty(dir: &Path) -> bool {
    match std::fs::read_dir(dir) {
        Ok(mut entries) => entries.next().is_none(),
        Err(_) => true,
    }
}

/// Full application over a temporary catalog and asset directories
pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    pub storage: StorageConfig,
    _dir: TempDir,
}

impl TestApp {
    /// Route part of a public asset URL
    pub fn route_of(&self, url: &str) -> String {
        url.strip_prefix(&self.storage.public_base_url)
            .unwrap_or(url)
            .to_string()
    }
}

pub async fn spawn_app(filename_policy: FilenamePolicy) -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let storage = test_storage_config(dir.path(), filename_policy);
    let pool = test_pool(dir.path()).await;

    let catalog = Arc::new(CatalogStore::new(pool.clone()));
    catalog.init().await.expect("Failed to init catalog");

    let assets = Arc::new(AssetStore::new(&storage));
    let registry = Arc::new(CategoryRegistry::default());
    let media_service = Arc::new(MediaService::new(
        catalog,
        Arc::clone(&assets),
        Arc::clone(&registry),
        &storage,
    ));

    let router = create_router(
        AppServices {
            registry,
            media_service,
            assets,
        },
        &["*".to_string()],
        storage.max_upload_size,
        ApiDoc::openapi(),
    );
    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        pool,
        storage,
        _dir: dir,
    }
}

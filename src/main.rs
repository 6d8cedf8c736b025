mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::database;
use crate::core::openapi::{ApiDoc, ApiInfoModifier};
use crate::core::router::{create_router, AppServices};
use crate::features::categories::CategoryRegistry;
use crate::features::media::{CatalogStore, MediaService};
use crate::modules::storage::AssetStore;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Catalog schema
    let catalog = Arc::new(CatalogStore::new(pool));
    catalog
        .init()
        .await
        .map_err(|e| anyhow::anyhow!("Catalog initialization failed: {}", e))?;

    let assets = Arc::new(AssetStore::new(&config.storage));
    tracing::info!(
        "Asset store initialized: videos={}, thumbnails={}, filename_policy={:?}",
        config.storage.video_dir.display(),
        config.storage.thumbnail_dir.display(),
        config.storage.filename_policy
    );

    let registry = Arc::new(CategoryRegistry::default());
    tracing::info!(
        "Category registry initialized with {} categories",
        registry.list().len()
    );

    let media_service = Arc::new(MediaService::new(
        Arc::clone(&catalog),
        Arc::clone(&assets),
        Arc::clone(&registry),
        &config.storage,
    ));
    tracing::info!("Media service initialized");

    let info_modifier = ApiInfoModifier {
        title: config.docs.title.clone(),
        version: config.docs.version.clone(),
        description: config.docs.description.clone(),
    };
    let mut openapi = ApiDoc::openapi();
    info_modifier.modify(&mut openapi);

    let app = create_router(
        AppServices {
            registry,
            media_service,
            assets,
        },
        &config.app.cors_allowed_origins,
        config.storage.max_upload_size,
        openapi,
    );

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "OpenAPI document available at {}",
        format!("http://{}/api-docs/openapi.json", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}

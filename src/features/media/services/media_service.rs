use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::core::config::{FilenamePolicy, StorageConfig};
use crate::core::error::{AppError, Result};
use crate::features::categories::CategoryRegistry;
use crate::features::media::dtos::{
    MediaResponseDto, UploadMediaForm, UploadMediaResponseDto, UploadedFile,
};
use crate::features::media::models::{MediaRecord, NewMediaRecord};
use crate::features::media::services::CatalogStore;
use crate::modules::storage::{fit_filename, sanitize_filename, AssetStore, Bucket};
use crate::shared::constants::MAX_FILENAME_BYTES;

const UPLOAD_SUCCESS_MESSAGE: &str = "File and thumbnail uploaded successfully";

/// A fully validated upload
#[derive(Debug)]
pub struct MediaUpload {
    pub video: UploadedFile,
    pub thumbnail: UploadedFile,
    pub title: String,
    pub category: String,
}

/// Tracks asset writes of one upload so they can be undone if a later step
/// fails. Undo runs in reverse order of the writes.
struct UploadSaga<'a> {
    assets: &'a AssetStore,
    written: Vec<(Bucket, String)>,
}

impl<'a> UploadSaga<'a> {
    fn new(assets: &'a AssetStore) -> Self {
        Self {
            assets,
            written: Vec::new(),
        }
    }

    async fn store(&mut self, bucket: Bucket, filename: String, data: &[u8]) -> Result<PathBuf> {
        let path = self.assets.store(bucket, &filename, data).await?;
        self.written.push((bucket, filename));
        Ok(path)
    }

    async fn compensate(self) {
        for (bucket, filename) in self.written.into_iter().rev() {
            if let Err(e) = self.assets.delete(bucket, &filename).await {
                warn!(
                    "Failed to remove {} asset '{}' after aborted upload: {}",
                    bucket.as_str(),
                    filename,
                    e
                );
            }
        }
    }
}

/// Request-level media operations: validation, upload saga, and listing
pub struct MediaService {
    catalog: Arc<CatalogStore>,
    assets: Arc<AssetStore>,
    registry: Arc<CategoryRegistry>,
    public_base_url: String,
    filename_policy: FilenamePolicy,
}

impl MediaService {
    pub fn new(
        catalog: Arc<CatalogStore>,
        assets: Arc<AssetStore>,
        registry: Arc<CategoryRegistry>,
        storage: &StorageConfig,
    ) -> Self {
        Self {
            catalog,
            assets,
            registry,
            public_base_url: storage.public_base_url.trim_end_matches('/').to_string(),
            filename_policy: storage.filename_policy,
        }
    }

    /// Check an upload form for required fields, then for a registered
    /// category. Nothing is written before this passes.
    pub fn validate(&self, form: UploadMediaForm) -> Result<MediaUpload> {
        let video = form.file.filter(|f| sanitize_filename(&f.filename).is_some());
        let thumbnail = form
            .thumbnail
            .filter(|f| sanitize_filename(&f.filename).is_some());
        let title = form.title.filter(|t| !t.trim().is_empty());
        let category = form.category.filter(|c| !c.is_empty());

        let (video, thumbnail, title, category) = match (video, thumbnail, title, category) {
            (Some(v), Some(t), Some(title), Some(c)) => (v, t, title, c),
            (v, t, title, c) => {
                let missing: Vec<&str> = [
                    ("file", v.is_none()),
                    ("thumbnail", t.is_none()),
                    ("title", title.is_none()),
                    ("category", c.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();

                return Err(AppError::Validation(format!(
                    "Missing file, thumbnail, title, or category (missing: {})",
                    missing.join(", ")
                )));
            }
        };

        if !self.registry.is_valid(&category) {
            return Err(AppError::Validation(format!(
                "Invalid category. Available categories: {}",
                self.registry.list().join(", ")
            )));
        }

        Ok(MediaUpload {
            video,
            thumbnail,
            title,
            category,
        })
    }

    /// Store both files, then record the catalog row. Any failure removes
    /// the files written so far.
    pub async fn upload(&self, upload: MediaUpload) -> Result<UploadMediaResponseDto> {
        let video_name = self.stored_filename(&upload.video.filename)?;
        let thumbnail_name = self.stored_filename(&upload.thumbnail.filename)?;

        let mut saga = UploadSaga::new(&self.assets);

        let stored = saga
            .store(Bucket::Video, video_name.clone(), &upload.video.data)
            .await;
        let video_path = match stored {
            Ok(path) => path,
            Err(e) => {
                saga.compensate().await;
                return Err(e);
            }
        };

        let stored = saga
            .store(
                Bucket::Thumbnail,
                thumbnail_name.clone(),
                &upload.thumbnail.data,
            )
            .await;
        let thumbnail_path = match stored {
            Ok(path) => path,
            Err(e) => {
                saga.compensate().await;
                return Err(e);
            }
        };

        let record = NewMediaRecord {
            title: &upload.title,
            file_path: &video_name,
            thumbnail_path: &thumbnail_name,
            category: &upload.category,
        };

        let id = match self.catalog.insert(&record).await {
            Ok(id) => id,
            Err(e) => {
                saga.compensate().await;
                return Err(e);
            }
        };

        info!(
            "Media uploaded: id={}, category={}, video={}, thumbnail={}",
            id, upload.category, video_name, thumbnail_name
        );

        Ok(UploadMediaResponseDto {
            message: UPLOAD_SUCCESS_MESSAGE.to_string(),
            file_path: video_path.display().to_string(),
            thumbnail_path: thumbnail_path.display().to_string(),
        })
    }

    /// All catalog entries with fetchable asset URLs
    pub async fn list_media(&self) -> Result<Vec<MediaResponseDto>> {
        let records = self.catalog.list_all().await?;
        Ok(records
            .into_iter()
            .map(|record| self.to_response(record))
            .collect())
    }

    fn to_response(&self, record: MediaRecord) -> MediaResponseDto {
        MediaResponseDto {
            id: record.id,
            file_path: self.public_url(Bucket::Video, &record.file_path),
            thumbnail_path: self.public_url(Bucket::Thumbnail, &record.thumbnail_path),
            title: record.title,
            category: record.category,
        }
    }

    /// Public URL for a stored file; only the base name is ever exposed
    pub fn public_url(&self, bucket: Bucket, stored: &str) -> String {
        let name = Path::new(stored)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(stored);

        format!(
            "{}{}/{}",
            self.public_base_url,
            bucket.route(),
            urlencoding::encode(name)
        )
    }

    fn stored_filename(&self, original: &str) -> Result<String> {
        let base = sanitize_filename(original)
            .ok_or_else(|| AppError::Validation(format!("Invalid file name '{}'", original)))?;

        Ok(match self.filename_policy {
            FilenamePolicy::Original => base,
            FilenamePolicy::Qualified => {
                let prefix = format!("{}-", Uuid::now_v7().simple());
                let base = fit_filename(&base, MAX_FILENAME_BYTES - prefix.len());
                format!("{}{}", prefix, base)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use crate::shared::test_helpers::{test_pool, test_storage_config};

    async fn service(dir: &Path, policy: FilenamePolicy) -> MediaService {
        let storage = test_storage_config(dir, policy);
        let catalog = Arc::new(CatalogStore::new(test_pool(dir).await));
        catalog.init().await.unwrap();
        MediaService::new(
            catalog,
            Arc::new(AssetStore::new(&storage)),
            Arc::new(CategoryRegistry::default()),
            &storage,
        )
    }

    fn file(name: &str, data: &[u8]) -> UploadedFile {
        UploadedFile {
            filename: name.to_string(),
            data: Bytes::copy_from_slice(data),
        }
    }

    fn form() -> UploadMediaForm {
        UploadMediaForm {
            file: Some(file("a.mp4", b"video")),
            thumbnail: Some(file("a.jpg", b"thumb")),
            title: Some("Round 1".to_string()),
            category: Some("Rap Battles".to_string()),
        }
    }

    #[tokio::test]
    async fn test_validate_reports_missing_fields() {
        let tmp = tempfile::tempdir().unwrap();
        let svc = service(tmp.path(), FilenamePolicy::Original).await;

        let err = svc
            .validate(UploadMediaForm {
                title: Some("   ".to_string()),
                thumbnail: Some(file("", b"thumb")),
                ..form()
            })
            .unwrap_err();

        match err {
            AppError::Validation(msg) => {
                assert!(msg.starts_with("Missing file, thumbnail, title, or category"));
                assert!(msg.contains("missing: thumbnail, title"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_validate_rejects_unknown_category() {
        let tmp = tempfile::tempdir().unwrap();
        let svc = service(tmp.path(), FilenamePolicy::Original).await;

        let err = svc
            .validate(UploadMediaForm {
                category: Some("Comedy".to_string()),
                ..form()
            })
            .unwrap_err();

        match err {
            AppError::Validation(msg) => assert_eq!(
                msg,
                "Invalid category. Available categories: Rap Battles, MUBAS Got Talent, Music, Social Weekend Highlights, Live"
            ),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_public_url_uses_base_name_only() {
        let tmp = tempfile::tempdir().unwrap();
        let svc = service(tmp.path(), FilenamePolicy::Original).await;

        assert_eq!(
            svc.public_url(Bucket::Video, "local_videos/a.mp4"),
            "http://localhost:5000/videos/a.mp4"
        );
        assert_eq!(
            svc.public_url(Bucket::Thumbnail, "my thumb.jpg"),
            "http://localhost:5000/thumbnails/my%20thumb.jpg"
        );
    }

    #[tokio::test]
    async fn test_qualified_names_do_not_collide() {
        let tmp = tempfile::tempdir().unwrap();
        let svc = service(tmp.path(), FilenamePolicy::Qualified).await;

        let first = svc.stored_filename("a.mp4").unwrap();
        let second = svc.stored_filename("../a.mp4").unwrap();

        assert_ne!(first, second);
        assert!(first.ends_with("-a.mp4"));
        assert!(second.ends_with("-a.mp4"));
    }

    #[tokio::test]
    async fn test_qualified_name_fits_filename_limit() {
        let tmp = tempfile::tempdir().unwrap();
        let svc = service(tmp.path(), FilenamePolicy::Qualified).await;

        let long = format!("{}.mp4", "v".repeat(240));
        let stored = svc.stored_filename(&long).unwrap();

        assert_eq!(stored.len(), MAX_FILENAME_BYTES);
        assert!(stored.ends_with("vv.mp4"));
    }

    #[tokio::test]
    async fn test_upload_records_file_names_only() {
        let tmp = tempfile::tempdir().unwrap();
        let svc = service(tmp.path(), FilenamePolicy::Original).await;

        let upload = svc.validate(form()).unwrap();
        let response = svc.upload(upload).await.unwrap();

        assert!(response.file_path.ends_with("a.mp4"));
        assert!(response.thumbnail_path.ends_with("a.jpg"));

        let records = svc.catalog.list_all().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file_path, "a.mp4");
        assert_eq!(records[0].thumbnail_path, "a.jpg");
    }
}

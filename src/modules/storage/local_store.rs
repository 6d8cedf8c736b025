//! Local filesystem asset store
//!
//! Persists uploaded binaries into one flat directory per bucket and
//! hands them back as streams for the fetch routes.

use std::path::{Path, PathBuf};

use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::core::config::StorageConfig;
use crate::core::error::{AppError, Result};
use crate::shared::constants::{THUMBNAIL_ROUTE, VIDEO_ROUTE};

/// Logical partition of the asset store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Video,
    Thumbnail,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Video => "video",
            Bucket::Thumbnail => "thumbnail",
        }
    }

    /// Public route prefix the bucket is served under
    pub fn route(&self) -> &'static str {
        match self {
            Bucket::Video => VIDEO_ROUTE,
            Bucket::Thumbnail => THUMBNAIL_ROUTE,
        }
    }
}

/// An opened stored file ready to be streamed
pub struct StoredAsset {
    pub file: File,
    pub content_type: &'static str,
    pub size: u64,
}

pub struct AssetStore {
    video_dir: PathBuf,
    thumbnail_dir: PathBuf,
}

impl AssetStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            video_dir: config.video_dir.clone(),
            thumbnail_dir: config.thumbnail_dir.clone(),
        }
    }

    pub fn bucket_dir(&self, bucket: Bucket) -> &Path {
        match bucket {
            Bucket::Video => &self.video_dir,
            Bucket::Thumbnail => &self.thumbnail_dir,
        }
    }

    /// Server-local path of a stored file
    pub fn local_path(&self, bucket: Bucket, filename: &str) -> PathBuf {
        self.bucket_dir(bucket).join(filename)
    }

    /// Write `data` to `bucket/filename`, creating the bucket directory if
    /// needed. An existing file with the same name is replaced.
    pub async fn store(&self, bucket: Bucket, filename: &str, data: &[u8]) -> Result<PathBuf> {
        let dir = self.bucket_dir(bucket);
        fs::create_dir_all(dir).await?;

        let path = dir.join(filename);
        if let Err(e) = write_file(&path, data).await {
            // Do not leave a truncated file behind
            if let Err(cleanup) = fs::remove_file(&path).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    warn!(
                        "Failed to remove partial file {}: {}",
                        path.display(),
                        cleanup
                    );
                }
            }
            return Err(AppError::Io(e));
        }

        debug!(
            "Stored {} bytes in {} bucket: {}",
            data.len(),
            bucket.as_str(),
            path.display()
        );
        Ok(path)
    }

    /// Open a stored file for streaming
    pub async fn resolve(&self, bucket: Bucket, filename: &str) -> Result<StoredAsset> {
        if !is_plain_filename(filename) {
            return Err(AppError::NotFound(format!("File '{}' not found", filename)));
        }

        let path = self.local_path(bucket, filename);
        let metadata = match fs::metadata(&path).await {
            Ok(m) if m.is_file() => m,
            Ok(_) => return Err(AppError::NotFound(format!("File '{}' not found", filename))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::NotFound(format!("File '{}' not found", filename)))
            }
            Err(e) => return Err(AppError::Io(e)),
        };

        let file = File::open(&path).await?;

        Ok(StoredAsset {
            file,
            content_type: content_type_for(filename),
            size: metadata.len(),
        })
    }

    /// Remove a stored file. A file that is already gone counts as removed.
    pub async fn delete(&self, bucket: Bucket, filename: &str) -> Result<()> {
        let path = self.local_path(bucket, filename);
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Deleted {} asset: {}", bucket.as_str(), path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

async fn write_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path).await?;
    file.write_all(data).await?;
    file.flush().await
}

/// Reduce a client-supplied name to its last path component.
/// Returns `None` for names with nothing usable left.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("").trim();
    if is_plain_filename(base) {
        Some(base.to_string())
    } else {
        None
    }
}

/// Shorten `name` to at most `max_bytes` bytes, keeping its extension when
/// the extension itself fits. Cuts fall on char boundaries.
pub fn fit_filename(name: &str, max_bytes: usize) -> String {
    if name.len() <= max_bytes {
        return name.to_string();
    }

    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && ext.len() + 1 < max_bytes => {
            let stem = truncate_at_char_boundary(stem, max_bytes - ext.len() - 1);
            format!("{}.{}", stem, ext)
        }
        _ => truncate_at_char_boundary(name, max_bytes).to_string(),
    }
}

fn truncate_at_char_boundary(s: &str, max_bytes: usize) -> &str {
    let mut end = max_bytes.min(s.len());
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// Content type derived from the file extension
pub fn content_type_for(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("mp4") | Some("m4v") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("avi") => "video/x-msvideo",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

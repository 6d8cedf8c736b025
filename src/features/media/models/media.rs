use sqlx::FromRow;

/// Database model for a catalog entry.
///
/// `file_path` and `thumbnail_path` hold the stored file name inside the
/// video and thumbnail buckets, never a server directory.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct MediaRecord {
    pub id: i64,
    pub title: String,
    pub file_path: String,
    pub thumbnail_path: String,
    pub category: String,
}

/// Values for a catalog insert
#[derive(Debug, Clone)]
pub struct NewMediaRecord<'a> {
    pub title: &'a str,
    pub file_path: &'a str,
    pub thumbnail_path: &'a str,
    pub category: &'a str,
}

/// Categories accepted for uploaded media, in display order
pub const MEDIA_CATEGORIES: &[&str] = &[
    "Rap Battles",
    "MUBAS Got Talent",
    "Music",
    "Social Weekend Highlights",
    "Live",
];

/// Route prefix serving stored videos
pub const VIDEO_ROUTE: &str = "/videos";

/// Route prefix serving stored thumbnails
pub const THUMBNAIL_ROUTE: &str = "/thumbnails";

/// Extra body allowance on top of the upload limit for multipart framing
pub const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Longest file name most filesystems accept, in bytes
pub const MAX_FILENAME_BYTES: usize = 255;

pub mod asset_handler;
pub mod media_handler;

pub use asset_handler::{__path_get_thumbnail, __path_get_video, get_thumbnail, get_video};
pub use media_handler::{__path_list_media, __path_upload_video, list_media, upload_video};

pub mod media_dto;

pub use media_dto::{
    MediaListDto, MediaResponseDto, UploadMediaDto, UploadMediaForm, UploadMediaResponseDto,
    UploadedFile,
};

mod vlog_dto;

pub use vlog_dto::{
    UploadVlogDto, UploadVlogForm, VlogResponseDto, VlogUploadedDto, DEFAULT_CONTENT_TYPE,
};

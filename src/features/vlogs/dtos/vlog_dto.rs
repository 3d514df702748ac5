use axum::body::Bytes;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Content type recorded when the client sends none
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Multipart form for OpenAPI documentation.
///
/// The handler reads the fields with axum's Multipart extractor.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadVlogForm {
    /// The video file
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// Optional description of the clip
    #[schema(example = "Morning walk by the river")]
    pub description: Option<String>,
}

/// A parsed upload, ready for validation
#[derive(Debug, Validate)]
pub struct UploadVlogDto {
    pub file: Bytes,

    /// File name as sent by the client
    #[validate(length(max = 255, message = "Filename must not exceed 255 characters"))]
    pub original_filename: String,

    pub content_type: Option<String>,

    #[validate(length(max = 1000, message = "Description must not exceed 1000 characters"))]
    pub description: Option<String>,
}

/// Returned after a successful upload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VlogUploadedDto {
    pub id: String,
    /// Stored file name (`YYYYmmdd_HHMMSS_<original>`)
    pub filename: String,
}

/// Vlog metadata as rendered for exports, upload time in display time
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VlogResponseDto {
    pub id: String,
    /// Opaque reference to the stored payload
    pub blob_ref: String,
    pub filename: String,
    pub original_filename: String,
    pub content_type: Option<String>,
    /// Payload size in bytes
    pub size: i64,
    pub description: Option<String>,
    #[schema(example = "2024-01-01 08:00:00")]
    pub upload_time: String,
}

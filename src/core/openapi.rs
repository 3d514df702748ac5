use utoipa::{Modify, OpenApi};

use crate::features::export::{dtos as export_dtos, handlers as export_handlers};
use crate::features::gps::{dtos as gps_dtos, handlers as gps_handlers};
use crate::features::maintenance::{dtos as maintenance_dtos, handlers as maintenance_handlers};
use crate::features::sentiments::{dtos as sentiments_dtos, handlers as sentiments_handlers};
use crate::features::vlogs::{dtos as vlogs_dtos, handlers as vlogs_handlers};
use crate::shared::types::{ApiResponse, CreatedDto, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Ingestion
        sentiments_handlers::create_sentiment,
        sentiments_handlers::list_sentiments,
        gps_handlers::create_gps,
        gps_handlers::list_gps,
        vlogs_handlers::upload_vlog,
        vlogs_handlers::download_vlog,
        // Export
        export_handlers::dashboard,
        export_handlers::sentiments_csv,
        export_handlers::sentiments_preview,
        export_handlers::gps_csv,
        export_handlers::gps_preview,
        export_handlers::vlogs_page,
        export_handlers::download_all_vlogs,
        export_handlers::download_selected_vlogs,
        export_handlers::export_all,
        export_handlers::export_all_download,
        // Maintenance
        maintenance_handlers::clear_all_data,
    ),
    components(
        schemas(
            Meta,
            CreatedDto,
            ApiResponse<CreatedDto>,
            sentiments_dtos::CreateSentimentDto,
            sentiments_dtos::SentimentResponseDto,
            ApiResponse<Vec<sentiments_dtos::SentimentResponseDto>>,
            gps_dtos::CreateGpsDto,
            gps_dtos::GpsResponseDto,
            ApiResponse<Vec<gps_dtos::GpsResponseDto>>,
            vlogs_dtos::UploadVlogForm,
            vlogs_dtos::VlogUploadedDto,
            vlogs_dtos::VlogResponseDto,
            ApiResponse<vlogs_dtos::VlogUploadedDto>,
            export_dtos::ExportDocument,
            export_dtos::TotalRecords,
            maintenance_dtos::ClearAllResult,
            maintenance_dtos::CollectionPurgeReport,
            maintenance_dtos::BlobPurgeReport,
            ApiResponse<maintenance_dtos::ClearAllResult>,
        )
    ),
    tags(
        (name = "sentiments", description = "Emotion ratings from the app"),
        (name = "gps", description = "GPS fixes from the app"),
        (name = "vlogs", description = "Video diary upload and download"),
        (name = "export", description = "Operator pages and CSV/JSON/ZIP downloads (UTC+8)"),
        (name = "maintenance", description = "Destructive reset"),
    ),
    info(
        title = "EmoGo Backend API",
        version = "0.1.0",
        description = "Ingestion and export API for the EmoGo app",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

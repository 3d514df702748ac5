mod archive_service;
mod csv_export;
mod export_service;

pub use archive_service::{ArchiveService, VlogArchive, VlogSelection};
pub use csv_export::{export_gps_csv, export_sentiments_csv};
pub use export_service::ExportService;

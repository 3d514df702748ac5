pub mod export_handler;

pub use export_handler::{
    __path_dashboard, __path_download_all_vlogs, __path_download_selected_vlogs,
    __path_export_all, __path_export_all_download, __path_gps_csv, __path_gps_preview,
    __path_sentiments_csv, __path_sentiments_preview, __path_vlogs_page, dashboard,
    download_all_vlogs, download_selected_vlogs, export_all, export_all_download, gps_csv,
    gps_preview, sentiments_csv, sentiments_preview, vlogs_page,
};

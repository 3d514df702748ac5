pub mod vlog_handler;

pub use vlog_handler::{__path_download_vlog, __path_upload_vlog, download_vlog, upload_vlog};

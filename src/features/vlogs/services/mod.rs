mod vlog_service;

pub use vlog_service::VlogService;

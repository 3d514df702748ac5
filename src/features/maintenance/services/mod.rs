mod reset_service;

pub use reset_service::ResetService;

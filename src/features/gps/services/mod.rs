mod gps_service;

pub use gps_service::GpsService;

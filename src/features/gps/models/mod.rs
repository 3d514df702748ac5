mod gps_coordinate;

pub use gps_coordinate::GpsRecord;

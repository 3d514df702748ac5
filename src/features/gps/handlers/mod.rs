pub mod gps_handler;

pub use gps_handler::{__path_create_gps, __path_list_gps, create_gps, list_gps};

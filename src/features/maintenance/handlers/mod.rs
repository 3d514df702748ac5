pub mod reset_handler;

pub use reset_handler::{__path_clear_all_data, clear_all_data};

pub mod export;
pub mod gps;
pub mod maintenance;
pub mod sentiments;
pub mod vlogs;

pub mod constants;
pub mod download;
pub mod pages;
pub mod test_helpers;
pub mod time;
pub mod types;
pub mod validation;

mod vlog;

pub use vlog::VlogRecord;

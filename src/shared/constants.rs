/// Record collection holding sentiment ratings
pub const SENTIMENTS_COLLECTION: &str = "sentiments";

/// Record collection holding GPS fixes
pub const GPS_COLLECTION: &str = "gps_coordinates";

/// Record collection holding vlog metadata
pub const VLOGS_COLLECTION: &str = "vlogs";

/// Rows shown on the HTML preview pages
pub const PREVIEW_LIMIT: i64 = 100;

/// Display offset applied to every rendered timestamp (UTC+8)
pub const DISPLAY_UTC_OFFSET_SECS: i32 = 8 * 3600;

/// Human readable label for the display offset
pub const DISPLAY_TIMEZONE_LABEL: &str = "Asia/Taipei (UTC+8)";

/// Response header listing vlog ids left out of an archive
pub const SKIPPED_VLOG_IDS_HEADER: &str = "x-skipped-vlog-ids";

/// Response header carrying the number of archive entries
pub const ARCHIVE_ENTRIES_HEADER: &str = "x-archive-entries";

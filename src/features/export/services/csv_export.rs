//! CSV rendering for spreadsheet tools.
//!
//! Output starts with a UTF-8 BOM so Excel picks the right encoding for
//! non-ASCII notes. Quoting follows RFC 4180, only where needed.

use csv::{QuoteStyle, WriterBuilder};

use crate::core::error::{AppError, Result};
use crate::features::gps::models::GpsRecord;
use crate::features::sentiments::models::SentimentRecord;
use crate::shared::time::display_time;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const SENTIMENT_HEADER: [&str; 4] = ["emotion", "score", "note", "timestamp"];
const GPS_HEADER: [&str; 3] = ["latitude", "longitude", "timestamp"];

fn write_csv<const N: usize>(header: [&str; N], rows: Vec<[String; N]>) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(UTF8_BOM.to_vec());

    writer.write_record(header).map_err(csv_error)?;
    for row in rows {
        writer.write_record(&row).map_err(csv_error)?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to flush CSV: {}", e)))
}

fn csv_error(e: csv::Error) -> AppError {
    AppError::Internal(format!("Failed to write CSV: {}", e))
}

/// `emotion,score,note,timestamp`; a missing note is an empty field
pub fn export_sentiments_csv(records: &[SentimentRecord]) -> Result<Vec<u8>> {
    let rows = records
        .iter()
        .map(|r| {
            [
                r.emotion.clone(),
                r.score.to_string(),
                r.note.clone().unwrap_or_default(),
                display_time(r.timestamp),
            ]
        })
        .collect();
    write_csv(SENTIMENT_HEADER, rows)
}

/// `latitude,longitude,timestamp`
pub fn export_gps_csv(records: &[GpsRecord]) -> Result<Vec<u8>> {
    let rows = records
        .iter()
        .map(|r| {
            [
                r.latitude.to_string(),
                r.longitude.to_string(),
                display_time(r.timestamp),
            ]
        })
        .collect();
    write_csv(GPS_HEADER, rows)
}

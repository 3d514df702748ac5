use mongodb::bson::oid::ObjectId;
use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::core::error::{AppError, Result};
use crate::features::vlogs::models::VlogRecord;
use crate::features::vlogs::VlogService;
use crate::shared::validation::sanitize_filename;

/// Which vlogs go into an archive
#[derive(Debug, Clone)]
pub enum VlogSelection {
    All,
    /// Raw ids as requested by the client, in request order
    Ids(Vec<String>),
}

/// Finished ZIP plus a report of what was left out
#[derive(Debug)]
pub struct VlogArchive {
    pub bytes: Vec<u8>,
    pub entries: usize,
    /// Ids that were malformed, unknown or whose payload is gone
    pub skipped_ids: Vec<String>,
}

/// Packages vlog payloads into a single deflated ZIP.
///
/// Unusable ids are skipped and reported, never fatal. Store failures are.
pub struct ArchiveService {
    vlogs: Arc<VlogService>,
}

impl ArchiveService {
    pub fn new(vlogs: Arc<VlogService>) -> Self {
        Self { vlogs }
    }

    pub async fn package_vlogs(&self, selection: VlogSelection) -> Result<VlogArchive> {
        let (records, requested, mut skipped) = match selection {
            VlogSelection::All => (self.vlogs.list().await?, None, HashSet::new()),
            VlogSelection::Ids(requested) => {
                let mut skipped = HashSet::new();
                let mut object_ids = Vec::new();
                for raw in &requested {
                    match ObjectId::from_str(raw) {
                        Ok(id) => object_ids.push(id),
                        Err(_) => {
                            skipped.insert(raw.clone());
                        }
                    }
                }

                let records = self.vlogs.find_by_ids(object_ids).await?;
                let found: HashSet<String> = records.iter().map(VlogRecord::id_hex).collect();
                for raw in &requested {
                    if !skipped.contains(raw) && !found.contains(&raw.to_lowercase()) {
                        skipped.insert(raw.clone());
                    }
                }
                (records, Some(requested), skipped)
            }
        };

        let mut payloads = Vec::with_capacity(records.len());
        let mut missing_in_store_order = Vec::new();
        for record in records {
            match self.vlogs.open_blob(record.blob_ref).await? {
                Some(mut reader) => {
                    let mut data = Vec::with_capacity(record.size.max(0) as usize);
                    reader.read_to_end(&mut data).await.map_err(|e| {
                        AppError::Internal(format!(
                            "Failed to read vlog blob {}: {}",
                            record.blob_ref, e
                        ))
                    })?;
                    payloads.push((record, data));
                }
                None => {
                    warn!(
                        "Vlog {} references missing blob {}, skipping",
                        record.id_hex(),
                        record.blob_ref
                    );
                    missing_in_store_order.push(record.id_hex());
                }
            }
        }

        let skipped_ids = match requested {
            Some(requested) => {
                skipped.extend(missing_in_store_order);
                requested
                    .into_iter()
                    .filter(|raw| skipped.contains(raw) || skipped.contains(&raw.to_lowercase()))
                    .collect()
            }
            None => missing_in_store_order,
        };

        let entries = payloads.len();
        let bytes = tokio::task::spawn_blocking(move || build_zip(payloads))
            .await
            .map_err(|e| AppError::Internal(format!("Archive task failed: {}", e)))??;

        info!(
            "Vlog archive built: entries={}, skipped={}, size={}",
            entries,
            skipped_ids.len(),
            bytes.len()
        );

        Ok(VlogArchive {
            bytes,
            entries,
            skipped_ids,
        })
    }
}

fn build_zip(payloads: Vec<(VlogRecord, Vec<u8>)>) -> Result<Vec<u8>> {
    let zip_error = |e: zip::result::ZipError| AppError::Internal(format!("Failed to build ZIP: {}", e));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut used = HashSet::new();

    for (record, data) in payloads {
        let name = unique_entry_name(&entry_name(&record), &mut used);
        writer.start_file(name, options).map_err(zip_error)?;
        writer
            .write_all(&data)
            .map_err(|e| AppError::Internal(format!("Failed to write ZIP entry: {}", e)))?;
    }

    Ok(writer.finish().map_err(zip_error)?.into_inner())
}

/// Original name, else the stored name, else `vlog_<id>`
fn entry_name(record: &VlogRecord) -> String {
    sanitize_filename(&record.original_filename)
        .or_else(|| sanitize_filename(&record.filename))
        .unwrap_or_else(|| format!("vlog_{}", record.id_hex()))
}

/// First use keeps the name; later ones become `<stem>_<n><.ext>` with the
/// smallest free `n >= 1`.
fn unique_entry_name(name: &str, used: &mut HashSet<String>) -> String {
    if used.insert(name.to_string()) {
        return name.to_string();
    }

    let (stem, ext) = match name.rfind('.') {
        Some(dot) if dot > 0 => name.split_at(dot),
        _ => (name, ""),
    };

    let mut n = 1;
    loop {
        let candidate = format!("{}_{}{}", stem, n, ext);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

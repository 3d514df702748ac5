use chrono::Utc;
use mongodb::bson::{oid::ObjectId, to_document};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::vlogs::dtos::{UploadVlogDto, VlogUploadedDto, DEFAULT_CONTENT_TYPE};
use crate::features::vlogs::models::VlogRecord;
use crate::modules::storage::{
    decode_documents, BlobReader, BlobStore, Collection, RecordFilter, RecordStore,
};
use crate::shared::time::file_stamp;
use crate::shared::validation::sanitize_filename;

/// Service for vlog uploads and payload access
pub struct VlogService {
    records: Arc<dyn RecordStore>,
    blobs: Arc<dyn BlobStore>,
    max_size: usize,
}

impl VlogService {
    pub fn new(records: Arc<dyn RecordStore>, blobs: Arc<dyn BlobStore>, max_size: usize) -> Self {
        Self {
            records,
            blobs,
            max_size,
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Store the payload, then its metadata.
    ///
    /// If the metadata insert fails the freshly written blob is removed again
    /// so no payload is left without a record.
    pub async fn upload(&self, dto: UploadVlogDto) -> Result<VlogUploadedDto> {
        dto.validate()?;

        if dto.file.is_empty() {
            return Err(AppError::Validation("file: uploaded file is empty".to_string()));
        }
        if dto.file.len() > self.max_size {
            return Err(AppError::PayloadTooLarge(format!(
                "file: maximum size is {} bytes ({} MB)",
                self.max_size,
                self.max_size / 1024 / 1024
            )));
        }

        let now = Utc::now();
        let original_filename = dto.original_filename.trim().to_string();
        let safe_name = sanitize_filename(&original_filename).unwrap_or_else(|| "vlog".to_string());
        let filename = format!("{}_{}", file_stamp(now), safe_name);
        let size = dto.file.len() as i64;

        let blob_ref = self.blobs.put(&filename, dto.file).await?;
        debug!("Vlog payload stored: blob={}, size={}", blob_ref, size);

        let record = VlogRecord {
            id: None,
            blob_ref,
            filename: filename.clone(),
            original_filename,
            content_type: Some(
                dto.content_type
                    .filter(|ct| !ct.is_empty())
                    .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            ),
            size,
            description: dto
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            upload_time: now,
        };

        let inserted = match to_document(&record) {
            Ok(document) => self.records.insert(Collection::Vlogs, document).await,
            Err(e) => Err(e.into()),
        };

        let id = match inserted {
            Ok(id) => id,
            Err(e) => {
                if let Err(cleanup) = self.blobs.delete(blob_ref).await {
                    warn!(
                        "Failed to remove orphaned vlog blob {}: {}",
                        blob_ref, cleanup
                    );
                }
                return Err(e);
            }
        };

        info!("Vlog saved: id={}, filename={}, size={}", id, filename, size);

        Ok(VlogUploadedDto {
            id: id.to_hex(),
            filename,
        })
    }

    pub async fn list(&self) -> Result<Vec<VlogRecord>> {
        let documents = self
            .records
            .find(Collection::Vlogs, RecordFilter::All, None)
            .await?;
        decode_documents(documents)
    }

    /// Records for the given ids, in store order. Unknown ids are simply absent.
    pub async fn find_by_ids(&self, ids: Vec<ObjectId>) -> Result<Vec<VlogRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let documents = self
            .records
            .find(Collection::Vlogs, RecordFilter::Ids(ids), None)
            .await?;
        decode_documents(documents)
    }

    pub async fn get(&self, id: &str) -> Result<VlogRecord> {
        let not_found = || AppError::NotFound(format!("Vlog '{}' not found", id));
        let object_id = ObjectId::from_str(id).map_err(|_| not_found())?;

        self.find_by_ids(vec![object_id])
            .await?
            .into_iter()
            .next()
            .ok_or_else(not_found)
    }

    /// Open the payload of a blob, `None` when it no longer exists
    pub async fn open_blob(&self, blob_ref: ObjectId) -> Result<Option<BlobReader>> {
        self.blobs.open(blob_ref).await
    }

    /// Record plus a reader over its payload
    pub async fn open(&self, id: &str) -> Result<(VlogRecord, BlobReader)> {
        let record = self.get(id).await?;
        match self.open_blob(record.blob_ref).await? {
            Some(reader) => Ok((record, reader)),
            None => {
                warn!("Vlog {} references missing blob {}", id, record.blob_ref);
                Err(AppError::NotFound(format!("Vlog '{}' payload not found", id)))
            }
        }
    }

    pub async fn count(&self) -> Result<u64> {
        self.records.count(Collection::Vlogs).await
    }
}

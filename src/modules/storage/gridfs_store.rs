//! GridFS-backed blob store
//!
//! Payloads are split into chunks by the driver; this type only maps the
//! bucket API onto [`BlobStore`].

use async_trait::async_trait;
use axum::body::Bytes;
use futures::io::AsyncWriteExt;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Bson};
use mongodb::error::{Error as MongoError, ErrorKind, GridFsErrorKind};
use mongodb::gridfs::GridFsBucket;
use mongodb::options::GridFsBucketOptions;
use mongodb::Database;
use tokio_util::compat::FuturesAsyncReadCompatExt;
use tracing::{debug, info, warn};

use crate::core::error::{AppError, Result};
use crate::modules::storage::{BlobPurge, BlobReader, BlobStore};

pub struct GridFsBlobStore {
    bucket: GridFsBucket,
}

impl GridFsBlobStore {
    pub fn new(database: &Database, bucket_name: &str) -> Self {
        let options = GridFsBucketOptions::builder()
            .bucket_name(bucket_name.to_string())
            .build();

        Self {
            bucket: database.gridfs_bucket(options),
        }
    }

    fn is_file_not_found(error: &MongoError) -> bool {
        matches!(
            *error.kind,
            ErrorKind::GridFs(GridFsErrorKind::FileNotFound { .. })
        )
    }
}

#[async_trait]
impl BlobStore for GridFsBlobStore {
    async fn put(&self, filename: &str, data: Bytes) -> Result<ObjectId> {
        let mut upload = self.bucket.open_upload_stream(filename).await?;

        if let Err(e) = upload.write_all(&data).await {
            if let Err(abort_err) = upload.abort().await {
                warn!("Failed to abort GridFS upload '{}': {}", filename, abort_err);
            }
            return Err(AppError::Internal(format!(
                "Failed to write blob '{}': {}",
                filename, e
            )));
        }

        upload
            .close()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to finish blob '{}': {}", filename, e)))?;

        match upload.id() {
            Bson::ObjectId(id) => {
                debug!("Stored blob {} ({} bytes) as '{}'", id, data.len(), filename);
                Ok(*id)
            }
            other => Err(AppError::Internal(format!(
                "Unexpected GridFS id type: {:?}",
                other
            ))),
        }
    }

    async fn open(&self, id: ObjectId) -> Result<Option<BlobReader>> {
        match self.bucket.open_download_stream(Bson::ObjectId(id)).await {
            Ok(stream) => Ok(Some(Box::pin(stream.compat()))),
            Err(e) if Self::is_file_not_found(&e) => {
                debug!("Blob {} not found", id);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: ObjectId) -> Result<bool> {
        match self.bucket.delete(Bson::ObjectId(id)).await {
            Ok(()) => Ok(true),
            Err(e) if Self::is_file_not_found(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_all(&self) -> Result<BlobPurge> {
        let files: Vec<_> = self.bucket.find(doc! {}).await?.try_collect().await?;

        let mut purge = BlobPurge::default();
        for file in files {
            match self.bucket.delete(file.id.clone()).await {
                Ok(()) => purge.deleted += 1,
                Err(e) if Self::is_file_not_found(&e) => {}
                Err(e) => {
                    warn!("Failed to delete blob {:?}: {}", file.id, e);
                    purge.failed += 1;
                }
            }
        }

        info!(
            "Blob purge finished: deleted={}, failed={}",
            purge.deleted, purge.failed
        );
        Ok(purge)
    }
}

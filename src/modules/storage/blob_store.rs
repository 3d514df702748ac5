use async_trait::async_trait;
use axum::body::Bytes;
use mongodb::bson::oid::ObjectId;
use std::pin::Pin;
use tokio::io::AsyncRead;

use crate::core::error::Result;

/// Byte stream over one stored blob
pub type BlobReader = Pin<Box<dyn AsyncRead + Send>>;

/// Outcome of deleting every blob
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlobPurge {
    pub deleted: u64,
    pub failed: u64,
}

/// Chunked binary storage for vlog payloads
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a payload under `filename`, returning the blob id
    async fn put(&self, filename: &str, data: Bytes) -> Result<ObjectId>;

    /// Open a blob for reading; `None` when no blob has this id
    async fn open(&self, id: ObjectId) -> Result<Option<BlobReader>>;

    /// Delete one blob; `false` when it did not exist
    async fn delete(&self, id: ObjectId) -> Result<bool>;

    /// Delete every blob. Individual failures are counted, not raised.
    async fn delete_all(&self) -> Result<BlobPurge>;
}

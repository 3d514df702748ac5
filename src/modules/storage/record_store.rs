use async_trait::async_trait;
use mongodb::bson::{from_document, oid::ObjectId, Document};
use serde::de::DeserializeOwned;

use crate::core::error::{AppError, Result};
use crate::shared::constants::{GPS_COLLECTION, SENTIMENTS_COLLECTION, VLOGS_COLLECTION};

/// The three independent record collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Sentiments,
    GpsCoordinates,
    Vlogs,
}

impl Collection {
    #[cfg(test)]
    pub const ALL: [Collection; 3] = [
        Collection::Sentiments,
        Collection::GpsCoordinates,
        Collection::Vlogs,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::Sentiments => SENTIMENTS_COLLECTION,
            Collection::GpsCoordinates => GPS_COLLECTION,
            Collection::Vlogs => VLOGS_COLLECTION,
        }
    }
}

/// Which records a scan returns
#[derive(Debug, Clone, PartialEq)]
pub enum RecordFilter {
    All,
    Ids(Vec<ObjectId>),
}

/// Document collection with insert, filtered scan, count and bulk delete.
///
/// Scans yield documents in store iteration order. Every document carries its
/// `_id`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert one document and return the id the store assigned
    async fn insert(&self, collection: Collection, document: Document) -> Result<ObjectId>;

    async fn find(
        &self,
        collection: Collection,
        filter: RecordFilter,
        limit: Option<i64>,
    ) -> Result<Vec<Document>>;

    async fn count(&self, collection: Collection) -> Result<u64>;

    /// Delete every document in the collection, returning how many went away
    async fn delete_all(&self, collection: Collection) -> Result<u64>;
}

/// Decode scanned documents into typed records
pub fn decode_documents<T: DeserializeOwned>(documents: Vec<Document>) -> Result<Vec<T>> {
    documents
        .into_iter()
        .map(|doc| from_document::<T>(doc).map_err(AppError::from))
        .collect()
}

//! In-process stores used by tests

use async_trait::async_trait;
use axum::body::Bytes;
use mongodb::bson::{oid::ObjectId, Document};
use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::core::error::{AppError, Result};
use crate::modules::storage::{BlobPurge, BlobReader, BlobStore, Collection, RecordFilter, RecordStore};

#[derive(Default)]
pub struct MemoryRecordStore {
    collections: Mutex<HashMap<Collection, Vec<Document>>>,
    failing_deletes: Mutex<HashSet<Collection>>,
    unavailable: AtomicBool,
}

impl MemoryRecordStore {
    /// Make `delete_all` fail for one collection
    pub fn fail_deletes_for(&self, collection: Collection) {
        self.failing_deletes.lock().unwrap().insert(collection);
    }

    /// Make every operation fail as if the database were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn documents(&self, collection: Collection) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap()
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Internal("record store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn insert(&self, collection: Collection, mut document: Document) -> Result<ObjectId> {
        self.check_available()?;
        let id = match document.get_object_id("_id") {
            Ok(id) => id,
            Err(_) => {
                let id = ObjectId::new();
                document.insert("_id", id);
                id
            }
        };

        self.collections
            .lock()
            .unwrap()
            .entry(collection)
            .or_default()
            .push(document);
        Ok(id)
    }

    async fn find(
        &self,
        collection: Collection,
        filter: RecordFilter,
        limit: Option<i64>,
    ) -> Result<Vec<Document>> {
        self.check_available()?;
        let limit = limit.map(|l| l.max(0) as usize).unwrap_or(usize::MAX);

        Ok(self
            .documents(collection)
            .into_iter()
            .filter(|doc| match &filter {
                RecordFilter::All => true,
                RecordFilter::Ids(ids) => doc
                    .get_object_id("_id")
                    .map(|id| ids.contains(&id))
                    .unwrap_or(false),
            })
            .take(limit)
            .collect())
    }

    async fn count(&self, collection: Collection) -> Result<u64> {
        self.check_available()?;
        Ok(self.documents(collection).len() as u64)
    }

    async fn delete_all(&self, collection: Collection) -> Result<u64> {
        self.check_available()?;
        if self.failing_deletes.lock().unwrap().contains(&collection) {
            return Err(AppError::Internal(format!(
                "delete failed for {}",
                collection.name()
            )));
        }

        let removed = self
            .collections
            .lock()
            .unwrap()
            .remove(&collection)
            .unwrap_or_default();
        Ok(removed.len() as u64)
    }
}

struct StoredBlob {
    id: ObjectId,
    filename: String,
    data: Bytes,
}

#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<Vec<StoredBlob>>,
    failing_deletes: Mutex<HashSet<ObjectId>>,
    failing_puts: AtomicBool,
}

impl MemoryBlobStore {
    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }

    pub fn filenames(&self) -> Vec<String> {
        self.blobs
            .lock()
            .unwrap()
            .iter()
            .map(|b| b.filename.clone())
            .collect()
    }

    /// Drop a blob behind the owning record's back
    pub fn remove(&self, id: ObjectId) {
        self.blobs.lock().unwrap().retain(|b| b.id != id);
    }

    pub fn fail_delete_of(&self, id: ObjectId) {
        self.failing_deletes.lock().unwrap().insert(id);
    }

    pub fn set_failing_puts(&self, failing: bool) {
        self.failing_puts.store(failing, Ordering::SeqCst);
    }

    pub fn ids(&self) -> Vec<ObjectId> {
        self.blobs.lock().unwrap().iter().map(|b| b.id).collect()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, filename: &str, data: Bytes) -> Result<ObjectId> {
        if self.failing_puts.load(Ordering::SeqCst) {
            return Err(AppError::Internal("blob store unavailable".to_string()));
        }

        let id = ObjectId::new();
        self.blobs.lock().unwrap().push(StoredBlob {
            id,
            filename: filename.to_string(),
            data,
        });
        Ok(id)
    }

    async fn open(&self, id: ObjectId) -> Result<Option<BlobReader>> {
        let blobs = self.blobs.lock().unwrap();
        Ok(blobs
            .iter()
            .find(|b| b.id == id)
            .map(|b| Box::pin(Cursor::new(b.data.clone())) as BlobReader))
    }

    async fn delete(&self, id: ObjectId) -> Result<bool> {
        let mut blobs = self.blobs.lock().unwrap();
        let before = blobs.len();
        blobs.retain(|b| b.id != id);
        Ok(blobs.len() != before)
    }

    async fn delete_all(&self) -> Result<BlobPurge> {
        let failing = self.failing_deletes.lock().unwrap().clone();
        let mut blobs = self.blobs.lock().unwrap();

        let mut purge = BlobPurge::default();
        blobs.retain(|b| {
            if failing.contains(&b.id) {
                purge.failed += 1;
                true
            } else {
                purge.deleted += 1;
                false
            }
        });
        Ok(purge)
    }
}

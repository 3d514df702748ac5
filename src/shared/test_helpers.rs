#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use crate::modules::storage::{BlobStore, MemoryBlobStore, MemoryRecordStore, RecordStore};

/// In-memory record and blob stores shared by handler tests
#[cfg(test)]
pub struct TestStores {
    pub records: Arc<MemoryRecordStore>,
    pub blobs: Arc<MemoryBlobStore>,
}

#[cfg(test)]
impl TestStores {
    pub fn new() -> Self {
        Self {
            records: Arc::new(MemoryRecordStore::default()),
            blobs: Arc::new(MemoryBlobStore::default()),
        }
    }

    pub fn record_store(&self) -> Arc<dyn RecordStore> {
        self.records.clone()
    }

    pub fn blob_store(&self) -> Arc<dyn BlobStore> {
        self.blobs.clone()
    }
}

//! Storage module for records and vlog payloads
//!
//! Records live in MongoDB collections, vlog payloads in a GridFS bucket.
//! Services only see the [`RecordStore`] and [`BlobStore`] traits.

mod blob_store;
mod gridfs_store;
#[cfg(test)]
mod memory_store;
mod mongo_store;
mod record_store;

pub use blob_store::{BlobPurge, BlobReader, BlobStore};
pub use gridfs_store::GridFsBlobStore;
#[cfg(test)]
pub use memory_store::{MemoryBlobStore, MemoryRecordStore};
pub use mongo_store::MongoRecordStore;
pub use record_store::{decode_documents, Collection, RecordFilter, RecordStore};

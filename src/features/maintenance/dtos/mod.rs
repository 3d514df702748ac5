mod reset_dto;

pub use reset_dto::{BlobPurgeReport, ClearAllQuery, ClearAllResult, CollectionPurgeReport};

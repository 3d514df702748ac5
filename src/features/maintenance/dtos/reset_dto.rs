use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ClearAllQuery {
    /// Must be `true`, otherwise nothing is deleted
    pub confirm: Option<bool>,
}

/// Per-collection outcome of a reset
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CollectionPurgeReport {
    pub deleted: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BlobPurgeReport {
    pub deleted: u64,
    pub failed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// What a reset removed; `success` is false when any step failed
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClearAllResult {
    pub success: bool,
    pub sentiments: CollectionPurgeReport,
    pub gps_coordinates: CollectionPurgeReport,
    pub vlogs: CollectionPurgeReport,
    pub blobs: BlobPurgeReport,
}

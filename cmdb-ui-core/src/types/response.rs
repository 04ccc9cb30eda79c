//! Request bodies for the CMDB REST API

use serde::{Deserialize, Serialize};

/// Bulk soft-delete request (`POST {resource}/bulk-soft-delete`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    /// Identifiers of the records to delete
    pub ids: Vec<String>,
}

/// Per-record failure inside a bulk operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkFailure {
    pub id: String,
    pub error: String,
}

/// Bulk soft-delete result; the server deletes what it can and reports the rest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    #[serde(default)]
    pub deleted: Vec<String>,
    #[serde(default)]
    pub errors: Vec<BulkFailure>,
}

impl BulkDeleteResponse {
    /// Whether every requested record was deleted
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

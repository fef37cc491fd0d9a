//! API response types
//!
//! The reservation API has no envelope: success bodies are the resource
//! itself and failures carry `{"error": "..."}`.

use serde::{Deserialize, Serialize};

/// Error body of a non-2xx response
///
/// ```json
/// { "error": "restaurant not found" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of a create endpoint. Only the new id is read; the rest is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Created {
    pub id: String,
}

//! Client-related types shared between pages and the HTTP client
//!
//! Response shapes of the backend endpoints that are not raw record rows.

use serde::{Deserialize, Serialize};

/// Employee verification response, the status-gate source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub employee_status_id: i64,
}

/// Acknowledgement returned by the insert endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAck {
    /// Server-provided confirmation message, when one is sent.
    #[serde(default)]
    pub message: Option<String>,
}

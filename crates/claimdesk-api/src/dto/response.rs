//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Standard envelope for successful API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Always `true` for a success response.
    pub success: bool,
    /// The payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wraps a payload in the success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A bare count, used by bulk operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// Number of rows affected.
    pub count: u64,
}

/// A plain confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Confirmation text.
    pub message: String,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status, `"ok"` when healthy.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Assistant completion returned by the stateless chat proxy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiChatResponse {
    /// The assistant's reply text.
    pub response: String,
}

//! Shared response types for API handlers.

use serde::Serialize;

/// Standard `{ "message": ... }` confirmation body.
///
/// Used by operations that confirm success without returning a resource
/// (registration, role assignment).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

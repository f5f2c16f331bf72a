//! Success response bodies.

use serde::{Deserialize, Serialize};

/// Human-readable acknowledgment returned instead of a created entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GenericResponse {
    #[cfg_attr(feature = "openapi", schema(example = "User saved"))]
    pub message: String,
}

impl GenericResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

//! API Response types
//!
//! The storefront backend answers every JSON endpoint with a flat envelope:
//! ```json
//! { "success": true, "products": [ ... ] }
//! { "success": false, "error": "This product is currently out of stock" }
//! ```
//! [`ApiStatus`] carries the two common fields and is flattened into each
//! endpoint-specific response.

use serde::{Deserialize, Serialize};

/// Common `success`/`error` fields of every response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiStatus {
    /// Error message, or a generic one when the server sent none
    pub fn error_message(&self) -> String {
        self.error
            .clone()
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}

//! Shared types for the storefront
//!
//! Wire DTOs and domain value types used by the storefront client and any
//! server speaking the same JSON API.

pub mod client;
pub mod models;
pub mod money;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{CartMembershipSet, Discount, PreorderState, PreorderStatus, ProductId, ProductSummary};
pub use response::ApiStatus;

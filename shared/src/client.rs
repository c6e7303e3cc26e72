//! Client-related types shared between server and client
//!
//! Request/response bodies of the storefront JSON API. Field names match the
//! backend exactly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::product::null_as_default;
use crate::models::{CartItemRef, PreorderState, ProductSummary};
use crate::response::ApiStatus;

// Re-export request bodies living next to their models
pub use crate::models::AddToCartRequest;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Logged-in customer profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// `GET /api/user/info`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfoResponse {
    #[serde(flatten)]
    pub status: ApiStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

// =============================================================================
// Cart API DTOs
// =============================================================================

/// `GET /api/cart/items`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemsResponse {
    #[serde(flatten)]
    pub status: ApiStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_items: Option<Vec<CartItemRef>>,
}

/// `POST /api/cart/add`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToCartResponse {
    #[serde(flatten)]
    pub status: ApiStatus,
}

// =============================================================================
// Catalog API DTOs
// =============================================================================

/// `GET /staff/categories/{id}/products` and `GET /api/products/discounted`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListResponse {
    #[serde(flatten)]
    pub status: ApiStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<ProductSummary>>,
}

/// Pagination block of the walk-in product search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub page_size: u32,
}

/// `GET /api/walk-in/products`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkInProductsResponse {
    #[serde(flatten)]
    pub status: ApiStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<ProductSummary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
}

// =============================================================================
// Pre-order API DTOs
// =============================================================================

/// `GET /api/preorders/status?product_ids=..`
///
/// Keys are product IDs rendered as JSON object keys (strings).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreorderStatusResponse {
    #[serde(flatten)]
    pub status: ApiStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preorder_status: Option<HashMap<String, PreorderState>>,
}

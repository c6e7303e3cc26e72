//! Remote data sources
//!
//! Traits at the seam between the state core and the backend. The real
//! implementation is [`StorefrontApi`](crate::StorefrontApi); tests plug in
//! scripted fakes.

use async_trait::async_trait;
use shared::client::UserProfile;
use shared::{PreorderState, ProductId, ProductSummary};
use std::collections::HashMap;

use crate::ClientResult;
use crate::walk_in::{WalkInPage, WalkInQuery};

/// Who is looking at the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visitor {
    Authenticated(UserProfile),
    Anonymous,
}

/// Authoritative cart state on the server
#[async_trait]
pub trait RemoteCartGateway: Send + Sync {
    /// Identify the visitor.
    ///
    /// Never fails: any transport or decode problem yields
    /// [`Visitor::Anonymous`].
    async fn fetch_current_user(&self) -> Visitor;

    /// Product IDs with a line in the remote cart.
    ///
    /// Lines without a product ID (pre-orders) are skipped. An `Err` means
    /// the cart could not be read; callers keep what they had.
    async fn fetch_cart_items(&self) -> ClientResult<Vec<ProductId>>;

    /// Put `quantity` units of a product in the remote cart.
    async fn add_to_cart(&self, product_id: ProductId, quantity: u32) -> ClientResult<()>;
}

/// Product listings
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_category_products(&self, category_id: i64) -> ClientResult<Vec<ProductSummary>>;

    /// Discounted products, biggest discount first
    async fn fetch_discounted_products(&self, limit: u32) -> ClientResult<Vec<ProductSummary>>;

    async fn fetch_walk_in_products(&self, query: &WalkInQuery) -> ClientResult<WalkInPage>;
}

/// Active pre-orders of the visitor
#[async_trait]
pub trait PreorderSource: Send + Sync {
    /// Only products with an active pre-order appear in the result.
    async fn fetch_preorder_status(
        &self,
        product_ids: &[ProductId],
    ) -> ClientResult<HashMap<ProductId, PreorderState>>;
}

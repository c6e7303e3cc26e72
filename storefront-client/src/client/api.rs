// storefront-client/src/client/api.rs
// Storefront JSON API over any HttpClient

use async_trait::async_trait;
use shared::client::{
    AddToCartRequest, AddToCartResponse, CartItemsResponse, PreorderStatusResponse,
    ProductListResponse, UserInfoResponse, WalkInProductsResponse,
};
use shared::{PreorderState, ProductId, ProductSummary};
use std::collections::HashMap;

use crate::config::Endpoints;
use crate::gateway::{CatalogSource, PreorderSource, RemoteCartGateway, Visitor};
use crate::walk_in::{WalkInPage, WalkInQuery};
use crate::{ClientError, ClientResult};

use super::http::HttpClient;

/// Typed storefront API
///
/// Implements every remote data source on top of a transport: the network
/// client in production, the oneshot client against an in-process router.
#[derive(Debug, Clone)]
pub struct StorefrontApi<C: HttpClient> {
    http: C,
    endpoints: Endpoints,
}

impl<C: HttpClient> StorefrontApi<C> {
    pub fn new(http: C) -> Self {
        Self::with_endpoints(http, Endpoints::default())
    }

    pub fn with_endpoints(http: C, endpoints: Endpoints) -> Self {
        Self { http, endpoints }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

/// Per-call token defeating intermediary caches
fn cache_buster() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

#[async_trait]
impl<C: HttpClient> RemoteCartGateway for StorefrontApi<C> {
    async fn fetch_current_user(&self) -> Visitor {
        match self.http.get::<UserInfoResponse>(&self.endpoints.user_info).await {
            Ok(UserInfoResponse { status, user: Some(user) }) if status.success => {
                tracing::debug!(user_id = user.id, "Visitor is logged in");
                Visitor::Authenticated(user)
            }
            Ok(_) => Visitor::Anonymous,
            Err(e) => {
                tracing::warn!(error = %e, "User lookup failed, treating visitor as anonymous");
                Visitor::Anonymous
            }
        }
    }

    async fn fetch_cart_items(&self) -> ClientResult<Vec<ProductId>> {
        let response: CartItemsResponse = self
            .http
            .get_with_query(&self.endpoints.cart_items, &[("t", cache_buster())])
            .await?;
        if !response.status.success {
            return Err(ClientError::Rejected(response.status.error_message()));
        }
        let items = response
            .cart_items
            .ok_or_else(|| ClientError::InvalidResponse("Missing cart_items".into()))?;

        Ok(items
            .into_iter()
            .filter_map(|item| item.id)
            .filter(|id| *id > 0)
            .collect())
    }

    async fn add_to_cart(&self, product_id: ProductId, quantity: u32) -> ClientResult<()> {
        let request = AddToCartRequest {
            product_id,
            quantity,
        };
        let response: AddToCartResponse = self.http.post(&self.endpoints.cart_add, &request).await?;
        if !response.status.success {
            return Err(ClientError::Rejected(response.status.error_message()));
        }
        Ok(())
    }
}

fn products_of(response: ProductListResponse) -> ClientResult<Vec<ProductSummary>> {
    if !response.status.success {
        return Err(ClientError::Rejected(response.status.error_message()));
    }
    Ok(response.products.unwrap_or_default())
}

#[async_trait]
impl<C: HttpClient> CatalogSource for StorefrontApi<C> {
    async fn fetch_category_products(&self, category_id: i64) -> ClientResult<Vec<ProductSummary>> {
        let path = self.endpoints.category_products_path(category_id);
        products_of(self.http.get(&path).await?)
    }

    async fn fetch_discounted_products(&self, limit: u32) -> ClientResult<Vec<ProductSummary>> {
        let response = self
            .http
            .get_with_query(&self.endpoints.discounted_products, &[("limit", limit.to_string())])
            .await?;
        products_of(response)
    }

    async fn fetch_walk_in_products(&self, query: &WalkInQuery) -> ClientResult<WalkInPage> {
        let response: WalkInProductsResponse = self
            .http
            .get_with_query(&self.endpoints.walk_in_products, &query.to_query())
            .await?;
        if !response.status.success {
            return Err(ClientError::Rejected(response.status.error_message()));
        }
        Ok(WalkInPage {
            products: response.products.unwrap_or_default(),
            pagination: response.pagination.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl<C: HttpClient> PreorderSource for StorefrontApi<C> {
    async fn fetch_preorder_status(
        &self,
        product_ids: &[ProductId],
    ) -> ClientResult<HashMap<ProductId, PreorderState>> {
        if product_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let ids = product_ids
            .iter()
            .map(ProductId::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let response: PreorderStatusResponse = self
            .http
            .get_with_query(&self.endpoints.preorder_status, &[("product_ids", ids)])
            .await?;
        if !response.status.success {
            return Err(ClientError::Rejected(response.status.error_message()));
        }

        Ok(response
            .preorder_status
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(id, state)| match id.parse::<ProductId>() {
                Ok(id) if state.has_preorder => Some((id, state)),
                Ok(_) => None,
                Err(_) => {
                    tracing::warn!(key = %id, "Ignoring pre-order status with a non-numeric product key");
                    None
                }
            })
            .collect())
    }
}

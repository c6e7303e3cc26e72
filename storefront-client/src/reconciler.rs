//! Cart state reconciliation
//!
//! Keeps a single in-memory [`CartMembershipSet`] in step with the server:
//! seeded from the durable cache for a fast first paint, replaced wholesale
//! by every successful remote fetch.

use parking_lot::RwLock;
use shared::{CartMembershipSet, ProductId};
use std::sync::Arc;

use crate::cache::LocalCartCache;
use crate::gateway::{RemoteCartGateway, Visitor};

/// Owner of the visitor's cart membership for one page session
///
/// Overlapping [`reconcile`](Self::reconcile) calls are not sequenced: the
/// one that completes last decides the snapshot.
pub struct CartStateReconciler {
    gateway: Arc<dyn RemoteCartGateway>,
    cache: LocalCartCache,
    snapshot: RwLock<CartMembershipSet>,
}

impl std::fmt::Debug for CartStateReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStateReconciler")
            .field("cache", &self.cache)
            .field("snapshot", &*self.snapshot.read())
            .finish()
    }
}

impl CartStateReconciler {
    /// Seeds the snapshot from the durable cache
    pub fn new(gateway: Arc<dyn RemoteCartGateway>, cache: LocalCartCache) -> Self {
        let seeded = cache.load();
        tracing::debug!(items = seeded.len(), "Seeded cart snapshot from cache");
        Self {
            gateway,
            cache,
            snapshot: RwLock::new(seeded),
        }
    }

    pub fn current_snapshot(&self) -> CartMembershipSet {
        self.snapshot.read().clone()
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.snapshot.read().contains(product_id)
    }

    /// Bring the snapshot in line with the server and return it.
    ///
    /// - anonymous visitor: snapshot and cache are cleared
    /// - cart fetched: snapshot and cache are replaced by the server's set
    /// - cart unreadable: snapshot is left as it was
    pub async fn reconcile(&self) -> CartMembershipSet {
        if let Visitor::Anonymous = self.gateway.fetch_current_user().await {
            *self.snapshot.write() = CartMembershipSet::new();
            self.cache.clear();
            tracing::debug!("Anonymous visitor, cart membership cleared");
            return CartMembershipSet::new();
        }

        match self.gateway.fetch_cart_items().await {
            Ok(ids) => {
                let fresh: CartMembershipSet = ids.into_iter().collect();
                self.cache.save(&fresh);
                *self.snapshot.write() = fresh.clone();
                tracing::info!(items = fresh.len(), "Cart membership reconciled");
                fresh
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cart fetch failed, keeping last known membership");
                self.current_snapshot()
            }
        }
    }

    /// Record a confirmed add-to-cart without waiting for a reconcile
    pub fn mark_added(&self, product_id: ProductId) {
        let snapshot = {
            let mut guard = self.snapshot.write();
            if !guard.insert(product_id) {
                return;
            }
            guard.clone()
        };
        self.cache.save(&snapshot);
        tracing::debug!(product_id, "Marked product as in cart");
    }

    /// Replace the snapshot with whatever the durable cache holds
    pub fn reload_from_cache(&self) -> CartMembershipSet {
        let cached = self.cache.load();
        *self.snapshot.write() = cached.clone();
        cached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCartStore;
    use crate::{ClientError, ClientResult};
    use async_trait::async_trait;
    use shared::client::UserProfile;

    struct FixedGateway {
        logged_in: bool,
        cart: Option<Vec<ProductId>>,
    }

    #[async_trait]
    impl RemoteCartGateway for FixedGateway {
        async fn fetch_current_user(&self) -> Visitor {
            if self.logged_in {
                Visitor::Authenticated(UserProfile {
                    id: 1,
                    first_name: "Dara".into(),
                    last_name: "Sok".into(),
                    email: "dara@example.com".into(),
                    phone: None,
                    address: None,
                })
            } else {
                Visitor::Anonymous
            }
        }

        async fn fetch_cart_items(&self) -> ClientResult<Vec<ProductId>> {
            self.cart
                .clone()
                .ok_or_else(|| ClientError::Internal("503 Service Unavailable".into()))
        }

        async fn add_to_cart(&self, _product_id: ProductId, _quantity: u32) -> ClientResult<()> {
            Ok(())
        }
    }

    fn cache_with(ids: &[ProductId]) -> LocalCartCache {
        let cache = LocalCartCache::new(Arc::new(MemoryCartStore::new()), "cartProductIds");
        cache.save(&ids.iter().copied().collect());
        cache
    }

    #[tokio::test]
    async fn test_seeded_from_cache() {
        let gateway = Arc::new(FixedGateway { logged_in: true, cart: None });
        let reconciler = CartStateReconciler::new(gateway, cache_with(&[4, 2]));
        assert_eq!(reconciler.current_snapshot().to_vec(), vec![2, 4]);

        // Failed fetch keeps the seeded set
        assert_eq!(reconciler.reconcile().await.to_vec(), vec![2, 4]);
    }

    #[tokio::test]
    async fn test_mark_added_is_idempotent() {
        let cache = cache_with(&[]);
        let gateway = Arc::new(FixedGateway { logged_in: true, cart: Some(vec![]) });
        let reconciler = CartStateReconciler::new(gateway, cache.clone());

        reconciler.mark_added(9);
        reconciler.mark_added(9);
        assert!(reconciler.contains(9));
        assert_eq!(cache.load().to_vec(), vec![9]);

        reconciler.mark_added(0);
        assert_eq!(reconciler.current_snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_reload_from_cache() {
        let cache = cache_with(&[1]);
        let gateway = Arc::new(FixedGateway { logged_in: false, cart: None });
        let reconciler = CartStateReconciler::new(gateway, cache.clone());

        cache.save(&[1, 6].into());
        assert_eq!(reconciler.reload_from_cache().to_vec(), vec![1, 6]);
        assert!(reconciler.contains(6));
    }
}

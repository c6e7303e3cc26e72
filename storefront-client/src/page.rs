//! Storefront page session
//!
//! Wires the reconciler, catalog listings and presentation together and
//! exposes the operations a page shell calls: start, add to cart, toggle a
//! listing, resize, and the lifecycle hooks behind [`PageTriggers`].

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::{CartMembershipSet, ProductId};
use std::collections::HashSet;
use std::sync::{Arc, Weak};
use tokio::task::JoinHandle;

use crate::cache::LocalCartCache;
use crate::catalog::{CatalogLayout, CatalogListing, ListingState};
use crate::client::{NetworkHttpClient, StorefrontApi};
use crate::gateway::{CatalogSource, PreorderSource, RemoteCartGateway, Visitor};
use crate::notification::{Notification, Notifier};
use crate::presentation::{ButtonContext, CatalogRenderer, ListingView, PreorderLookup, build_listing_view};
use crate::reconciler::CartStateReconciler;
use crate::trigger::{RefreshTarget, RenderTrigger};
use crate::{ClientConfig, ClientError, ClientResult};

/// Where anonymous visitors are sent to log in
pub const LOGIN_PATH: &str = "/auth/login";

/// Width assumed until the shell reports one
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1200;

/// Result of [`StorefrontPage::add_to_cart`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddToCartOutcome {
    Added,
    /// Visitor must log in first; `redirect` is the login page
    LoginRequired { redirect: String },
    /// An add for this product is still in flight
    AlreadyInFlight,
    /// The server reported the product out of stock
    OutOfStock(String),
    /// Any other business-rule refusal
    Rejected(String),
    /// The request did not complete
    Failed,
}

#[derive(Debug)]
struct PageState {
    listings: Vec<CatalogListing>,
    width: u32,
    preorders: PreorderLookup,
    in_flight: HashSet<ProductId>,
    sold_out: HashSet<ProductId>,
}

/// One storefront page session
pub struct StorefrontPage {
    reconciler: CartStateReconciler,
    gateway: Arc<dyn RemoteCartGateway>,
    catalog: Arc<dyn CatalogSource>,
    preorder_source: Arc<dyn PreorderSource>,
    layout: CatalogLayout,
    state: RwLock<PageState>,
    renderer: Arc<dyn CatalogRenderer>,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for StorefrontPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontPage")
            .field("reconciler", &self.reconciler)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl StorefrontPage {
    /// Build a page over one API object serving every data source
    pub fn new<A>(
        api: Arc<A>,
        cache: LocalCartCache,
        layout: CatalogLayout,
        renderer: Arc<dyn CatalogRenderer>,
        notifier: Arc<dyn Notifier>,
    ) -> Arc<Self>
    where
        A: RemoteCartGateway + CatalogSource + PreorderSource + 'static,
    {
        let gateway: Arc<dyn RemoteCartGateway> = api.clone();
        let listings = layout.listings.iter().map(|spec| spec.listing()).collect();
        Arc::new(Self {
            reconciler: CartStateReconciler::new(gateway.clone(), cache),
            gateway,
            catalog: api.clone(),
            preorder_source: api,
            layout,
            state: RwLock::new(PageState {
                listings,
                width: DEFAULT_VIEWPORT_WIDTH,
                preorders: PreorderLookup::new(),
                in_flight: HashSet::new(),
                sold_out: HashSet::new(),
            }),
            renderer,
            notifier,
        })
    }

    /// Homepage session against the backend named in `config`
    pub fn connect(
        config: &ClientConfig,
        renderer: Arc<dyn CatalogRenderer>,
        notifier: Arc<dyn Notifier>,
    ) -> ClientResult<Arc<Self>> {
        let http = NetworkHttpClient::new(config)?;
        let api = Arc::new(StorefrontApi::with_endpoints(http, config.endpoints.clone()));
        Ok(Self::new(
            api,
            LocalCartCache::from_config(config),
            CatalogLayout::homepage(),
            renderer,
            notifier,
        ))
    }

    pub fn reconciler(&self) -> &CartStateReconciler {
        &self.reconciler
    }

    pub fn layout(&self) -> &CatalogLayout {
        &self.layout
    }

    pub fn cart_snapshot(&self) -> CartMembershipSet {
        self.reconciler.current_snapshot()
    }

    pub fn viewport_width(&self) -> u32 {
        self.state.read().width
    }

    pub fn listing_state(&self, key: &str) -> Option<ListingState> {
        self.state
            .read()
            .listings
            .iter()
            .find(|l| l.key() == key)
            .map(CatalogListing::state)
    }

    /// First load: paint with cached membership, then confirm with the server
    pub async fn start(&self) {
        self.load_catalog().await;
        self.render_all();
        self.refresh_preorders().await;
        self.refresh_cart().await;
    }

    /// Fetch every listing's products; listings come back collapsed
    pub async fn load_catalog(&self) {
        for (index, spec) in self.layout.listings.iter().enumerate() {
            let products = spec.load(self.catalog.as_ref()).await;
            tracing::debug!(listing = %spec.key, products = products.len(), "Loaded listing");

            let mut state = self.state.write();
            for product in &products {
                state.sold_out.remove(&product.id);
            }
            if let Some(listing) = state.listings.get_mut(index) {
                listing.set_full_list(products);
            }
        }
    }

    /// Current views of every non-empty listing
    pub fn listing_views(&self) -> Vec<ListingView> {
        let cart = self.reconciler.current_snapshot();
        let state = self.state.read();
        let ctx = ButtonContext {
            cart: &cart,
            preorders: &state.preorders,
            in_flight: &state.in_flight,
            sold_out: &state.sold_out,
        };
        state
            .listings
            .iter()
            .filter(|listing| !listing.is_empty())
            .map(|listing| build_listing_view(listing, state.width, &ctx))
            .collect()
    }

    pub fn render_all(&self) {
        for view in self.listing_views() {
            self.renderer.render_listing(&view);
        }
    }

    fn render_listing(&self, key: &str) {
        if let Some(view) = self.listing_views().into_iter().find(|v| v.key == key) {
            self.renderer.render_listing(&view);
        }
    }

    /// Flip a listing between collapsed and expanded and redraw it
    pub fn toggle_listing(&self, key: &str) -> Option<ListingState> {
        let toggled = {
            let mut state = self.state.write();
            state
                .listings
                .iter_mut()
                .find(|l| l.key() == key)
                .map(CatalogListing::toggle_expansion)
        };
        if toggled.is_some() {
            self.render_listing(key);
        }
        toggled
    }

    /// Record the viewport width; redraw is left to the resize trigger
    pub fn set_viewport_width(&self, width: u32) {
        self.state.write().width = width;
    }

    /// Reconcile with the server, then redraw
    pub async fn refresh_cart(&self) -> CartMembershipSet {
        let snapshot = self.reconciler.reconcile().await;
        self.render_all();
        snapshot
    }

    /// Redraw from whatever the durable cache holds right now
    pub fn restore_from_cache(&self) -> CartMembershipSet {
        let snapshot = self.reconciler.reload_from_cache();
        self.render_all();
        snapshot
    }

    /// Look up the visitor's pre-orders for sold-out, pre-orderable products
    pub async fn refresh_preorders(&self) {
        let ids: Vec<ProductId> = {
            let state = self.state.read();
            let mut ids: Vec<ProductId> = state
                .listings
                .iter()
                .flat_map(|l| l.full_list())
                .filter(|p| p.is_out_of_stock() && p.allow_preorder)
                .map(|p| p.id)
                .collect();
            ids.sort_unstable();
            ids.dedup();
            ids
        };
        if ids.is_empty() {
            return;
        }
        match self.preorder_source.fetch_preorder_status(&ids).await {
            Ok(states) => {
                tracing::debug!(products = ids.len(), active = states.len(), "Pre-order status refreshed");
                self.state.write().preorders.merge(states);
            }
            Err(e) => tracing::warn!(error = %e, "Pre-order status lookup failed"),
        }
    }

    /// Add one unit of a product to the visitor's cart
    ///
    /// Cart membership only changes when the server confirms the add.
    pub async fn add_to_cart(&self, product_id: ProductId) -> AddToCartOutcome {
        if let Visitor::Anonymous = self.gateway.fetch_current_user().await {
            self.notifier
                .notify(Notification::info("Please log in to add items to your cart."));
            return AddToCartOutcome::LoginRequired {
                redirect: LOGIN_PATH.to_string(),
            };
        }

        let Some(_in_flight) = InFlightGuard::acquire(self, product_id) else {
            return AddToCartOutcome::AlreadyInFlight;
        };
        self.render_all();

        match self.gateway.add_to_cart(product_id, 1).await {
            Ok(()) => {
                self.reconciler.mark_added(product_id);
                self.notifier
                    .notify(Notification::success("Item added to cart successfully!"));
                AddToCartOutcome::Added
            }
            Err(ClientError::Rejected(message)) if message.contains("out of stock") => {
                self.state.write().sold_out.insert(product_id);
                self.notifier.notify(Notification::error(message.clone()));
                AddToCartOutcome::OutOfStock(message)
            }
            Err(ClientError::Rejected(message)) => {
                self.notifier.notify(Notification::error(message.clone()));
                AddToCartOutcome::Rejected(message)
            }
            Err(e) => {
                tracing::warn!(product_id, error = %e, "Add to cart failed");
                self.notifier
                    .notify(Notification::error("An error occurred while adding item to cart"));
                AddToCartOutcome::Failed
            }
        }
    }
}

/// Marks a product as being added; dropping it clears the mark and redraws,
/// also when the add future is cancelled mid-request
struct InFlightGuard<'a> {
    page: &'a StorefrontPage,
    product_id: ProductId,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(page: &'a StorefrontPage, product_id: ProductId) -> Option<Self> {
        if !page.state.write().in_flight.insert(product_id) {
            return None;
        }
        Some(Self { page, product_id })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.page.state.write().in_flight.remove(&self.product_id);
        self.page.render_all();
    }
}

/// Reconcile and redraw
struct CartRefresh(Weak<StorefrontPage>);

#[async_trait]
impl RefreshTarget for CartRefresh {
    async fn refresh(&self) {
        if let Some(page) = self.0.upgrade() {
            page.refresh_cart().await;
        }
    }
}

/// Redraw only; no network
struct LayoutRefresh(Weak<StorefrontPage>);

#[async_trait]
impl RefreshTarget for LayoutRefresh {
    async fn refresh(&self) {
        if let Some(page) = self.0.upgrade() {
            page.render_all();
        }
    }
}

/// Lifecycle hooks of a page, debounced
///
/// The cart trigger reconciles then redraws; the layout trigger only
/// redraws and is fed by resizes.
#[derive(Debug, Clone)]
pub struct PageTriggers {
    page: Weak<StorefrontPage>,
    pub cart: Arc<RenderTrigger>,
    pub layout: Arc<RenderTrigger>,
}

impl PageTriggers {
    pub fn new(page: &Arc<StorefrontPage>, config: &ClientConfig) -> Self {
        let weak = Arc::downgrade(page);
        Self {
            page: weak.clone(),
            cart: RenderTrigger::new(
                "cart",
                config.reconcile_debounce,
                Arc::new(CartRefresh(weak.clone())),
            ),
            layout: RenderTrigger::new("layout", config.resize_debounce, Arc::new(LayoutRefresh(weak))),
        }
    }

    /// Start both trigger workers
    pub fn spawn(&self) -> Vec<JoinHandle<()>> {
        vec![self.cart.spawn(), self.layout.spawn()]
    }

    pub fn shutdown(&self) {
        self.cart.shutdown();
        self.layout.shutdown();
    }

    pub fn on_focus(&self) {
        self.cart.on_focus();
    }

    pub fn on_visibility_change(&self, hidden: bool) {
        self.cart.on_visibility_change(hidden);
    }

    /// A restored page repaints from the durable cache before reconciling
    pub fn on_page_show(&self, persisted: bool) {
        if !persisted {
            return;
        }
        if let Some(page) = self.page.upgrade() {
            page.restore_from_cache();
        }
        self.cart.on_page_show(true);
    }

    /// Another part of the application changed the cart
    pub fn on_cart_changed(&self) {
        self.cart.notify_external();
    }

    pub fn on_resize(&self, width: u32) {
        if let Some(page) = self.page.upgrade() {
            page.set_viewport_width(width);
        }
        self.layout.on_resize();
    }
}

//! Storefront client
//!
//! Client-side state core of the storefront: keeps the visitor's cart
//! membership in step with the server, paginates catalog listings per
//! viewport, and decides what every product card's cart button shows.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use storefront_client::{ClientConfig, PageTriggers, StorefrontPage, TracingNotifier, TracingRenderer};
//!
//! let config = ClientConfig::from_env();
//! let page = StorefrontPage::connect(&config, Arc::new(TracingRenderer), Arc::new(TracingNotifier))?;
//! let triggers = PageTriggers::new(&page, &config);
//! triggers.spawn();
//!
//! page.start().await;
//! page.add_to_cart(42).await;
//! triggers.on_focus();
//! ```

pub mod cache;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logger;
pub mod notification;
pub mod page;
pub mod presentation;
pub mod reconciler;
pub mod trigger;
pub mod walk_in;

// Re-exports
pub use cache::{CartStore, FileCartStore, LocalCartCache, MemoryCartStore, StorageError};
pub use catalog::{
    Breakpoint, BreakpointLimits, CatalogLayout, CatalogListing, ListingSource, ListingSpec,
    ListingState, ViewMoreButton,
};
pub use client::{HttpClient, NetworkHttpClient, OneshotHttpClient, StorefrontApi};
pub use config::{ClientConfig, Endpoints};
pub use error::{ClientError, ClientResult};
pub use gateway::{CatalogSource, PreorderSource, RemoteCartGateway, Visitor};
pub use notification::{Notification, NotificationKind, Notifier, TracingNotifier};
pub use page::{AddToCartOutcome, PageTriggers, StorefrontPage};
pub use presentation::{
    ButtonContext, ButtonPresentationState, CardView, CatalogRenderer, ListingView,
    PreorderLookup, TracingRenderer,
};
pub use reconciler::CartStateReconciler;
pub use trigger::{Debouncer, RefreshTarget, RenderTrigger, TriggerSource};
pub use walk_in::{TicketError, TicketLine, WalkInPage, WalkInQuery, WalkInTicket};

// Shared types
pub use shared::{CartMembershipSet, PreorderState, PreorderStatus, ProductId, ProductSummary};

//! Client configuration
//!
//! # Environment variables
//!
//! [`ClientConfig::from_env`] reads:
//!
//! | variable | default | meaning |
//! |----------|---------|---------|
//! | STOREFRONT_BASE_URL | http://localhost:5000 | backend origin |
//! | STOREFRONT_TIMEOUT_SECS | 30 | HTTP request timeout |
//! | STOREFRONT_STATE_DIR | (none) | directory of the durable cart cache |

use std::path::PathBuf;
use std::time::Duration;

/// Storage key of the cached cart membership
pub const DEFAULT_CART_CACHE_KEY: &str = "cartProductIds";

/// Backend endpoint paths
///
/// These are contractual with the existing backend; change them only to
/// point at a differently-mounted deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub user_info: String,
    pub cart_items: String,
    pub cart_add: String,
    /// `{id}` is replaced by the category ID
    pub category_products: String,
    pub discounted_products: String,
    pub walk_in_products: String,
    pub preorder_status: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            user_info: "/api/user/info".into(),
            cart_items: "/api/cart/items".into(),
            cart_add: "/api/cart/add".into(),
            category_products: "/staff/categories/{id}/products".into(),
            discounted_products: "/api/products/discounted".into(),
            walk_in_products: "/api/walk-in/products".into(),
            preorder_status: "/api/preorders/status".into(),
        }
    }
}

impl Endpoints {
    /// Category listing path for one category
    pub fn category_products_path(&self, category_id: i64) -> String {
        self.category_products.replace("{id}", &category_id.to_string())
    }
}

/// Client configuration for connecting to the storefront backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory of the file-backed cart cache; `None` keeps it in memory
    pub state_dir: Option<PathBuf>,

    /// Storage key of the cart cache
    pub cart_cache_key: String,

    /// Quiet period before an invalidation triggers reconciliation
    pub reconcile_debounce: Duration,

    /// Quiet period before a resize triggers a re-render
    pub resize_debounce: Duration,

    /// Endpoint paths
    pub endpoints: Endpoints,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            state_dir: None,
            cart_cache_key: DEFAULT_CART_CACHE_KEY.into(),
            reconcile_debounce: Duration::from_millis(100),
            resize_debounce: Duration::from_millis(250),
            endpoints: Endpoints::default(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::new(
            std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".into()),
        );
        config.timeout = std::env::var("STOREFRONT_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(30);
        config.state_dir = std::env::var("STOREFRONT_STATE_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Persist the cart cache under this directory
    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = Some(dir.into());
        self
    }

    /// Set the cart cache key
    pub fn with_cart_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cart_cache_key = key.into();
        self
    }

    /// Set the reconciliation debounce window
    pub fn with_reconcile_debounce(mut self, window: Duration) -> Self {
        self.reconcile_debounce = window;
        self
    }

    /// Set the resize debounce window
    pub fn with_resize_debounce(mut self, window: Duration) -> Self {
        self.resize_debounce = window;
        self
    }

    /// Override endpoint paths
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}

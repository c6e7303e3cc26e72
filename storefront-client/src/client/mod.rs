// storefront-client/src/client/mod.rs
// Transports and the typed storefront API

mod api;
mod http;
mod http_oneshot;

pub use self::api::StorefrontApi;
pub use self::http::{HttpClient, NetworkHttpClient, Query};
pub use self::http_oneshot::OneshotHttpClient;

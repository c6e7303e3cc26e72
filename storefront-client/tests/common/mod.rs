//! In-process fake backend and recording adapters for integration tests

#![allow(dead_code)]

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

use storefront_client::{
    CatalogRenderer, ListingView, MemoryCartStore, Notification, Notifier, OneshotHttpClient,
    StorefrontApi,
};

/// Scriptable backend state
#[derive(Debug, Default)]
pub struct Backend {
    pub logged_in: bool,
    /// `/api/user/info` answers 500 with an HTML body
    pub user_lookup_down: bool,
    /// `/api/cart/items` answers 503
    pub cart_down: bool,
    /// `/api/cart/add` answers 500
    pub add_down: bool,
    /// `/api/cart/add` never answers
    pub add_stalls: bool,
    pub cart_lines: Vec<Value>,
    pub categories: HashMap<i64, Vec<Value>>,
    pub discounted: Vec<Value>,
    pub walk_in: Vec<Value>,
    pub preorders: HashMap<i64, Value>,
    /// Every request URI, in order
    pub requests: Vec<String>,
}

pub type SharedBackend = Arc<Mutex<Backend>>;

impl Backend {
    pub fn shared() -> SharedBackend {
        Arc::new(Mutex::new(Backend::default()))
    }

    pub fn set_cart(&mut self, ids: &[i64]) {
        self.cart_lines = ids
            .iter()
            .map(|id| json!({ "id": id, "name": format!("Product {id}"), "price": 10.0, "quantity": 1 }))
            .collect();
    }

    pub fn requests_to(&self, path: &str) -> usize {
        self.requests.iter().filter(|uri| uri.starts_with(path)).count()
    }

    fn find_product(&self, id: i64) -> Option<&Value> {
        self.categories
            .values()
            .flatten()
            .chain(self.discounted.iter())
            .find(|p| p["id"] == id)
    }
}

/// Category-endpoint style row (`stock_quantity`, string price)
pub fn category_row(id: i64, name: &str, price: &str, stock: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} description"),
        "price": price,
        "stock_quantity": stock,
        "photo": null,
        "allow_preorder": 1,
        "expected_restock_date": null
    })
}

fn rejected(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}

async fn user_info(State(backend): State<SharedBackend>, uri: Uri) -> Response {
    let mut backend = backend.lock();
    backend.requests.push(uri.to_string());
    if backend.user_lookup_down {
        return (StatusCode::INTERNAL_SERVER_ERROR, "<html>Internal Server Error</html>").into_response();
    }
    if !backend.logged_in {
        return Json(json!({ "success": false, "error": "Not logged in" })).into_response();
    }
    Json(json!({
        "success": true,
        "user": {
            "id": 7,
            "first_name": "Sophea",
            "last_name": "Chan",
            "email": "sophea@example.com",
            "phone": "",
            "address": ""
        }
    }))
    .into_response()
}

async fn cart_items(State(backend): State<SharedBackend>, uri: Uri) -> Response {
    let mut backend = backend.lock();
    backend.requests.push(uri.to_string());
    if backend.cart_down {
        return (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response();
    }
    if !backend.logged_in {
        return rejected(StatusCode::UNAUTHORIZED, "Please log in");
    }
    Json(json!({
        "success": true,
        "cart_items": backend.cart_lines,
        "total_items": backend.cart_lines.len()
    }))
    .into_response()
}

async fn cart_add(State(shared): State<SharedBackend>, uri: Uri, Json(body): Json<Value>) -> Response {
    let stalls = {
        let mut backend = shared.lock();
        backend.requests.push(uri.to_string());
        backend.add_stalls
    };
    if stalls {
        std::future::pending::<()>().await;
    }
    let mut backend = shared.lock();
    if backend.add_down {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    if !backend.logged_in {
        return rejected(StatusCode::UNAUTHORIZED, "Please log in to add items to cart");
    }
    let Some(product_id) = body["product_id"].as_i64() else {
        return rejected(StatusCode::BAD_REQUEST, "Product ID is required");
    };
    let Some(product) = backend.find_product(product_id) else {
        return rejected(StatusCode::NOT_FOUND, "Product not found");
    };
    let stock = product["stock_quantity"]
        .as_i64()
        .or_else(|| product["stock"].as_i64())
        .unwrap_or(0);
    if stock <= 0 {
        return rejected(StatusCode::BAD_REQUEST, "This product is currently out of stock");
    }
    let name = product["name"].clone();
    backend.cart_lines.push(json!({ "id": product_id, "name": name, "quantity": body["quantity"] }));
    Json(json!({ "success": true, "message": "Product added to cart" })).into_response()
}

async fn category_products(
    State(backend): State<SharedBackend>,
    Path(category_id): Path<i64>,
    uri: Uri,
) -> Response {
    let mut backend = backend.lock();
    backend.requests.push(uri.to_string());
    match backend.categories.get(&category_id) {
        Some(products) => Json(json!({ "success": true, "products": products })).into_response(),
        None => rejected(StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
    }
}

async fn discounted(
    State(backend): State<SharedBackend>,
    Query(params): Query<HashMap<String, String>>,
    uri: Uri,
) -> Response {
    let mut backend = backend.lock();
    backend.requests.push(uri.to_string());
    let limit = params
        .get("limit")
        .and_then(|l| l.parse::<usize>().ok())
        .unwrap_or(12);
    let products: Vec<Value> = backend.discounted.iter().take(limit).cloned().collect();
    Json(json!({ "success": true, "products": products })).into_response()
}

async fn walk_in(
    State(backend): State<SharedBackend>,
    Query(params): Query<HashMap<String, String>>,
    uri: Uri,
) -> Response {
    let mut backend = backend.lock();
    backend.requests.push(uri.to_string());
    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let page_size: usize = params.get("page_size").and_then(|p| p.parse().ok()).unwrap_or(8);
    let q = params.get("q").cloned().unwrap_or_default().to_lowercase();

    let matching: Vec<Value> = backend
        .walk_in
        .iter()
        .filter(|p| {
            p["name"]
                .as_str()
                .is_some_and(|name| name.to_lowercase().contains(&q))
        })
        .cloned()
        .collect();
    let total = matching.len();
    let products: Vec<Value> = matching
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();
    Json(json!({
        "success": true,
        "products": products,
        "pagination": {
            "current_page": page,
            "total_pages": total.div_ceil(page_size),
            "total_count": total,
            "page_size": page_size
        }
    }))
    .into_response()
}

async fn preorder_status(
    State(backend): State<SharedBackend>,
    Query(params): Query<HashMap<String, String>>,
    uri: Uri,
) -> Response {
    let mut backend = backend.lock();
    backend.requests.push(uri.to_string());
    if !backend.logged_in {
        return rejected(StatusCode::UNAUTHORIZED, "Please log in");
    }
    let mut status = serde_json::Map::new();
    for id in params
        .get("product_ids")
        .map(String::as_str)
        .unwrap_or_default()
        .split(',')
        .filter_map(|id| id.parse::<i64>().ok())
    {
        if let Some(entry) = backend.preorders.get(&id) {
            status.insert(id.to_string(), entry.clone());
        }
    }
    Json(json!({ "success": true, "preorder_status": status })).into_response()
}

pub fn router(backend: SharedBackend) -> Router {
    Router::new()
        .route("/api/user/info", get(user_info))
        .route("/api/cart/items", get(cart_items))
        .route("/api/cart/add", post(cart_add))
        .route("/staff/categories/{id}/products", get(category_products))
        .route("/api/products/discounted", get(discounted))
        .route("/api/walk-in/products", get(walk_in))
        .route("/api/preorders/status", get(preorder_status))
        .with_state(backend)
}

pub fn api(backend: &SharedBackend) -> Arc<StorefrontApi<OneshotHttpClient>> {
    Arc::new(StorefrontApi::new(OneshotHttpClient::new(router(backend.clone()))))
}

pub fn memory_store() -> Arc<MemoryCartStore> {
    Arc::new(MemoryCartStore::new())
}

/// Keeps the latest view per listing and counts renders
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub views: Mutex<HashMap<String, ListingView>>,
    pub renders: Mutex<usize>,
}

impl RecordingRenderer {
    pub fn view(&self, key: &str) -> Option<ListingView> {
        self.views.lock().get(key).cloned()
    }

    pub fn render_count(&self) -> usize {
        *self.renders.lock()
    }
}

impl CatalogRenderer for RecordingRenderer {
    fn render_listing(&self, view: &ListingView) {
        *self.renders.lock() += 1;
        self.views.lock().insert(view.key.clone(), view.clone());
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn last(&self) -> Option<Notification> {
        self.notifications.lock().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().push(notification);
    }
}

//! Product Model

use serde::{Deserialize, Serialize};

use crate::money::{percentage_of, to_decimal, to_f64};

/// Product identifier
pub type ProductId = i64;

/// Image shown when a product has no photo
pub const PLACEHOLDER_PHOTO_URL: &str = "https://placehold.co/300x200?text=Product";

/// Directory products photos are served from
const PHOTO_BASE_PATH: &str = "/static/uploads/products";

/// Product as listed by the catalog endpoints
///
/// Read-only on the client; the server is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    /// Current (sale) price
    #[serde(deserialize_with = "price")]
    pub price: f64,
    /// Pre-discount price, when the product is on sale
    #[serde(default, deserialize_with = "optional_price")]
    pub original_price: Option<f64>,
    /// Units in stock (category endpoints call it `stock_quantity`)
    #[serde(default, alias = "stock_quantity", deserialize_with = "null_as_default")]
    pub stock: i64,
    #[serde(default)]
    pub photo: Option<String>,
    /// Absent or null means pre-orders are allowed
    #[serde(default = "default_true", deserialize_with = "null_as_true")]
    pub allow_preorder: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub expected_restock_date: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Price as sent by the backend: a JSON number, or a decimal string for
/// columns serialized straight from the database
#[derive(Deserialize)]
#[serde(untagged)]
enum WirePrice {
    Number(f64),
    Text(String),
}

impl WirePrice {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            WirePrice::Number(value) => Ok(value),
            WirePrice::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid price: {text}"))),
        }
    }
}

fn price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    WirePrice::deserialize(deserializer)?.into_f64()
}

fn optional_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<WirePrice>::deserialize(deserializer)?
        .map(WirePrice::into_f64)
        .transpose()
}

/// Pre-order flag as sent by the backend: bool, 0/1 or null
#[derive(Deserialize)]
#[serde(untagged)]
enum PreorderFlag {
    Bool(bool),
    Int(i64),
}

fn null_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<PreorderFlag>::deserialize(deserializer)? {
        Some(PreorderFlag::Bool(flag)) => flag,
        Some(PreorderFlag::Int(flag)) => flag != 0,
        None => true,
    })
}

/// Treat an explicit JSON `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Discount derived from `original_price` and `price`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discount {
    /// Whole percent off, rounded half-up
    pub percentage: u32,
    pub savings: f64,
    pub original_price: f64,
    pub sale_price: f64,
}

impl ProductSummary {
    /// Minimal in-stock product, mostly useful for tests and fixtures
    pub fn new(id: ProductId, name: impl Into<String>, price: f64, stock: i64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            original_price: None,
            stock,
            photo: None,
            allow_preorder: true,
            description: String::new(),
            expected_restock_date: None,
            category_name: None,
        }
    }

    /// Set the pre-discount price
    pub fn with_original_price(mut self, original_price: f64) -> Self {
        self.original_price = Some(original_price);
        self
    }

    /// Set whether pre-orders are accepted when out of stock
    pub fn with_preorder(mut self, allow: bool) -> Self {
        self.allow_preorder = allow;
        self
    }

    /// Discount, when the original price is above the current one
    pub fn discount(&self) -> Option<Discount> {
        let original = self.original_price?;
        if original <= self.price {
            return None;
        }
        let savings = to_f64(to_decimal(original) - to_decimal(self.price));
        Some(Discount {
            percentage: percentage_of(original - self.price, original),
            savings,
            original_price: original,
            sale_price: self.price,
        })
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock <= 0
    }

    /// URL slug of the product page (`/products/{slug}`)
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }

    /// Photo URL, or the placeholder image
    pub fn photo_url(&self) -> String {
        match self.photo.as_deref() {
            Some(photo) if !photo.is_empty() => format!("{}/{}", PHOTO_BASE_PATH, photo),
            _ => PLACEHOLDER_PHOTO_URL.to_string(),
        }
    }
}

/// Lowercase, keep `[a-z0-9_-]` and whitespace, turn whitespace/underscore
/// runs into `-`, collapse `-` runs and trim them from both ends.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.to_lowercase().chars() {
        let is_separator = c.is_whitespace() || c == '_' || c == '-';
        if is_separator {
            pending_dash = true;
        } else if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        }
    }
    slug
}

//! Catalog listings
//!
//! [`CatalogLayout`] says which listings a page shows and where their
//! products come from; [`CatalogListing`] holds the pagination state of each.

mod layout;
mod listing;

pub use layout::{Breakpoint, BreakpointLimits};
pub use listing::{CatalogListing, ListingState, ViewMoreButton};

use shared::ProductSummary;

use crate::gateway::CatalogSource;

/// Where a listing's products come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingSource {
    /// Concatenation of these categories, in order
    Categories(Vec<i64>),
    /// Discounted products, `fetch_limit` at most
    Discounted { fetch_limit: u32 },
}

/// Static description of one listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSpec {
    pub key: String,
    pub title: String,
    pub source: ListingSource,
    pub limits: BreakpointLimits,
}

impl ListingSpec {
    pub fn categories(
        key: impl Into<String>,
        title: impl Into<String>,
        category_ids: Vec<i64>,
        limits: BreakpointLimits,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            source: ListingSource::Categories(category_ids),
            limits,
        }
    }

    pub fn discounted(
        key: impl Into<String>,
        title: impl Into<String>,
        fetch_limit: u32,
        limits: BreakpointLimits,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            source: ListingSource::Discounted { fetch_limit },
            limits,
        }
    }

    /// Empty listing with this spec's key, title and limits
    pub fn listing(&self) -> CatalogListing {
        CatalogListing::new(self.key.clone(), self.title.clone(), self.limits)
    }

    /// Fetch the full product list.
    ///
    /// A source that fails contributes no products; the rest still load.
    pub async fn load(&self, catalog: &dyn CatalogSource) -> Vec<ProductSummary> {
        match &self.source {
            ListingSource::Categories(ids) => {
                let mut products = Vec::new();
                for &category_id in ids {
                    match catalog.fetch_category_products(category_id).await {
                        Ok(mut batch) => products.append(&mut batch),
                        Err(e) => tracing::warn!(
                            listing = %self.key,
                            category_id,
                            error = %e,
                            "Failed to fetch category products"
                        ),
                    }
                }
                products
            }
            ListingSource::Discounted { fetch_limit } => {
                match catalog.fetch_discounted_products(*fetch_limit).await {
                    Ok(products) => products,
                    Err(e) => {
                        tracing::warn!(listing = %self.key, error = %e, "Failed to fetch discounted products");
                        Vec::new()
                    }
                }
            }
        }
    }
}

/// Listings of one page, top to bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLayout {
    pub listings: Vec<ListingSpec>,
}

impl CatalogLayout {
    pub fn new(listings: Vec<ListingSpec>) -> Self {
        Self { listings }
    }

    /// Storefront homepage
    pub fn homepage() -> Self {
        Self::new(vec![
            ListingSpec::discounted("deals", "Deals", 12, BreakpointLimits::uniform(4)),
            ListingSpec::categories("laptops", "Laptops", vec![1, 5], BreakpointLimits::new(12, 6, 6)),
            ListingSpec::categories("desktops", "Desktops", vec![2], BreakpointLimits::new(8, 4, 4)),
            ListingSpec::categories(
                "accessories",
                "Accessories",
                vec![3],
                BreakpointLimits::new(8, 4, 4),
            ),
        ])
    }

    pub fn get(&self, key: &str) -> Option<&ListingSpec> {
        self.listings.iter().find(|spec| spec.key == key)
    }
}

//! Pagination state of one product listing

use shared::ProductSummary;

use super::layout::BreakpointLimits;

/// Whether a listing shows its full list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingState {
    Collapsed,
    Expanded,
}

/// The "view more" control under a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMoreButton {
    /// Everything already fits
    Hidden,
    ViewMore(String),
    ViewLess,
}

/// One product listing (a category section or the deals strip)
///
/// `visible_slice` is always a prefix of the full list, so expanding never
/// reorders what the visitor already saw.
#[derive(Debug, Clone)]
pub struct CatalogListing {
    key: String,
    title: String,
    full_list: Vec<ProductSummary>,
    expanded: bool,
    limits: BreakpointLimits,
}

impl CatalogListing {
    pub fn new(key: impl Into<String>, title: impl Into<String>, limits: BreakpointLimits) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            full_list: Vec::new(),
            expanded: false,
            limits,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn limits(&self) -> BreakpointLimits {
        self.limits
    }

    pub fn full_list(&self) -> &[ProductSummary] {
        &self.full_list
    }

    pub fn is_empty(&self) -> bool {
        self.full_list.is_empty()
    }

    /// Replace the products and collapse the listing
    pub fn set_full_list(&mut self, products: Vec<ProductSummary>) {
        self.full_list = products;
        self.expanded = false;
    }

    pub fn toggle_expansion(&mut self) -> ListingState {
        self.expanded = !self.expanded;
        tracing::debug!(listing = %self.key, expanded = self.expanded, "Toggled listing");
        self.state()
    }

    pub fn state(&self) -> ListingState {
        if self.expanded {
            ListingState::Expanded
        } else {
            ListingState::Collapsed
        }
    }

    pub fn visible_slice(&self, width: u32) -> &[ProductSummary] {
        if self.expanded {
            return &self.full_list;
        }
        let limit = self.limits.for_width(width).min(self.full_list.len());
        &self.full_list[..limit]
    }

    /// More products than the collapsed limit at this width
    pub fn has_more(&self, width: u32) -> bool {
        self.full_list.len() > self.limits.for_width(width)
    }

    pub fn view_more_button(&self, width: u32) -> ViewMoreButton {
        if !self.has_more(width) {
            ViewMoreButton::Hidden
        } else if self.expanded {
            ViewMoreButton::ViewLess
        } else {
            ViewMoreButton::ViewMore(format!("View More {}", self.title))
        }
    }
}

//! Card and listing view models
//!
//! Everything a renderer needs, computed as plain data from product state
//! and cart membership. Nothing here does I/O.

use shared::{CartMembershipSet, Discount, PreorderState, PreorderStatus, ProductId, ProductSummary};
use std::collections::{HashMap, HashSet};

use crate::catalog::{CatalogListing, ListingState, ViewMoreButton};

/// Maximum description length on a card, in characters
pub const DESCRIPTION_EXCERPT_CHARS: usize = 250;

/// What the add-to-cart control of a card offers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonPresentationState {
    AddToCart,
    AlreadyInCart,
    /// Out of stock but pre-orderable; `existing` is the visitor's active
    /// pre-order, if any
    PreOrder { existing: Option<PreorderStatus> },
    Unavailable,
    /// An add-to-cart request is in flight
    Adding,
}

impl ButtonPresentationState {
    /// Whether clicking the control does anything
    pub fn is_actionable(&self) -> bool {
        matches!(
            self,
            ButtonPresentationState::AddToCart | ButtonPresentationState::PreOrder { .. }
        )
    }
}

/// Active pre-orders of the visitor, by product
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreorderLookup {
    states: HashMap<ProductId, PreorderState>,
}

impl PreorderLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, product_id: ProductId) -> Option<&PreorderState> {
        self.states.get(&product_id)
    }

    pub fn status(&self, product_id: ProductId) -> Option<PreorderStatus> {
        self.get(product_id)
            .filter(|state| state.has_preorder)
            .map(|state| state.status)
    }

    /// Overwrite the entries for the products in `states`
    pub fn merge(&mut self, states: HashMap<ProductId, PreorderState>) {
        self.states.extend(states);
    }
}

impl From<HashMap<ProductId, PreorderState>> for PreorderLookup {
    fn from(states: HashMap<ProductId, PreorderState>) -> Self {
        Self { states }
    }
}

/// Session state that decides a card's button, besides the product itself
#[derive(Debug, Clone, Copy)]
pub struct ButtonContext<'a> {
    pub cart: &'a CartMembershipSet,
    pub preorders: &'a PreorderLookup,
    pub in_flight: &'a HashSet<ProductId>,
    /// Products the server refused as out of stock since the last load
    pub sold_out: &'a HashSet<ProductId>,
}

impl ButtonPresentationState {
    /// Out-of-stock is decided before cart membership: a sold-out product
    /// that is still in the cart shows its pre-order or unavailable state.
    pub fn for_product(product: &ProductSummary, ctx: &ButtonContext<'_>) -> Self {
        if product.is_out_of_stock() {
            return if product.allow_preorder {
                ButtonPresentationState::PreOrder {
                    existing: ctx.preorders.status(product.id),
                }
            } else {
                ButtonPresentationState::Unavailable
            };
        }
        if ctx.in_flight.contains(&product.id) {
            ButtonPresentationState::Adding
        } else if ctx.sold_out.contains(&product.id) {
            ButtonPresentationState::Unavailable
        } else if ctx.cart.contains(product.id) {
            ButtonPresentationState::AlreadyInCart
        } else {
            ButtonPresentationState::AddToCart
        }
    }
}

/// Everything shown on one product card
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub product_id: ProductId,
    pub name: String,
    pub href: String,
    pub photo_url: String,
    pub price: f64,
    pub discount: Option<Discount>,
    pub excerpt: String,
    pub button: ButtonPresentationState,
}

impl CardView {
    pub fn build(product: &ProductSummary, ctx: &ButtonContext<'_>) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            href: format!("/products/{}", product.slug()),
            photo_url: product.photo_url(),
            price: product.price,
            discount: product.discount(),
            excerpt: excerpt(&product.description),
            button: ButtonPresentationState::for_product(product, ctx),
        }
    }
}

/// Description cut to [`DESCRIPTION_EXCERPT_CHARS`] characters plus `...`
pub fn excerpt(description: &str) -> String {
    match description.char_indices().nth(DESCRIPTION_EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &description[..cut]),
        None => description.to_string(),
    }
}

/// One listing as it should appear at the current width
#[derive(Debug, Clone, PartialEq)]
pub struct ListingView {
    pub key: String,
    pub title: String,
    pub state: ListingState,
    pub cards: Vec<CardView>,
    pub button: ViewMoreButton,
}

pub fn build_listing_view(listing: &CatalogListing, width: u32, ctx: &ButtonContext<'_>) -> ListingView {
    ListingView {
        key: listing.key().to_string(),
        title: listing.title().to_string(),
        state: listing.state(),
        cards: listing
            .visible_slice(width)
            .iter()
            .map(|product| CardView::build(product, ctx))
            .collect(),
        button: listing.view_more_button(width),
    }
}

/// Draws listings
///
/// Called with the complete view of one listing; implementations replace
/// whatever they drew for that key before.
pub trait CatalogRenderer: Send + Sync {
    fn render_listing(&self, view: &ListingView);
}

/// Renderer that only logs, for headless sessions
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRenderer;

impl CatalogRenderer for TracingRenderer {
    fn render_listing(&self, view: &ListingView) {
        tracing::debug!(
            listing = %view.key,
            cards = view.cards.len(),
            button = ?view.button,
            "Rendered listing"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BreakpointLimits;

    struct Session {
        cart: CartMembershipSet,
        preorders: PreorderLookup,
        in_flight: HashSet<ProductId>,
        sold_out: HashSet<ProductId>,
    }

    impl Session {
        fn new(cart: CartMembershipSet) -> Self {
            Self {
                cart,
                preorders: PreorderLookup::new(),
                in_flight: HashSet::new(),
                sold_out: HashSet::new(),
            }
        }

        fn ctx(&self) -> ButtonContext<'_> {
            ButtonContext {
                cart: &self.cart,
                preorders: &self.preorders,
                in_flight: &self.in_flight,
                sold_out: &self.sold_out,
            }
        }
    }

    #[test]
    fn test_button_states() {
        let mut session = Session::new([3].into());
        let in_stock = ProductSummary::new(1, "Mouse", 10.0, 5);
        let in_cart = ProductSummary::new(3, "Keyboard", 30.0, 2);
        let preorderable = ProductSummary::new(4, "GPU", 700.0, 0);
        let unavailable = ProductSummary::new(5, "Monitor", 200.0, 0).with_preorder(false);

        assert_eq!(ButtonPresentationState::for_product(&in_stock, &session.ctx()), ButtonPresentationState::AddToCart);
        assert_eq!(ButtonPresentationState::for_product(&in_cart, &session.ctx()), ButtonPresentationState::AlreadyInCart);
        assert_eq!(
            ButtonPresentationState::for_product(&preorderable, &session.ctx()),
            ButtonPresentationState::PreOrder { existing: None }
        );
        assert_eq!(ButtonPresentationState::for_product(&unavailable, &session.ctx()), ButtonPresentationState::Unavailable);

        session.in_flight.insert(1);
        session.sold_out.insert(3);
        session.preorders.merge(HashMap::from([(4, PreorderState::pending(11))]));
        assert_eq!(ButtonPresentationState::for_product(&in_stock, &session.ctx()), ButtonPresentationState::Adding);
        assert_eq!(ButtonPresentationState::for_product(&in_cart, &session.ctx()), ButtonPresentationState::Unavailable);
        assert_eq!(
            ButtonPresentationState::for_product(&preorderable, &session.ctx()),
            ButtonPresentationState::PreOrder { existing: Some(PreorderStatus::Pending) }
        );
    }

    #[test]
    fn test_out_of_stock_wins_over_membership() {
        let session = Session::new([4].into());
        let sold_out = ProductSummary::new(4, "GPU", 700.0, 0);
        let state = ButtonPresentationState::for_product(&sold_out, &session.ctx());
        assert_eq!(state, ButtonPresentationState::PreOrder { existing: None });
        assert!(state.is_actionable());
        assert!(!ButtonPresentationState::AlreadyInCart.is_actionable());
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short"), "short");
        let long = "é".repeat(260);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), 253);
        assert!(cut.ends_with("..."));
        assert_eq!(excerpt(&"a".repeat(250)).len(), 250);
    }

    #[test]
    fn test_listing_view() {
        let session = Session::new([2].into());
        let mut listing = CatalogListing::new("desktops", "Desktops", BreakpointLimits::new(8, 4, 4));
        listing.set_full_list(
            (1..=6)
                .map(|id| ProductSummary::new(id, format!("Tower {id}"), 800.0, 1).with_original_price(1000.0))
                .collect(),
        );

        let view = build_listing_view(&listing, 500, &session.ctx());
        assert_eq!(view.cards.len(), 4);
        assert_eq!(view.button, ViewMoreButton::ViewMore("View More Desktops".into()));
        assert_eq!(view.cards[1].button, ButtonPresentationState::AlreadyInCart);
        assert_eq!(view.cards[0].href, "/products/tower-1");
        assert_eq!(view.cards[0].discount.map(|d| d.percentage), Some(20));

        let wide = build_listing_view(&listing, 1200, &session.ctx());
        assert_eq!(wide.cards.len(), 6);
        assert_eq!(wide.button, ViewMoreButton::Hidden);
    }
}

//! Walk-in (point of sale) ticket
//!
//! The staff-side ticket of products picked for a counter sale. Quantities
//! are capped by the stock the product listing reported.

use rust_decimal::Decimal;
use shared::client::PageInfo;
use shared::money::{to_decimal, to_f64};
use shared::{ProductId, ProductSummary};
use thiserror::Error;

/// Ticket rule violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketError {
    #[error("{0} is out of stock")]
    OutOfStock(String),

    #[error("Cannot add more {name}. Only {stock} in stock.")]
    StockLimitReached { name: String, stock: i64 },

    #[error("Only {stock} items available in stock")]
    ExceedsStock { stock: i64 },

    #[error("Product {0} is not on the ticket")]
    NotOnTicket(ProductId),
}

/// One product on the ticket
#[derive(Debug, Clone, PartialEq)]
pub struct TicketLine {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    pub stock: i64,
    pub photo: Option<String>,
}

impl TicketLine {
    pub fn line_total(&self) -> Decimal {
        to_decimal(self.price) * Decimal::from(self.quantity)
    }
}

/// Products picked for a walk-in sale, in insertion order
#[derive(Debug, Clone, Default)]
pub struct WalkInTicket {
    lines: Vec<TicketLine>,
}

impl WalkInTicket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`
    pub fn add(&mut self, product: &ProductSummary) -> Result<(), TicketError> {
        if product.is_out_of_stock() {
            return Err(TicketError::OutOfStock(product.name.clone()));
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.id == product.id) {
            if line.quantity >= product.stock {
                return Err(TicketError::StockLimitReached {
                    name: product.name.clone(),
                    stock: product.stock,
                });
            }
            line.quantity += 1;
            line.stock = product.stock;
        } else {
            self.lines.push(TicketLine {
                id: product.id,
                name: product.name.clone(),
                price: product.price,
                quantity: 1,
                stock: product.stock,
                photo: product.photo.clone(),
            });
        }
        tracing::debug!(product_id = product.id, "Added to walk-in ticket");
        Ok(())
    }

    /// Drop a line; returns whether it was there
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.id != product_id);
        self.lines.len() != before
    }

    /// Set a line's quantity; zero or less removes the line
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> Result<(), TicketError> {
        if quantity <= 0 {
            self.remove(product_id);
            return Ok(());
        }
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.id == product_id)
            .ok_or(TicketError::NotOnTicket(product_id))?;
        if quantity > line.stock {
            return Err(TicketError::ExceedsStock { stock: line.stock });
        }
        line.quantity = quantity;
        Ok(())
    }

    pub fn lines(&self) -> &[TicketLine] {
        &self.lines
    }

    pub fn total_items(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn subtotal(&self) -> f64 {
        to_f64(self.lines.iter().map(TicketLine::line_total).sum())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Default page size of the walk-in product grid
pub const WALK_IN_PAGE_SIZE: u32 = 8;

/// Walk-in product search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkInQuery {
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    /// Category name; `"all"` or empty means every category
    pub category: String,
}

impl Default for WalkInQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: WALK_IN_PAGE_SIZE,
            search: String::new(),
            category: String::new(),
        }
    }
}

impl WalkInQuery {
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Query-string pairs, in the order the backend documents them
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let category = if self.category == "all" {
            String::new()
        } else {
            self.category.clone()
        };
        vec![
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
            ("q", self.search.trim().to_string()),
            ("category", category),
        ]
    }
}

/// One page of walk-in search results
#[derive(Debug, Clone, Default)]
pub struct WalkInPage {
    pub products: Vec<ProductSummary>,
    pub pagination: PageInfo,
}

impl WalkInPage {
    pub fn has_next(&self) -> bool {
        self.pagination.current_page < self.pagination.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.pagination.current_page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ssd() -> ProductSummary {
        ProductSummary::new(1, "SSD 1TB", 59.99, 2)
    }

    #[test]
    fn test_add_respects_stock() {
        let mut ticket = WalkInTicket::new();
        ticket.add(&ssd()).unwrap();
        ticket.add(&ssd()).unwrap();
        assert_eq!(ticket.total_items(), 2);

        let err = ticket.add(&ssd()).unwrap_err();
        assert_eq!(
            err,
            TicketError::StockLimitReached { name: "SSD 1TB".into(), stock: 2 }
        );
        assert_eq!(ticket.total_items(), 2);

        let sold_out = ProductSummary::new(2, "Hub", 10.0, 0);
        assert!(matches!(ticket.add(&sold_out), Err(TicketError::OutOfStock(_))));
        assert_eq!(ticket.lines().len(), 1);
    }

    #[test]
    fn test_update_quantity() {
        let mut ticket = WalkInTicket::new();
        ticket.add(&ssd()).unwrap();

        assert_eq!(
            ticket.update_quantity(1, 3),
            Err(TicketError::ExceedsStock { stock: 2 })
        );
        ticket.update_quantity(1, 2).unwrap();
        assert_eq!(ticket.subtotal(), 119.98);

        ticket.update_quantity(1, 0).unwrap();
        assert!(ticket.is_empty());
        assert_eq!(ticket.update_quantity(9, 1), Err(TicketError::NotOnTicket(9)));
    }

    #[test]
    fn test_subtotal_uses_decimal() {
        let mut ticket = WalkInTicket::new();
        ticket.add(&ProductSummary::new(1, "Cable", 0.1, 5)).unwrap();
        ticket.add(&ProductSummary::new(2, "Adapter", 0.2, 5)).unwrap();
        assert_eq!(ticket.subtotal(), 0.3);
        assert!(ticket.remove(1));
        assert!(!ticket.remove(1));
        ticket.clear();
        assert_eq!(ticket.total_items(), 0);
    }

    #[test]
    fn test_query_pairs() {
        let query = WalkInQuery::default().page(0).search(" ssd ").category("all");
        assert_eq!(
            query.to_query(),
            vec![
                ("page", "1".to_string()),
                ("page_size", "8".to_string()),
                ("q", "ssd".to_string()),
                ("category", String::new()),
            ]
        );
    }

    #[test]
    fn test_page_navigation() {
        let page = WalkInPage {
            products: vec![],
            pagination: PageInfo { current_page: 1, total_pages: 3, total_count: 20, page_size: 8 },
        };
        assert!(page.has_next());
        assert!(!page.has_previous());
    }
}

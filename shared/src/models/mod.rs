//! Data models
//!
//! Storefront value types shared between the client core and the JSON API.
//! Product IDs are `i64` (database INTEGER primary key); only positive IDs
//! are meaningful.

pub mod cart;
pub mod preorder;
pub mod product;

// Re-exports
pub use cart::*;
pub use preorder::*;
pub use product::*;

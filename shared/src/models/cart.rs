//! Cart membership model

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::product::ProductId;

/// Products with a pending or placed cart line for the current visitor
///
/// Membership is binary; quantities live server-side. Serialized as a JSON
/// array of IDs in ascending order, e.g. `[3,5]`. Non-positive IDs are never
/// members.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ProductId>", into = "Vec<ProductId>")]
pub struct CartMembershipSet(BTreeSet<ProductId>);

impl CartMembershipSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.0.contains(&id)
    }

    /// Insert a product; returns `true` if it was not a member yet.
    ///
    /// Non-positive IDs are ignored.
    pub fn insert(&mut self, id: ProductId) -> bool {
        if id <= 0 {
            return false;
        }
        self.0.insert(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<ProductId> {
        self.0.iter().copied().collect()
    }
}

impl FromIterator<ProductId> for CartMembershipSet {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        Self(iter.into_iter().filter(|id| *id > 0).collect())
    }
}

impl From<Vec<ProductId>> for CartMembershipSet {
    fn from(ids: Vec<ProductId>) -> Self {
        ids.into_iter().collect()
    }
}

impl From<CartMembershipSet> for Vec<ProductId> {
    fn from(set: CartMembershipSet) -> Self {
        set.0.into_iter().collect()
    }
}

impl<const N: usize> From<[ProductId; N]> for CartMembershipSet {
    fn from(ids: [ProductId; N]) -> Self {
        ids.into_iter().collect()
    }
}

/// One line of the remote cart, as far as membership is concerned
///
/// Pre-order lines carry no product `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemRef {
    #[serde(default)]
    pub id: Option<ProductId>,
    #[serde(default)]
    pub quantity: Option<i64>,
}

/// Add-to-cart payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array_roundtrip_order() {
        let set: CartMembershipSet = [9, 5].into();
        assert_eq!(serde_json::to_string(&set).unwrap(), "[5,9]");

        let parsed: CartMembershipSet = serde_json::from_str("[3,5,3]").unwrap();
        assert_eq!(parsed.to_vec(), vec![3, 5]);
    }

    #[test]
    fn test_non_positive_ids_are_not_members() {
        let mut set = CartMembershipSet::new();
        assert!(!set.insert(0));
        assert!(!set.insert(-4));
        assert!(set.insert(7));
        assert!(!set.insert(7));
        assert_eq!(set.len(), 1);

        let parsed: CartMembershipSet = serde_json::from_str("[0,2,-1]").unwrap();
        assert_eq!(parsed.to_vec(), vec![2]);
    }

    #[test]
    fn test_cart_item_without_id() {
        let item: CartItemRef =
            serde_json::from_str(r#"{"preorder_id": 4, "name": "Pre-order Item", "quantity": 1}"#)
                .unwrap();
        assert_eq!(item.id, None);
    }
}

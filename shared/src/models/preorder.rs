//! Pre-order state model

use serde::{Deserialize, Serialize};

/// Status of an active pre-order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreorderStatus {
    Pending,
    Confirmed,
    PartiallyPaid,
    ReadyForPickup,
    #[serde(other)]
    Other,
}

/// Most recent active pre-order of the visitor for one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreorderState {
    #[serde(default)]
    pub has_preorder: bool,
    #[serde(default)]
    pub preorder_id: Option<i64>,
    pub status: PreorderStatus,
    #[serde(default)]
    pub quantity: Option<i64>,
}

impl PreorderState {
    /// State recorded right after a pre-order was placed
    pub fn pending(preorder_id: i64) -> Self {
        Self {
            has_preorder: true,
            preorder_id: Some(preorder_id),
            status: PreorderStatus::Pending,
            quantity: Some(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_maps_to_other() {
        let state: PreorderState =
            serde_json::from_str(r#"{"has_preorder": true, "preorder_id": 3, "status": "cancelled"}"#)
                .unwrap();
        assert_eq!(state.status, PreorderStatus::Other);

        let state: PreorderState =
            serde_json::from_str(r#"{"has_preorder": true, "status": "ready_for_pickup"}"#).unwrap();
        assert_eq!(state.status, PreorderStatus::ReadyForPickup);
    }
}

use serde::{Deserialize, Serialize};

/// Snapshot of one basket item at order time.
///
/// Created once when the order is placed and immutable afterward, so later
/// basket or product changes never bleed into an existing order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub order_id: String,
    pub product_id: u64,
    pub quantity: u32,
}

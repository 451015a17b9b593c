use serde::{Deserialize, Serialize};

use super::error::ClientResult;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketItem {
    pub product_id: u64,
    pub product_name: String,
    pub manufacturer: String,
    pub category_id: u64,
    pub base_price_cents: u64,
    pub quantity: u32,
}

/// Current basket contents for a customer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    pub items: Vec<BasketItem>,
}

/// Basket service collaborator.
///
/// The total is fetched from the service rather than recomputed from the
/// items — the basket service owns pricing, and summing locally would drift
/// the moment it applies a discount this crate knows nothing about.
pub trait BasketClient {
    fn basket(&self, customer_id: &str) -> ClientResult<Option<Basket>>;
    fn total_cents(&self, customer_id: &str) -> ClientResult<Option<u64>>;
}

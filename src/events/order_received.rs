use serde::{Deserialize, Serialize};

use crate::clients::{BasketItem, CustomerProfile};
use crate::order::OrderSnapshot;

use super::order_created::ItemInfo;

/// Order-received event for the notification consumer — enough to write a
/// confirmation email without calling back into any service.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderReceivedEvent {
    pub customer_name: String,
    pub customer_email: String,
    pub order_reference: String,
    pub payment_method: String,
    pub items: Vec<ItemInfo>,
    pub total_cents: u64,
}

impl OrderReceivedEvent {
    pub fn from_parts(
        order: &OrderSnapshot,
        customer: &CustomerProfile,
        items: &[BasketItem],
    ) -> Self {
        OrderReceivedEvent {
            customer_name: customer.full_name(),
            customer_email: customer.email.clone(),
            order_reference: order.reference.clone(),
            payment_method: order.payment_method.to_string(),
            items: items.iter().map(ItemInfo::from).collect(),
            total_cents: order.total_cents,
        }
    }
}

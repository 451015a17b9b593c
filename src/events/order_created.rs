use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::clients::{Address, BasketItem, CustomerProfile};
use crate::order::OrderSnapshot;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub id: String,
    pub full_name: String,
    pub email: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInfo {
    pub contact_name: String,
    pub city: String,
    pub country: String,
    pub address_line: String,
    pub zip_code: String,
}

impl From<&Address> for AddressInfo {
    fn from(address: &Address) -> Self {
        AddressInfo {
            contact_name: address.contact_name.clone(),
            city: address.city.clone(),
            country: address.country.clone(),
            address_line: address.address_line.clone(),
            zip_code: address.zip_code.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub product_id: u64,
    pub product_name: String,
    pub manufacturer: String,
    pub category_id: u64,
    pub quantity: u32,
    pub base_price_cents: u64,
}

impl From<&BasketItem> for ItemInfo {
    fn from(item: &BasketItem) -> Self {
        ItemInfo {
            product_id: item.product_id,
            product_name: item.product_name.clone(),
            manufacturer: item.manufacturer.clone(),
            category_id: item.category_id,
            quantity: item.quantity,
            base_price_cents: item.base_price_cents,
        }
    }
}

/// Denormalized order-created event for the search-index consumer.
///
/// Embeds copies of the customer, both active addresses, and the purchased
/// items so the consumer never has to join against other services.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderCreatedEvent {
    pub order_id: String,
    pub reference: String,
    pub order_date: SystemTime,
    pub status: String,
    pub total_cents: u64,
    pub payment_method: String,
    pub customer: CustomerInfo,
    pub shipping_address: AddressInfo,
    pub billing_address: AddressInfo,
    pub items: Vec<ItemInfo>,
}

impl OrderCreatedEvent {
    pub fn from_parts(
        order: &OrderSnapshot,
        customer: &CustomerProfile,
        shipping_address: &Address,
        billing_address: &Address,
        items: &[BasketItem],
    ) -> Self {
        OrderCreatedEvent {
            order_id: order.id.clone(),
            reference: order.reference.clone(),
            order_date: order.placed_at,
            status: order.status.to_string(),
            total_cents: order.total_cents,
            payment_method: order.payment_method.to_string(),
            customer: CustomerInfo {
                id: customer.id.clone(),
                full_name: customer.full_name(),
                email: customer.email.clone(),
            },
            shipping_address: AddressInfo::from(shipping_address),
            billing_address: AddressInfo::from(billing_address),
            items: items.iter().map(ItemInfo::from).collect(),
        }
    }
}

//! Stub collaborators for driving the order saga in tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use orderflow::{
    Address, Basket, BasketClient, BasketItem, ClientError, ClientResult, CustomerDirectory,
    CustomerProfile, EventPublisher, PaymentDecline, PaymentGateway, PaymentReceipt, PublishError,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn address(id: &str, city: &str) -> Address {
    Address {
        id: id.to_string(),
        contact_name: "Ada Lovelace".to_string(),
        city: city.to_string(),
        country: "UK".to_string(),
        address_line: "12 Analytical Row".to_string(),
        zip_code: "E1 6AN".to_string(),
    }
}

/// Customer c-1 with active shipping address in London and active billing
/// address in Oxford.
pub fn customer_profile() -> CustomerProfile {
    CustomerProfile {
        id: "c-1".to_string(),
        name: "Ada".to_string(),
        surname: "Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        billing_addresses: vec![address("b-1", "Oxford")],
        shipping_addresses: vec![address("s-1", "London"), address("s-2", "Cambridge")],
        active_billing_address_id: Some("b-1".to_string()),
        active_shipping_address_id: Some("s-1".to_string()),
    }
}

/// Two items; the stubbed basket service reports their total as 15000 cents.
pub fn basket() -> Basket {
    Basket {
        items: vec![
            BasketItem {
                product_id: 42,
                product_name: "Mechanical Keyboard".to_string(),
                manufacturer: "Keychron".to_string(),
                category_id: 7,
                base_price_cents: 9900,
                quantity: 1,
            },
            BasketItem {
                product_id: 7,
                product_name: "USB-C Cable".to_string(),
                manufacturer: "Anker".to_string(),
                category_id: 3,
                base_price_cents: 2550,
                quantity: 2,
            },
        ],
    }
}

#[derive(Clone)]
pub struct StubCustomerDirectory {
    response: ClientResult<Option<CustomerProfile>>,
}

impl StubCustomerDirectory {
    pub fn returning(profile: CustomerProfile) -> Self {
        StubCustomerDirectory {
            response: Ok(Some(profile)),
        }
    }

    pub fn missing() -> Self {
        StubCustomerDirectory { response: Ok(None) }
    }

    pub fn down(message: &str) -> Self {
        StubCustomerDirectory {
            response: Err(ClientError::new("customer", message)),
        }
    }
}

impl CustomerDirectory for StubCustomerDirectory {
    fn profile(&self, _customer_id: &str) -> ClientResult<Option<CustomerProfile>> {
        self.response.clone()
    }
}

#[derive(Clone)]
pub struct StubBasketClient {
    basket: ClientResult<Option<Basket>>,
    total: ClientResult<Option<u64>>,
}

impl StubBasketClient {
    pub fn returning(basket: Basket, total_cents: u64) -> Self {
        StubBasketClient {
            basket: Ok(Some(basket)),
            total: Ok(Some(total_cents)),
        }
    }

    pub fn missing() -> Self {
        StubBasketClient {
            basket: Ok(None),
            total: Ok(None),
        }
    }

    pub fn down(message: &str) -> Self {
        StubBasketClient {
            basket: Err(ClientError::new("basket", message)),
            total: Err(ClientError::new("basket", message)),
        }
    }

    pub fn without_total(basket: Basket) -> Self {
        StubBasketClient {
            basket: Ok(Some(basket)),
            total: Ok(None),
        }
    }
}

impl BasketClient for StubBasketClient {
    fn basket(&self, _customer_id: &str) -> ClientResult<Option<Basket>> {
        self.basket.clone()
    }

    fn total_cents(&self, _customer_id: &str) -> ClientResult<Option<u64>> {
        self.total.clone()
    }
}

#[derive(Clone)]
pub struct StubPaymentGateway {
    result: Result<PaymentReceipt, PaymentDecline>,
    charges: Arc<AtomicU32>,
}

impl StubPaymentGateway {
    pub fn approving(payment_id: &str, paid_cents: u64) -> Self {
        StubPaymentGateway {
            result: Ok(PaymentReceipt {
                payment_id: payment_id.to_string(),
                paid_cents,
            }),
            charges: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn declining(message: &str) -> Self {
        StubPaymentGateway {
            result: Err(PaymentDecline::new(message)),
            charges: Arc::new(AtomicU32::new(0)),
        }
    }

    /// How many times the gateway was asked to charge.
    pub fn charges(&self) -> u32 {
        self.charges.load(Ordering::SeqCst)
    }
}

impl PaymentGateway for StubPaymentGateway {
    fn charge(&self, _customer_id: &str) -> Result<PaymentReceipt, PaymentDecline> {
        self.charges.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

#[derive(Clone, Debug)]
pub struct PublishedEvent {
    pub topic: String,
    pub key: String,
    pub payload: Vec<u8>,
}

impl PublishedEvent {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.payload).expect("published payload should be JSON")
    }
}

#[derive(Clone)]
pub struct RecordingPublisher {
    events: Arc<Mutex<Vec<PublishedEvent>>>,
    fail_with: Option<String>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        RecordingPublisher {
            events: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(message: &str) -> Self {
        RecordingPublisher {
            events: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(message.to_string()),
        }
    }

    pub fn published(&self) -> Vec<PublishedEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventPublisher for RecordingPublisher {
    fn publish(&self, topic: &str, key: &str, payload: &[u8]) -> Result<(), PublishError> {
        if let Some(message) = &self.fail_with {
            return Err(PublishError::new(message.clone()));
        }
        self.events.lock().unwrap().push(PublishedEvent {
            topic: topic.to_string(),
            key: key.to_string(),
            payload: payload.to_vec(),
        });
        Ok(())
    }
}

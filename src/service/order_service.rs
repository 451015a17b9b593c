use serde::{Deserialize, Serialize};

use crate::clients::{
    Address, Basket, BasketClient, ClientResult, CustomerDirectory, CustomerProfile,
    PaymentGateway, PaymentReceipt,
};
use crate::config::TopicConfig;
use crate::error::OrderError;
use crate::events::{EventPublisher, OrderCreatedEvent, OrderReceivedEvent};
use crate::order::{Order, OrderLine, OrderSnapshot, PaymentMethod};
use crate::store::{OrderLineStore, OrderStore};

/// Inbound order request: a caller-supplied reference (not deduplicated
/// here) and the chosen payment method.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderRequest {
    pub reference: String,
    pub payment_method: PaymentMethod,
}

/// What the caller gets back on success.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: String,
    pub reference: String,
}

/// Order creation orchestrator.
///
/// One `create_order` call is one sequential saga:
///
/// 1. validate the customer profile against the authenticated id
/// 2. validate the basket is present and non-empty
/// 3. fetch the authoritative total from the basket service
/// 4. persist the order as `PENDING_PAYMENT` with one line per basket item
/// 5. charge the gateway; on failure persist `PAYMENT_FAILED` and bail
/// 6. on success persist `PROCESSING`, then publish the order-created and
///    order-received events
///
/// Steps run strictly in order — each needs the previous one's output — and
/// nothing is retried. State lives entirely in the store; the service itself
/// holds no mutable state across requests.
pub struct OrderService<C, B, P, E, S> {
    customers: C,
    baskets: B,
    payments: P,
    publisher: E,
    store: S,
    topics: TopicConfig,
}

impl<C, B, P, E, S> OrderService<C, B, P, E, S>
where
    C: CustomerDirectory,
    B: BasketClient,
    P: PaymentGateway,
    E: EventPublisher,
    S: OrderStore + OrderLineStore,
{
    pub fn new(customers: C, baskets: B, payments: P, publisher: E, store: S) -> Self {
        Self::with_topics(customers, baskets, payments, publisher, store, TopicConfig::default())
    }

    pub fn with_topics(
        customers: C,
        baskets: B,
        payments: P,
        publisher: E,
        store: S,
        topics: TopicConfig,
    ) -> Self {
        OrderService {
            customers,
            baskets,
            payments,
            publisher,
            store,
            topics,
        }
    }

    pub fn create_order(
        &self,
        request: OrderRequest,
        customer_id: &str,
    ) -> Result<OrderSummary, OrderError> {
        let customer = self.validate_customer(customer_id)?;
        let basket = self.validate_basket(customer_id)?;
        let total_cents = self.total_price(customer_id)?;

        log::info!(
            "starting order process for customer {} with total {} cents",
            customer.id,
            total_cents
        );

        let mut order = self.persist_initial_order(&request, &customer, &basket, total_cents)?;

        match self.process_payment(&order, customer_id) {
            Ok(receipt) => {
                self.finalize_order(&mut order, &customer, &basket)?;
                log::info!(
                    "payment {} accepted for order {}",
                    receipt.payment_id,
                    order.id()
                );
            }
            Err(err) => {
                self.handle_payment_failure(&mut order, &err)?;
                return Err(err);
            }
        }

        Ok(OrderSummary {
            id: order.id().to_string(),
            reference: order.reference().to_string(),
        })
    }

    pub fn get_all_orders(&self) -> Result<Vec<OrderSnapshot>, OrderError> {
        let orders = self.store.all()?;
        Ok(orders.iter().map(Order::snapshot).collect())
    }

    pub fn get_order(&self, order_id: &str) -> Result<OrderSnapshot, OrderError> {
        match self.store.get(order_id)? {
            Some(order) => Ok(order.snapshot()),
            None => Err(OrderError::OrderNotFound {
                id: order_id.to_string(),
            }),
        }
    }

    fn validate_customer(&self, customer_id: &str) -> Result<CustomerProfile, OrderError> {
        let customer = require(
            self.customers.profile(customer_id),
            "customer",
            "returned an empty profile",
        )?;

        if customer.id != customer_id {
            return Err(OrderError::AuthenticationMismatch {
                expected: customer_id.to_string(),
                actual: customer.id,
            });
        }
        Ok(customer)
    }

    fn validate_basket(&self, customer_id: &str) -> Result<Basket, OrderError> {
        let basket = require(
            self.baskets.basket(customer_id),
            "basket",
            "returned an empty basket response",
        )?;

        if basket.items.is_empty() {
            return Err(OrderError::EmptyBasket);
        }
        Ok(basket)
    }

    fn total_price(&self, customer_id: &str) -> Result<u64, OrderError> {
        require(
            self.baskets.total_cents(customer_id),
            "basket",
            "did not report a total price",
        )
    }

    fn persist_initial_order(
        &self,
        request: &OrderRequest,
        customer: &CustomerProfile,
        basket: &Basket,
        total_cents: u64,
    ) -> Result<Order, OrderError> {
        let order_id = self.store.next_order_id();

        let mut order = Order::new();
        order.place(
            order_id.clone(),
            request.reference.clone(),
            customer.id.clone(),
            customer.email.clone(),
            total_cents,
            request.payment_method,
        );

        let lines: Vec<OrderLine> = basket
            .items
            .iter()
            .map(|item| OrderLine {
                order_id: order_id.clone(),
                product_id: item.product_id,
                quantity: item.quantity,
            })
            .collect();

        self.store.commit_placed(&mut order, &lines)?;
        Ok(order)
    }

    fn process_payment(
        &self,
        order: &Order,
        customer_id: &str,
    ) -> Result<PaymentReceipt, OrderError> {
        log::info!("initiating payment for order reference {}", order.reference());
        self.payments.charge(customer_id).map_err(|decline| {
            log::error!(
                "payment failed for order reference {}: {}",
                order.reference(),
                decline.message
            );
            OrderError::PaymentProcessing {
                message: format!(
                    "payment gateway declined the transaction: {}",
                    decline.message
                ),
            }
        })
    }

    /// The compensating write: the order record must survive the failure,
    /// so the `PAYMENT_FAILED` status is committed before the payment error
    /// goes back to the caller.
    fn handle_payment_failure(
        &self,
        order: &mut Order,
        err: &OrderError,
    ) -> Result<(), OrderError> {
        log::warn!("marking order reference {} as PAYMENT_FAILED", order.reference());
        order.payment_failed(err.to_string());
        self.store.commit(order)?;
        Ok(())
    }

    fn finalize_order(
        &self,
        order: &mut Order,
        customer: &CustomerProfile,
        basket: &Basket,
    ) -> Result<(), OrderError> {
        order.payment_succeeded();
        self.store.commit(order)?;

        self.publish_order_events(order, customer, basket)
    }

    /// Publish failures past this point are not compensated: the order is
    /// already committed as `PROCESSING`, and an error here surfaces to the
    /// caller with no status rollback.
    fn publish_order_events(
        &self,
        order: &Order,
        customer: &CustomerProfile,
        basket: &Basket,
    ) -> Result<(), OrderError> {
        let snapshot = order.snapshot();

        let shipping_address = find_address(
            &customer.shipping_addresses,
            customer.active_shipping_address_id.as_deref(),
            "shipping",
        )?;
        let billing_address = find_address(
            &customer.billing_addresses,
            customer.active_billing_address_id.as_deref(),
            "billing",
        )?;

        let created = OrderCreatedEvent::from_parts(
            &snapshot,
            customer,
            shipping_address,
            billing_address,
            &basket.items,
        );
        let payload = serde_json::to_vec(&created).expect("JSON serialization should not fail");
        self.publisher
            .publish(&self.topics.order_created, order.id(), &payload)?;

        let received = OrderReceivedEvent::from_parts(&snapshot, customer, &basket.items);
        let payload = serde_json::to_vec(&received).expect("JSON serialization should not fail");
        self.publisher
            .publish(&self.topics.order_received, order.id(), &payload)?;

        Ok(())
    }
}

/// Unwrap a collaborator response, mapping both transport failures and empty
/// bodies to `ServiceUnavailable`.
fn require<T>(
    response: ClientResult<Option<T>>,
    service: &'static str,
    missing: &'static str,
) -> Result<T, OrderError> {
    match response {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(OrderError::ServiceUnavailable {
            service,
            message: missing.to_string(),
        }),
        Err(err) => Err(OrderError::ServiceUnavailable {
            service: err.service,
            message: err.message,
        }),
    }
}

/// Resolve the customer's active address of the given kind, the way the
/// event consumers expect it: the address list entry whose id matches the
/// recorded active-address id.
fn find_address<'a>(
    addresses: &'a [Address],
    active_id: Option<&str>,
    kind: &str,
) -> Result<&'a Address, OrderError> {
    let active_id = active_id.ok_or_else(|| OrderError::InvalidOrderRequest {
        message: format!("customer has no active {} address configured", kind),
    })?;

    addresses
        .iter()
        .find(|address| address.id == active_id)
        .ok_or_else(|| OrderError::InvalidOrderRequest {
            message: format!(
                "active {} address (id {}) not found in customer profile",
                kind, active_id
            ),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(id: &str) -> Address {
        Address {
            id: id.to_string(),
            contact_name: "Ada Lovelace".to_string(),
            city: "London".to_string(),
            country: "UK".to_string(),
            address_line: "12 Analytical Row".to_string(),
            zip_code: "E1 6AN".to_string(),
        }
    }

    #[test]
    fn find_address_matches_active_id() {
        let addresses = vec![address("a-1"), address("a-2")];
        let found = find_address(&addresses, Some("a-2"), "shipping").unwrap();
        assert_eq!(found.id, "a-2");
    }

    #[test]
    fn find_address_without_active_id() {
        let err = find_address(&[], None, "billing").unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidOrderRequest {
                message: "customer has no active billing address configured".to_string()
            }
        );
    }

    #[test]
    fn find_address_with_stale_active_id() {
        let addresses = vec![address("a-1")];
        let err = find_address(&addresses, Some("a-9"), "shipping").unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidOrderRequest {
                message: "active shipping address (id a-9) not found in customer profile"
                    .to_string()
            }
        );
    }

    #[test]
    fn require_maps_empty_and_error_responses() {
        let missing: Result<String, OrderError> =
            require(Ok(None), "basket", "returned an empty basket response");
        assert_eq!(
            missing.unwrap_err(),
            OrderError::ServiceUnavailable {
                service: "basket",
                message: "returned an empty basket response".to_string()
            }
        );

        let down: Result<String, OrderError> = require(
            Err(crate::clients::ClientError::new("basket", "connection refused")),
            "basket",
            "returned an empty basket response",
        );
        assert_eq!(
            down.unwrap_err(),
            OrderError::ServiceUnavailable {
                service: "basket",
                message: "connection refused".to_string()
            }
        );
    }
}

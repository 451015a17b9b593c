use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::audit::{Aggregate, AuditLog, PayloadError, TransitionRecord};

/// Order status state machine:
///
/// ```text
///         place                 payment success
/// [none] -------> PendingPayment ---------------> Processing (terminal)
///                       |
///                       | payment failure
///                       v
///                 PaymentFailed (terminal)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    PendingPayment,
    Processing,
    PaymentFailed,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::PendingPayment
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::PendingPayment => "PENDING_PAYMENT",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::PaymentFailed => "PAYMENT_FAILED",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    CreditCard,
    BankTransfer,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::CreditCard
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
        };
        f.write_str(name)
    }
}

#[derive(Serialize, Deserialize)]
struct OrderPlacedPayload {
    order_id: String,
    reference: String,
    customer_id: String,
    customer_email: String,
    total_cents: u64,
    payment_method: PaymentMethod,
}

/// Order aggregate. Money amounts are integer minor units; the total comes
/// from the basket service at placement time and is never recomputed here.
///
/// Every command records its transition attempt in the audit trail, accepted
/// or not, so a reconciliation pass can spot orders whose history stops
/// between a charge and its status write.
pub struct Order {
    audit: AuditLog,
    reference: String,
    customer_id: String,
    customer_email: String,
    total_cents: u64,
    payment_method: PaymentMethod,
    status: OrderStatus,
    placed_at: SystemTime,
    failure_reason: Option<String>,
}

impl Default for Order {
    fn default() -> Self {
        Order {
            audit: AuditLog::new(),
            reference: String::new(),
            customer_id: String::new(),
            customer_email: String::new(),
            total_cents: 0,
            payment_method: PaymentMethod::default(),
            status: OrderStatus::default(),
            placed_at: SystemTime::now(),
            failure_reason: None,
        }
    }
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> &str {
        self.audit.id()
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    pub fn total_cents(&self) -> u64 {
        self.total_cents
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn placed_at(&self) -> SystemTime {
        self.placed_at
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    /// Place the order in `PendingPayment`. The id is store-assigned and
    /// handed in by the caller so the `OrderPlaced` record carries it.
    pub fn place(
        &mut self,
        order_id: String,
        reference: String,
        customer_id: String,
        customer_email: String,
        total_cents: u64,
        payment_method: PaymentMethod,
    ) {
        self.audit.set_id(&order_id);
        self.reference = reference;
        self.customer_id = customer_id;
        self.customer_email = customer_email;
        self.total_cents = total_cents;
        self.payment_method = payment_method;
        self.status = OrderStatus::PendingPayment;
        self.placed_at = SystemTime::now();
        self.audit.record(
            "OrderPlaced",
            &OrderPlacedPayload {
                order_id,
                reference: self.reference.clone(),
                customer_id: self.customer_id.clone(),
                customer_email: self.customer_email.clone(),
                total_cents: self.total_cents,
                payment_method: self.payment_method,
            },
        );
    }

    /// Transition `PendingPayment -> Processing` after a successful charge.
    /// Out of that state the attempt is recorded as rejected and state is
    /// unchanged.
    pub fn payment_succeeded(&mut self) {
        if self.status != OrderStatus::PendingPayment {
            let reason = format!("order is {}", self.status);
            self.audit.record_rejected("PaymentAccepted", &reason);
            return;
        }
        self.status = OrderStatus::Processing;
        self.audit.record("PaymentAccepted", &());
    }

    /// Transition `PendingPayment -> PaymentFailed` after a declined or
    /// errored charge. The gateway's message is kept for the audit trail.
    pub fn payment_failed(&mut self, reason: String) {
        if self.status != OrderStatus::PendingPayment {
            let rejection = format!("order is {}", self.status);
            self.audit.record_rejected("PaymentDeclined", &rejection);
            return;
        }
        self.status = OrderStatus::PaymentFailed;
        self.failure_reason = Some(reason.clone());
        self.audit.record("PaymentDeclined", &reason);
    }

    pub fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            id: self.audit.id().to_string(),
            reference: self.reference.clone(),
            customer_id: self.customer_id.clone(),
            customer_email: self.customer_email.clone(),
            total_cents: self.total_cents,
            payment_method: self.payment_method,
            status: self.status,
            placed_at: self.placed_at,
            failure_reason: self.failure_reason.clone(),
        }
    }
}

impl Aggregate for Order {
    type ReplayError = PayloadError;

    fn audit(&self) -> &AuditLog {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditLog {
        &mut self.audit
    }

    fn replay(&mut self, record: &TransitionRecord) -> Result<(), Self::ReplayError> {
        match record.name.as_str() {
            "OrderPlaced" => {
                let payload: OrderPlacedPayload = record.decode()?;
                self.place(
                    payload.order_id,
                    payload.reference,
                    payload.customer_id,
                    payload.customer_email,
                    payload.total_cents,
                    payload.payment_method,
                );
                // the record carries the authoritative placement time
                self.placed_at = record.timestamp;
            }
            "PaymentAccepted" => self.payment_succeeded(),
            "PaymentDeclined" => {
                let reason: String = record.decode()?;
                self.payment_failed(reason);
            }
            other => {
                return Err(PayloadError {
                    message: format!("unknown transition: {}", other),
                })
            }
        }
        Ok(())
    }
}

/// Plain read view of an order, used by queries and event assembly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub id: String,
    pub reference: String,
    pub customer_id: String,
    pub customer_email: String,
    pub total_cents: u64,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub placed_at: SystemTime,
    pub failure_reason: Option<String>,
}

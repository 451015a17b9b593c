use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub payment_id: String,
    pub paid_cents: u64,
}

/// A declined or failed charge. Opaque beyond the provider's message —
/// gateway declines, transport errors, and timeouts all land here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaymentDecline {
    pub message: String,
}

impl PaymentDecline {
    pub fn new(message: impl Into<String>) -> Self {
        PaymentDecline {
            message: message.into(),
        }
    }
}

impl fmt::Display for PaymentDecline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "payment declined: {}", self.message)
    }
}

impl std::error::Error for PaymentDecline {}

/// Payment provider collaborator. Charging is synchronous; there is no
/// retry or backoff at this layer.
pub trait PaymentGateway {
    fn charge(&self, customer_id: &str) -> Result<PaymentReceipt, PaymentDecline>;
}

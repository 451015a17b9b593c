use std::fmt;

use crate::events::PublishError;
use crate::store::StoreError;

/// Failure taxonomy for the order saga. Every failure is local to one step
/// and non-retried; the only compensating action anywhere is the
/// `PAYMENT_FAILED` status write that precedes a `PaymentProcessing` error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderError {
    /// A collaborator errored or returned an empty response.
    ServiceUnavailable {
        service: &'static str,
        message: String,
    },
    /// The authenticated customer id does not match the fetched profile.
    AuthenticationMismatch { expected: String, actual: String },
    /// The basket has no items.
    EmptyBasket,
    /// The payment gateway declined or errored. The order has already been
    /// persisted as `PAYMENT_FAILED` when this surfaces.
    PaymentProcessing { message: String },
    /// The order request cannot be completed as submitted — currently only
    /// an unresolvable active address during event assembly.
    InvalidOrderRequest { message: String },
    OrderNotFound { id: String },
    Store(StoreError),
    Publish(PublishError),
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderError::ServiceUnavailable { service, message } => {
                write!(f, "{} service is unavailable: {}", service, message)
            }
            OrderError::AuthenticationMismatch { expected, actual } => write!(
                f,
                "authentication mismatch: token principal {} does not match profile {}",
                expected, actual
            ),
            OrderError::EmptyBasket => {
                write!(f, "cannot create an order with an empty basket")
            }
            OrderError::PaymentProcessing { message } => write!(f, "{}", message),
            OrderError::InvalidOrderRequest { message } => write!(f, "{}", message),
            OrderError::OrderNotFound { id } => write!(f, "order not found with id {}", id),
            OrderError::Store(err) => write!(f, "{}", err),
            OrderError::Publish(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for OrderError {}

impl From<StoreError> for OrderError {
    fn from(err: StoreError) -> Self {
        OrderError::Store(err)
    }
}

impl From<PublishError> for OrderError {
    fn from(err: PublishError) -> Self {
        OrderError::Publish(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let unavailable = OrderError::ServiceUnavailable {
            service: "customer",
            message: "returned an empty profile".to_string(),
        };
        assert_eq!(
            unavailable.to_string(),
            "customer service is unavailable: returned an empty profile"
        );

        assert_eq!(
            OrderError::EmptyBasket.to_string(),
            "cannot create an order with an empty basket"
        );

        let not_found = OrderError::OrderNotFound {
            id: "ord-404".to_string(),
        };
        assert_eq!(not_found.to_string(), "order not found with id ord-404");
    }

    #[test]
    fn from_store_error() {
        let err: OrderError = StoreError::LockPoisoned("order read").into();
        assert_eq!(
            err,
            OrderError::Store(StoreError::LockPoisoned("order read"))
        );
    }
}

mod basket;
mod customer;
mod error;
mod payment;

pub use basket::{Basket, BasketClient, BasketItem};
pub use customer::{Address, CustomerDirectory, CustomerProfile};
pub use error::{ClientError, ClientResult};
pub use payment::{PaymentDecline, PaymentGateway, PaymentReceipt};

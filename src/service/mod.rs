mod order_service;

pub use order_service::{OrderRequest, OrderService, OrderSummary};

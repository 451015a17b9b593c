mod line;
mod order;

pub use line::OrderLine;
pub use order::{Order, OrderSnapshot, OrderStatus, PaymentMethod};

use serde::{Deserialize, Serialize};

use super::error::ClientResult;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    pub contact_name: String,
    pub city: String,
    pub country: String,
    pub address_line: String,
    pub zip_code: String,
}

/// Customer profile as reported by the customer service. Read-only input,
/// fetched per request and never cached here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub billing_addresses: Vec<Address>,
    pub shipping_addresses: Vec<Address>,
    pub active_billing_address_id: Option<String>,
    pub active_shipping_address_id: Option<String>,
}

impl CustomerProfile {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Customer service collaborator. The authenticated customer id is an
/// explicit parameter; there is no ambient security context to consult.
///
/// `Ok(None)` means the service answered but has no profile — the
/// orchestrator treats that the same as a transport failure.
pub trait CustomerDirectory {
    fn profile(&self, customer_id: &str) -> ClientResult<Option<CustomerProfile>>;
}

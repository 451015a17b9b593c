use serde::Deserialize;

/// Topic names for outbound order events. Deserializable so deployments can
/// override either topic from a JSON config document; omitted fields keep
/// their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TopicConfig {
    pub order_created: String,
    pub order_received: String,
}

impl Default for TopicConfig {
    fn default() -> Self {
        TopicConfig {
            order_created: "order.created".to_string(),
            order_received: "order.received".to_string(),
        }
    }
}

use serde::{Deserialize, Serialize};

/// A writer's offer to take an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub author_id: u64,
    pub accepted: bool,
}

impl Offer {
    /// A fresh, not-yet-accepted offer.
    pub fn new(author_id: u64) -> Self {
        Self {
            author_id,
            accepted: false,
        }
    }
}

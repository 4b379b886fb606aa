use crate::model::Offer;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
///
/// Serializes as a bare number, so it round-trips cleanly through the JSON
/// argument lists the operations exchange.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Represents a customer order.
///
/// Pure data; every mutation goes through the
/// [`OrderBook`](crate::store::OrderBook), and the operations translate
/// between JSON arguments and this struct at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub title: String,
    pub pages: u64,
    /// Hidden orders stay in the book but leave the public feed.
    pub hidden: bool,
    pub offers: Vec<Offer>,
    /// Author hired to write the order, once one is.
    pub expert_id: Option<u64>,
}

/// Payload for hiring an expert onto an order.
///
/// Hire steps receive this as a single JSON object argument, typically built
/// by a resolver from the previous step's result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HireRequest {
    pub order_id: OrderId,
    pub author_id: u64,
}

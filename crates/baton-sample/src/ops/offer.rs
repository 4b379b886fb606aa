use super::{required_id, required_u64};
use crate::store::OrderBook;
use async_trait::async_trait;
use baton_engine::{OpError, Operation};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Records a writer's offer from `[order_id, author_id]` and returns
/// `{ "id", "offers" }` with the new offer count.
pub struct AddOffer {
    book: Arc<OrderBook>,
}

impl AddOffer {
    pub fn new(book: Arc<OrderBook>) -> Self {
        Self { book }
    }
}

#[async_trait]
impl Operation for AddOffer {
    fn name(&self) -> &str {
        "add_offer"
    }

    async fn call(&self, args: Vec<Value>) -> Result<Value, OpError> {
        let id = required_id(&args, 0)?;
        let author_id = required_u64(&args, 1)?;

        let order = self.book.add_offer(id, author_id).await?;
        info!(order_id = %order.id, author_id, offers = order.offers.len(), "Offer added");
        Ok(json!({ "id": order.id, "offers": order.offers.len() }))
    }
}

/// Accepts the author's offer from `[order_id, author_id]` and returns
/// `{ "id", "author_id" }`.
pub struct AcceptOffer {
    book: Arc<OrderBook>,
}

impl AcceptOffer {
    pub fn new(book: Arc<OrderBook>) -> Self {
        Self { book }
    }
}

#[async_trait]
impl Operation for AcceptOffer {
    fn name(&self) -> &str {
        "accept_offer"
    }

    async fn call(&self, args: Vec<Value>) -> Result<Value, OpError> {
        let id = required_id(&args, 0)?;
        let author_id = required_u64(&args, 1)?;

        let order = self.book.accept_offer(id, author_id).await?;
        info!(order_id = %order.id, author_id, "Offer accepted");
        Ok(json!({ "id": order.id, "author_id": author_id }))
    }
}

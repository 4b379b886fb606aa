use super::{required_id, required_str, required_u64};
use crate::store::OrderBook;
use async_trait::async_trait;
use baton_engine::{OpError, Operation};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// Creates an order from `[title, pages]` and returns the new order's id.
pub struct CreateOrder {
    book: Arc<OrderBook>,
}

impl CreateOrder {
    pub fn new(book: Arc<OrderBook>) -> Self {
        Self { book }
    }
}

#[async_trait]
impl Operation for CreateOrder {
    fn name(&self) -> &str {
        "create_order"
    }

    async fn call(&self, args: Vec<Value>) -> Result<Value, OpError> {
        let title = required_str(&args, 0)?;
        let pages = required_u64(&args, 1)?;
        debug!(title, pages, "create_order called");

        let order = self.book.create(title.to_string(), pages).await;
        info!(order_id = %order.id, "Order created");
        Ok(json!(order.id))
    }
}

/// Replaces an order's title from `[id, title]` and returns
/// `{ "id", "title" }`.
pub struct UpdateOrder {
    book: Arc<OrderBook>,
}

impl UpdateOrder {
    pub fn new(book: Arc<OrderBook>) -> Self {
        Self { book }
    }
}

#[async_trait]
impl Operation for UpdateOrder {
    fn name(&self) -> &str {
        "update_order"
    }

    async fn call(&self, args: Vec<Value>) -> Result<Value, OpError> {
        let id = required_id(&args, 0)?;
        let title = required_str(&args, 1)?;
        debug!(order_id = %id, title, "update_order called");

        let order = self.book.update_title(id, title.to_string()).await?;
        info!(order_id = %order.id, "Order updated");
        Ok(json!({ "id": order.id, "title": order.title }))
    }
}

/// Takes the order given by `[id]` off the public feed; returns `true`.
pub struct HideOrder {
    book: Arc<OrderBook>,
}

impl HideOrder {
    pub fn new(book: Arc<OrderBook>) -> Self {
        Self { book }
    }
}

#[async_trait]
impl Operation for HideOrder {
    fn name(&self) -> &str {
        "hide_order"
    }

    async fn call(&self, args: Vec<Value>) -> Result<Value, OpError> {
        let id = required_id(&args, 0)?;
        let order = self.book.hide(id).await?;
        info!(order_id = %order.id, "Order hidden");
        Ok(json!(true))
    }
}

/// Deletes the order given by `[id]`; returns `true`.
pub struct DeleteOrder {
    book: Arc<OrderBook>,
}

impl DeleteOrder {
    pub fn new(book: Arc<OrderBook>) -> Self {
        Self { book }
    }
}

#[async_trait]
impl Operation for DeleteOrder {
    fn name(&self) -> &str {
        "delete_order"
    }

    async fn call(&self, args: Vec<Value>) -> Result<Value, OpError> {
        let id = required_id(&args, 0)?;
        let order = self.book.delete(id).await?;
        info!(order_id = %order.id, "Order deleted");
        Ok(json!(true))
    }
}

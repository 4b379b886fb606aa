use crate::model::{HireRequest, OrderError};
use crate::store::OrderBook;
use async_trait::async_trait;
use baton_engine::{OpError, Operation};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// Hires an expert from a single `{ "order_id", "author_id" }` object
/// argument; returns `true`.
///
/// Taking one object instead of two positions keeps hire steps easy to build
/// from a resolver: the previous step's id slots straight into the payload.
pub struct HireExpert {
    book: Arc<OrderBook>,
}

impl HireExpert {
    pub fn new(book: Arc<OrderBook>) -> Self {
        Self { book }
    }
}

#[async_trait]
impl Operation for HireExpert {
    fn name(&self) -> &str {
        "hire_expert"
    }

    async fn call(&self, args: Vec<Value>) -> Result<Value, OpError> {
        let payload = args.first().cloned().ok_or(OrderError::BadArgument {
            index: 0,
            expected: "hire request object",
        })?;
        let request: HireRequest = serde_json::from_value(payload)?;
        debug!(order_id = %request.order_id, author_id = request.author_id, "hire_expert called");

        let order = self.book.hire(request.order_id, request.author_id).await?;
        info!(order_id = %order.id, expert_id = request.author_id, "Expert hired");
        Ok(json!(true))
    }
}

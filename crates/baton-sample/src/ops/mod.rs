//! # Operations
//!
//! [`Operation`](baton_engine::Operation) implementations over the shared
//! [`OrderBook`](crate::store::OrderBook). Each operation owns an `Arc` of
//! the book, validates its positional JSON arguments, and returns a JSON
//! value the next step can build on.
//!
//! A missing or mistyped argument surfaces as
//! [`OrderError::BadArgument`](crate::model::OrderError) through the engine,
//! never as a panic.

mod expert;
mod offer;
mod order;

pub use expert::HireExpert;
pub use offer::{AcceptOffer, AddOffer};
pub use order::{CreateOrder, DeleteOrder, HideOrder, UpdateOrder};

use crate::model::{OrderError, OrderId};
use baton_engine::OpError;
use serde_json::{json, Value};
use std::time::Duration;

pub(crate) fn required_str(args: &[Value], index: usize) -> Result<&str, OrderError> {
    args.get(index)
        .and_then(Value::as_str)
        .ok_or(OrderError::BadArgument {
            index,
            expected: "string",
        })
}

pub(crate) fn required_u64(args: &[Value], index: usize) -> Result<u64, OrderError> {
    args.get(index)
        .and_then(Value::as_u64)
        .ok_or(OrderError::BadArgument {
            index,
            expected: "unsigned number",
        })
}

pub(crate) fn required_id(args: &[Value], index: usize) -> Result<OrderId, OrderError> {
    args.get(index)
        .and_then(Value::as_u64)
        .map(OrderId)
        .ok_or(OrderError::BadArgument {
            index,
            expected: "order id",
        })
}

/// Pauses for the given number of milliseconds (first argument, default 150)
/// and returns how long it slept. Wrap it with [`op!`](baton_engine::op) to
/// use it as a step.
pub async fn wait(args: Vec<Value>) -> Result<Value, OpError> {
    let ms = args.first().and_then(Value::as_u64).unwrap_or(150);
    tokio::time::sleep(Duration::from_millis(ms)).await;
    Ok(json!(ms))
}

//! # Demo Flows
//!
//! The step sequences and registry wiring the demo binary runs. The same
//! operations are driven two ways:
//!
//! 1. **Ad-hoc**: direct steps carrying their own argument sources
//! 2. **Registry**: named steps with default argument sources, run by key,
//!    with one step-level override
//!
//! Both end with a hire built by a resolver from the previous step's result,
//! which is where the steps-as-data vocabulary pays off.

use crate::ops::{wait, AcceptOffer, AddOffer, CreateOrder, HideOrder, HireExpert, UpdateOrder};
use crate::store::OrderBook;
use baton_engine::{op, OpError, Pipe, Step, StepEntry, StepRegistry};
use serde_json::{json, Value};
use std::sync::Arc;

/// Builds the demo's flows over one shared order book.
pub struct OrderFlows {
    book: Arc<OrderBook>,
}

impl OrderFlows {
    pub fn new(book: Arc<OrderBook>) -> Self {
        Self { book }
    }

    /// Way one: ad-hoc steps with no registry. Each step carries its own
    /// operation and argument source.
    pub fn adhoc_steps(&self) -> Vec<Step> {
        vec![
            Step::op(CreateOrder::new(self.book.clone()))
                .with_args(vec![json!("My Essay"), json!(10)]),
            Step::op(UpdateOrder::new(self.book.clone())).with_resolver(|prev| {
                vec![prev.cloned().unwrap_or(Value::Null), json!("Amazing Essay")]
            }),
            // Update returns an object, so the hire payload digs the id out.
            Step::op(HireExpert::new(self.book.clone())).with_resolver(|prev| {
                vec![json!({
                    "order_id": id_of(prev),
                    "author_id": 999,
                })]
            }),
        ]
    }

    /// Way two, part one: the registry of named steps with their default
    /// argument sources.
    pub fn registry(&self) -> StepRegistry {
        StepRegistry::new()
            .with_entry(
                "CREATE_ORDER",
                StepEntry::new(CreateOrder::new(self.book.clone()))
                    .with_args(vec![json!("Custom Essay"), json!(12)]),
            )
            .with_entry(
                "UPDATE_ORDER",
                StepEntry::new(UpdateOrder::new(self.book.clone()))
                    .with_args(vec![json!(1), json!("NEW custom title")]),
            )
            .with_entry(
                "HIRE_EXPERT",
                StepEntry::new(HireExpert::new(self.book.clone())).with_resolver(|prev| {
                    vec![json!({
                        "order_id": id_of(prev),
                        "author_id": 32535,
                    })]
                }),
            )
    }

    /// Way two, part two: the pipeline of keys into [`Self::registry`]. The
    /// update step overrides its registry default with a resolver, so it
    /// targets whatever order the previous step created instead of the
    /// hardcoded default.
    pub fn keyed_steps(&self) -> Vec<Step> {
        vec![
            Step::op(op!(wait)),
            Step::key("CREATE_ORDER"),
            Step::key("UPDATE_ORDER")
                .with_resolver(|prev| vec![prev.cloned().unwrap_or(Value::Null), json!("ok")]),
            Step::key("HIRE_EXPERT"),
        ]
    }

    /// Offer lifecycle: a writer bids on a fresh order, wins it, and the
    /// order leaves the public feed.
    pub fn offer_steps(&self) -> Vec<Step> {
        vec![
            Step::op(CreateOrder::new(self.book.clone()))
                .with_args(vec![json!("Term Paper"), json!(24)]),
            Step::op(AddOffer::new(self.book.clone()))
                .with_resolver(|prev| vec![prev.cloned().unwrap_or(Value::Null), json!(501)]),
            Step::op(AcceptOffer::new(self.book.clone()))
                .with_resolver(|prev| vec![id_of(prev), json!(501)]),
            Step::op(HideOrder::new(self.book.clone())).with_resolver(|prev| vec![id_of(prev)]),
        ]
    }
}

/// Price quote composed as a pipe: each stage hands one value to the next.
pub fn quote_pipe() -> Pipe {
    Pipe::new()
        .then(op!("base_price", |args: Vec<Value>| async move {
            let pages = args.first().and_then(Value::as_u64).unwrap_or(0);
            Ok::<_, OpError>(json!(pages * 8))
        }))
        .then(op!("rush_surcharge", |args: Vec<Value>| async move {
            let base = args.first().and_then(Value::as_u64).unwrap_or(0);
            Ok::<_, OpError>(json!(base + 15))
        }))
}

/// Pulls the `"id"` field out of an object result, for resolvers chaining on
/// operations that return more than a bare id.
fn id_of(prev: Option<&Value>) -> Value {
    prev.and_then(|value| value.get("id"))
        .cloned()
        .unwrap_or(Value::Null)
}

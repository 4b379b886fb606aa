//! # Order Pipeline Demo
//!
//! A worked example of driving the `baton-engine` orchestrator with a real
//! domain: an order book for written work, with offers and expert hires.
//!
//! ## 🚀 Core Components
//!
//! - **model**: Pure data structures ([`Order`](baton_sample::model::Order),
//!   [`Offer`](baton_sample::model::Offer)) and the domain error.
//! - **store**: The in-memory [`OrderBook`](baton_sample::store::OrderBook)
//!   all operations share.
//! - **ops**: [`Operation`](baton_engine::Operation) implementations over
//!   the book, one per domain verb.
//! - **flows**: The step sequences and registry wiring this binary runs.
//!
//! ## 📚 Quick Start
//!
//! The entry point is [`main`], which demonstrates:
//! 1.  Running ad-hoc steps that carry their own operations.
//! 2.  Running the same flow through a registry of named steps, with one
//!     step-level argument override.
//! 3.  An offer lifecycle chained entirely through resolvers.
//!
//! ## 🧪 Testing
//!
//! See [`baton_engine::mock`] for utilities to test flows without any
//! domain operations.

use baton_engine::tracing::setup_tracing;
use baton_engine::Orchestrator;
use baton_sample::flows::{quote_pipe, OrderFlows};
use baton_sample::store::OrderBook;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting order pipeline demo");

    let book = Arc::new(OrderBook::new());
    let flows = OrderFlows::new(book.clone());

    // Way one: ad-hoc steps, no registry
    let span = tracing::info_span!("adhoc_flow");
    async {
        let mut runner = Orchestrator::new();
        runner
            .run_sequence(flows.adhoc_steps())
            .await
            .map_err(|e| e.to_string())?;

        let report = serde_json::to_string(runner.history()).map_err(|e| e.to_string())?;
        info!(%report, "Ad-hoc flow finished");
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    // Way two: a registry of named steps, driven by key, with one override
    let span = tracing::info_span!("registry_flow");
    async {
        let mut runner = Orchestrator::with_registry(flows.registry());
        runner
            .run_sequence(flows.keyed_steps())
            .await
            .map_err(|e| e.to_string())?;

        let report = serde_json::to_string(runner.history()).map_err(|e| e.to_string())?;
        info!(%report, "Registry flow finished");
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    // Offer lifecycle on the same book; a failure here is reported, not fatal
    let span = tracing::info_span!("offer_flow");
    let offer_result = async {
        let mut runner = Orchestrator::new();
        runner.run_sequence(flows.offer_steps()).await?;
        Ok::<_, baton_engine::EngineError>(runner.last_result().cloned())
    }
    .instrument(span)
    .await;

    match offer_result {
        Ok(last) => info!(?last, "Offer flow finished"),
        Err(e) => error!(error = %e, "Offer flow failed"),
    }

    // A quote for a 10-page order, composed as a pipe
    let price = quote_pipe()
        .run(json!(10))
        .await
        .map_err(|e| e.to_string())?;
    info!(%price, "Quoted");

    info!(orders = book.len().await, "Demo completed");
    Ok(())
}

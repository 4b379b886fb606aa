//! # Domain Model
//!
//! Pure data structures for the order domain. Nothing here knows about the
//! engine; the operations in [`crate::ops`] translate between JSON argument
//! lists and these types.

mod offer;
mod order;

pub use offer::Offer;
pub use order::{HireRequest, Order, OrderId};

use thiserror::Error;

/// Errors that can occur while working the order book.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// The order has no offer from the given author.
    #[error("No offer on {order_id} from author {author_id}")]
    OfferNotFound { order_id: OrderId, author_id: u64 },

    /// An operation received an argument it could not interpret.
    #[error("Argument {index}: expected {expected}")]
    BadArgument { index: usize, expected: &'static str },
}

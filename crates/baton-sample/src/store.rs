//! # Order Book
//!
//! The in-memory store every operation works against. One [`OrderBook`] is
//! shared across all operations of a flow behind an `Arc`; a `tokio` mutex
//! keeps mutations atomic without blocking the runtime.
//!
//! Ids are handed out by a monotonic counter starting at 1, so the first
//! created order is always `order_1`. The book never reuses an id, even
//! after a delete.

use crate::model::{Offer, Order, OrderError, OrderId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

/// Shared in-memory order store.
pub struct OrderBook {
    orders: Mutex<HashMap<OrderId, Order>>,
    next_id: AtomicU64,
}

impl OrderBook {
    /// Empty book; the first created order gets id 1.
    pub fn new() -> Self {
        Self {
            orders: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Creates an order and returns it.
    pub async fn create(&self, title: String, pages: u64) -> Order {
        let id = OrderId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let order = Order {
            id: id.clone(),
            title,
            pages,
            hidden: false,
            offers: Vec::new(),
            expert_id: None,
        };
        self.orders.lock().await.insert(id, order.clone());
        debug!(order_id = %order.id, "Order stored");
        order
    }

    /// Replaces the order's title.
    pub async fn update_title(&self, id: OrderId, title: String) -> Result<Order, OrderError> {
        let mut orders = self.orders.lock().await;
        let order = orders
            .get_mut(&id)
            .ok_or(OrderError::NotFound(id.clone()))?;
        order.title = title;
        Ok(order.clone())
    }

    /// Takes the order off the public feed. It stays in the book.
    pub async fn hide(&self, id: OrderId) -> Result<Order, OrderError> {
        let mut orders = self.orders.lock().await;
        let order = orders
            .get_mut(&id)
            .ok_or(OrderError::NotFound(id.clone()))?;
        order.hidden = true;
        Ok(order.clone())
    }

    /// Removes the order entirely and returns its final state.
    pub async fn delete(&self, id: OrderId) -> Result<Order, OrderError> {
        self.orders
            .lock()
            .await
            .remove(&id)
            .ok_or(OrderError::NotFound(id))
    }

    /// Records a writer's offer on the order.
    pub async fn add_offer(&self, id: OrderId, author_id: u64) -> Result<Order, OrderError> {
        let mut orders = self.orders.lock().await;
        let order = orders
            .get_mut(&id)
            .ok_or(OrderError::NotFound(id.clone()))?;
        order.offers.push(Offer::new(author_id));
        Ok(order.clone())
    }

    /// Marks the author's offer as accepted.
    pub async fn accept_offer(&self, id: OrderId, author_id: u64) -> Result<Order, OrderError> {
        let mut orders = self.orders.lock().await;
        let order = orders
            .get_mut(&id)
            .ok_or(OrderError::NotFound(id.clone()))?;
        let offer = order
            .offers
            .iter_mut()
            .find(|offer| offer.author_id == author_id)
            .ok_or(OrderError::OfferNotFound {
                order_id: id.clone(),
                author_id,
            })?;
        offer.accepted = true;
        Ok(order.clone())
    }

    /// Assigns the author as the order's expert.
    pub async fn hire(&self, id: OrderId, author_id: u64) -> Result<Order, OrderError> {
        let mut orders = self.orders.lock().await;
        let order = orders.get_mut(&id).ok_or(OrderError::NotFound(id))?;
        order.expert_id = Some(author_id);
        Ok(order.clone())
    }

    /// Current state of an order, if it exists.
    pub async fn get(&self, id: &OrderId) -> Option<Order> {
        self.orders.lock().await.get(id).cloned()
    }

    /// Number of orders in the book, hidden ones included.
    pub async fn len(&self) -> usize {
        self.orders.lock().await.len()
    }

    /// Whether the book holds no orders.
    pub async fn is_empty(&self) -> bool {
        self.orders.lock().await.is_empty()
    }
}

impl Default for OrderBook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ids_are_sequential_and_never_reused() {
        let book = OrderBook::new();

        let first = book.create("First".into(), 1).await;
        let second = book.create("Second".into(), 2).await;
        assert_eq!(first.id, OrderId(1));
        assert_eq!(second.id, OrderId(2));

        book.delete(first.id).await.unwrap();
        let third = book.create("Third".into(), 3).await;
        assert_eq!(third.id, OrderId(3));
    }

    #[tokio::test]
    async fn test_accepting_a_missing_offer_fails() {
        let book = OrderBook::new();
        let order = book.create("Essay".into(), 5).await;

        let err = book.accept_offer(order.id.clone(), 42).await.unwrap_err();
        assert_eq!(
            err,
            OrderError::OfferNotFound {
                order_id: order.id,
                author_id: 42,
            }
        );
    }
}

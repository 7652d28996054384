//! Terminal delivery step.
//!
//! Stands in for the real transport. It accepts whatever reaches the end of
//! the chain and hands it back as confirmation.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use crate::pipeline::stage::Stage;
use crate::pipeline::types::Item;

#[derive(Debug, Default)]
pub struct RealDelivery {
    delivered: AtomicU64,
}

impl RealDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items delivered so far.
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }
}

impl Stage for RealDelivery {
    fn name(&self) -> &'static str {
        "delivery"
    }

    fn process(&self, item: Item) -> Item {
        self.delivered.fetch_add(1, Ordering::Relaxed);
        info!(
            kind = item.kind(),
            from = %item.sender(),
            to = %item.recipient(),
            "Item delivered"
        );
        item
    }
}

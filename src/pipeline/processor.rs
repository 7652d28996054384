//! Pipeline orchestrator — chains stages and hands off to delivery.
//!
//! Flow:
//! 1. Each configured stage runs in order, receiving the previous stage's
//!    output
//! 2. The terminal delivery step receives the last stage's output
//! 3. Whatever delivery returns goes back to the caller
//!
//! The stage list is fixed at construction. An empty list means the item
//! goes straight to delivery.

use std::sync::Arc;

use tracing::{debug, info};

use crate::pipeline::stage::Stage;
use crate::pipeline::types::Item;

pub struct Pipeline {
    stages: Vec<Arc<dyn Stage>>,
    terminal: Arc<dyn Stage>,
}

impl Pipeline {
    /// Create a pipeline from an ordered stage list and a terminal step.
    pub fn new(stages: Vec<Arc<dyn Stage>>, terminal: Arc<dyn Stage>) -> Self {
        Self { stages, terminal }
    }

    /// Names of the intermediate stages, in order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// The terminal delivery step.
    pub fn terminal(&self) -> &Arc<dyn Stage> {
        &self.terminal
    }

    /// Number of intermediate stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run one item through every stage, then deliver it.
    pub fn process(&self, item: Item) -> Item {
        debug!(
            kind = item.kind(),
            from = %item.sender(),
            to = %item.recipient(),
            stages = self.stages.len(),
            "Processing item"
        );

        let working = self.stages.iter().fold(item, |working, stage| {
            debug!(stage = stage.name(), kind = working.kind(), "Stage hop");
            stage.process(working)
        });

        self.terminal.process(working)
    }

    /// Process a batch of items independently, in order.
    pub fn process_batch(&self, items: Vec<Item>) -> Vec<Item> {
        let count = items.len();
        info!(count, "Processing item batch");

        let results: Vec<Item> = items.into_iter().map(|item| self.process(item)).collect();

        info!(delivered = results.len(), "Batch processing complete");
        results
    }
}

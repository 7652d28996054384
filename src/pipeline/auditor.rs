//! Content inspection stage.
//!
//! Checks every package label against a fixed policy:
//! - label equal to a banned keyword → `ContentFault::Prohibited`
//! - label containing "stone" (any case) → `ContentFault::Substituted`
//!
//! Faults are reported to the fault sink and swallowed. The item always
//! continues downstream unchanged, and messages are never inspected.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::debug;

use crate::error::ContentFault;
use crate::pipeline::sink::{FaultReport, FaultSink, TracingSink};
use crate::pipeline::stage::Stage;
use crate::pipeline::types::Item;

/// Banned weapons keyword.
pub const WEAPONS: &str = "weapons";

/// Banned substance keyword.
pub const BANNED_SUBSTANCE: &str = "banned substance";

/// ASCII-only case folding, so look-alikes such as "ſtone" do not match.
static STONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i-u)stone").expect("stone pattern is a valid regex"));

pub struct Auditor {
    sink: Arc<dyn FaultSink>,
}

impl Auditor {
    /// Create an auditor that reports faults through `tracing`.
    pub fn new() -> Self {
        Self::with_sink(Arc::new(TracingSink))
    }

    /// Create an auditor reporting to a custom sink.
    pub fn with_sink(sink: Arc<dyn FaultSink>) -> Self {
        Self { sink }
    }

    /// Check one item against the content policy.
    ///
    /// Prohibited keywords win over the stone rule. Messages always pass.
    pub fn inspect(item: &Item) -> Option<ContentFault> {
        let label = &item.content()?.label;
        if label == WEAPONS || label == BANNED_SUBSTANCE {
            Some(ContentFault::Prohibited {
                label: label.clone(),
            })
        } else if STONE_PATTERN.is_match(label) {
            Some(ContentFault::Substituted {
                label: label.clone(),
            })
        } else {
            None
        }
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new()
    }
}

impl Stage for Auditor {
    fn name(&self) -> &'static str {
        "auditor"
    }

    fn process(&self, item: Item) -> Item {
        match Self::inspect(&item) {
            Some(fault) => self.sink.report(&FaultReport::new(fault, &item)),
            None => debug!(
                kind = item.kind(),
                from = %item.sender(),
                to = %item.recipient(),
                "Item passed inspection"
            ),
        }
        item
    }
}

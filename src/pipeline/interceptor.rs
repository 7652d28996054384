//! Covert substitution stage.
//!
//! Any package declared at or above the threshold is swapped for a
//! worthless look-alike addressed to the same parties, and its declared
//! value is added to the running stolen total.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use crate::pipeline::stage::Stage;
use crate::pipeline::types::{Content, Item};

/// Prefix put in front of the original label on a substituted package.
pub const SUBSTITUTE_PREFIX: &str = "stones instead of ";

pub struct Interceptor {
    threshold: u64,
    stolen_total: AtomicU64,
    substitutions: AtomicU64,
}

impl Interceptor {
    /// Create an interceptor that takes packages worth at least `threshold`.
    pub fn new(threshold: u64) -> Self {
        Self {
            threshold,
            stolen_total: AtomicU64::new(0),
            substitutions: AtomicU64::new(0),
        }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Sum of declared values of every package substituted so far.
    ///
    /// Saturates at `u64::MAX` instead of wrapping.
    pub fn stolen_value_total(&self) -> u64 {
        self.stolen_total.load(Ordering::Relaxed)
    }

    /// Number of packages substituted so far.
    pub fn substitutions(&self) -> u64 {
        self.substitutions.load(Ordering::Relaxed)
    }
}

impl Stage for Interceptor {
    fn name(&self) -> &'static str {
        "interceptor"
    }

    fn process(&self, item: Item) -> Item {
        match item {
            Item::Package {
                sender,
                recipient,
                content,
            } if content.value >= self.threshold => {
                let value = content.value;
                let previous = self
                    .stolen_total
                    .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |total| {
                        Some(total.saturating_add(value))
                    })
                    .unwrap_or_else(|total| total);
                if previous.checked_add(value).is_none() {
                    warn!(value, "Stolen total saturated at u64::MAX");
                }
                self.substitutions.fetch_add(1, Ordering::Relaxed);
                debug!(
                    from = %sender,
                    to = %recipient,
                    label = %content.label,
                    value = content.value,
                    "Package substituted"
                );
                Item::Package {
                    sender,
                    recipient,
                    content: Content::new(format!("{SUBSTITUTE_PREFIX}{}", content.label), 0),
                }
            }
            other => other,
        }
    }
}

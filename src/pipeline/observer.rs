//! Covert surveillance stage.
//!
//! Reads every message that passes through and records who wrote to whom.
//! Correspondence touching a watchlisted party is recorded at high severity
//! with the full body; everything else at low severity with parties only.
//! Packages are skipped unless package observation is switched on, in which
//! case their label is recorded on both paths and the body stays empty.
//! The item itself is always passed on untouched.

use std::sync::Arc;

use chrono::Utc;

use crate::pipeline::sink::{Observation, ObservationSink, Severity};
use crate::pipeline::stage::Stage;
use crate::pipeline::types::Item;

/// Default watchlisted identifier.
pub const AUSTIN_POWERS: &str = "Austin Powers";

pub struct Observer {
    sink: Arc<dyn ObservationSink>,
    watchlist: Vec<String>,
    observe_packages: bool,
}

impl Observer {
    /// Create an observer watching the default target.
    pub fn new(sink: Arc<dyn ObservationSink>) -> Self {
        Self::with_watchlist(sink, vec![AUSTIN_POWERS.to_string()])
    }

    /// Create an observer with a custom watchlist.
    pub fn with_watchlist(sink: Arc<dyn ObservationSink>, watchlist: Vec<String>) -> Self {
        Self {
            sink,
            watchlist,
            observe_packages: false,
        }
    }

    /// Also record packages, capturing their label.
    pub fn observing_packages(mut self, enabled: bool) -> Self {
        self.observe_packages = enabled;
        self
    }

    pub fn watchlist(&self) -> &[String] {
        &self.watchlist
    }

    fn is_watched(&self, item: &Item) -> bool {
        self.watchlist
            .iter()
            .any(|target| target == item.sender() || target == item.recipient())
    }

    fn observe(&self, item: &Item) -> Option<Observation> {
        let (body, label) = match item {
            Item::Message { body, .. } => (Some(body), None),
            Item::Package { content, .. } if self.observe_packages => (None, Some(&content.label)),
            Item::Package { .. } => return None,
        };

        let severity = if self.is_watched(item) {
            Severity::High
        } else {
            Severity::Low
        };

        Some(Observation {
            severity,
            kind: item.kind().to_string(),
            sender: item.sender().to_string(),
            recipient: item.recipient().to_string(),
            body: body.filter(|_| severity == Severity::High).cloned(),
            label: label.cloned(),
            observed_at: Utc::now(),
        })
    }
}

impl Stage for Observer {
    fn name(&self) -> &'static str {
        "observer"
    }

    fn process(&self, item: Item) -> Item {
        if let Some(observation) = self.observe(&item) {
            self.sink.record(&observation);
        }
        item
    }
}

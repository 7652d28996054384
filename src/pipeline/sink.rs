//! Destinations for what the covert stages see.
//!
//! The observer writes `Observation`s, the auditor writes `FaultReport`s.
//! `TracingSink` forwards both to `tracing`; `MemorySink` keeps them in
//! memory so callers can read back what was recorded.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::ContentFault;
use crate::pipeline::types::Item;

// ── Observation ─────────────────────────────────────────────────────

/// How interesting an observed item was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Ordinary correspondence; parties only.
    Low,
    /// A watchlisted party is involved; full details captured.
    High,
}

/// One record written by the observer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub severity: Severity,
    /// "message" or "package".
    pub kind: String,
    pub sender: String,
    pub recipient: String,
    /// Message body. Only captured on the high path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Package label. Captured for packages on both paths.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub observed_at: DateTime<Utc>,
}

/// Receives observations.
pub trait ObservationSink: Send + Sync {
    fn record(&self, observation: &Observation);
}

// ── Fault report ────────────────────────────────────────────────────

/// One content fault reported by the auditor.
#[derive(Debug, Clone)]
pub struct FaultReport {
    pub fault: ContentFault,
    pub sender: String,
    pub recipient: String,
    pub detected_at: DateTime<Utc>,
}

impl FaultReport {
    pub fn new(fault: ContentFault, item: &Item) -> Self {
        Self {
            fault,
            sender: item.sender().to_string(),
            recipient: item.recipient().to_string(),
            detected_at: Utc::now(),
        }
    }
}

/// Receives fault reports.
pub trait FaultSink: Send + Sync {
    fn report(&self, report: &FaultReport);
}

// ── Tracing sink ────────────────────────────────────────────────────

/// Forwards observations and faults to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ObservationSink for TracingSink {
    fn record(&self, observation: &Observation) {
        match observation.severity {
            Severity::High => warn!(
                kind = %observation.kind,
                from = %observation.sender,
                to = %observation.recipient,
                body = observation.body.as_deref().unwrap_or_default(),
                label = observation.label.as_deref().unwrap_or_default(),
                "Detected target mail correspondence"
            ),
            Severity::Low => info!(
                kind = %observation.kind,
                from = %observation.sender,
                to = %observation.recipient,
                label = observation.label.as_deref().unwrap_or_default(),
                "Usual correspondence"
            ),
        }
    }
}

impl FaultSink for TracingSink {
    fn report(&self, report: &FaultReport) {
        match &report.fault {
            ContentFault::Prohibited { label } => error!(
                fault = report.fault.label(),
                label = %label,
                from = %report.sender,
                to = %report.recipient,
                "Package holds prohibited content"
            ),
            ContentFault::Substituted { label } => warn!(
                fault = report.fault.label(),
                label = %label,
                from = %report.sender,
                to = %report.recipient,
                "Package contents were substituted"
            ),
        }
    }
}

// ── Memory sink ─────────────────────────────────────────────────────

/// Keeps every record in memory. Appends are mutex-guarded.
#[derive(Debug, Default)]
pub struct MemorySink {
    observations: Mutex<Vec<Observation>>,
    faults: Mutex<Vec<FaultReport>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded observations, oldest first.
    pub fn observations(&self) -> Vec<Observation> {
        self.observations
            .lock()
            .map(|v| v.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Snapshot of reported faults, oldest first.
    pub fn faults(&self) -> Vec<FaultReport> {
        self.faults
            .lock()
            .map(|v| v.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl ObservationSink for MemorySink {
    fn record(&self, observation: &Observation) {
        let mut guard = self
            .observations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.push(observation.clone());
    }
}

impl FaultSink for MemorySink {
    fn report(&self, report: &FaultReport) {
        let mut guard = self
            .faults
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.push(report.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::Content;

    fn observation(severity: Severity) -> Observation {
        Observation {
            severity,
            kind: "message".into(),
            sender: "alice".into(),
            recipient: "bob".into(),
            body: None,
            label: None,
            observed_at: Utc::now(),
        }
    }

    #[test]
    fn memory_sink_keeps_order() {
        let sink = MemorySink::new();
        sink.record(&observation(Severity::Low));
        sink.record(&observation(Severity::High));

        let recorded = sink.observations();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].severity, Severity::Low);
        assert_eq!(recorded[1].severity, Severity::High);
        assert!(sink.faults().is_empty());
    }

    #[test]
    fn fault_report_copies_parties() {
        let item = Item::package("alice", "bob", Content::new("weapons", 1)).unwrap();
        let report = FaultReport::new(
            ContentFault::Prohibited {
                label: "weapons".into(),
            },
            &item,
        );
        assert_eq!(report.sender, "alice");
        assert_eq!(report.recipient, "bob");

        let sink = MemorySink::new();
        sink.report(&report);
        assert_eq!(sink.faults().len(), 1);
        assert_eq!(sink.faults()[0].fault.label(), "prohibited");
    }

    #[test]
    fn observation_serialization_omits_missing_body() {
        let json = serde_json::to_value(observation(Severity::Low)).unwrap();
        assert_eq!(json["severity"], "low");
        assert!(json.get("body").is_none());
        assert!(json.get("label").is_none());
    }

    #[test]
    fn tracing_sink_accepts_everything() {
        let sink = TracingSink;
        sink.record(&observation(Severity::High));
        sink.record(&observation(Severity::Low));
        let item = Item::package("alice", "bob", Content::new("stones", 0)).unwrap();
        sink.report(&FaultReport::new(
            ContentFault::Substituted {
                label: "stones".into(),
            },
            &item,
        ));
    }
}

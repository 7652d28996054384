//! Configuration types.

use std::sync::Arc;

use crate::error::ConfigError;
use crate::pipeline::observer::AUSTIN_POWERS;
use crate::pipeline::sink::{FaultSink, ObservationSink, TracingSink};
use crate::pipeline::{Auditor, Interceptor, Observer, Pipeline, RealDelivery, Stage};

const WATCHLIST_VAR: &str = "MAILROOM_WATCHLIST";
const THRESHOLD_VAR: &str = "MAILROOM_THEFT_THRESHOLD";
const OBSERVE_PACKAGES_VAR: &str = "MAILROOM_OBSERVE_PACKAGES";

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Identifiers the observer flags at high severity.
    pub watchlist: Vec<String>,
    /// Minimum declared value the interceptor takes.
    pub theft_threshold: u64,
    /// Whether the observer also records packages.
    pub observe_packages: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            watchlist: vec![AUSTIN_POWERS.to_string()],
            theft_threshold: 0,
            observe_packages: false,
        }
    }
}

/// The standard chain plus handles to its stateful stages.
pub struct Mailroom {
    pub pipeline: Pipeline,
    pub interceptor: Arc<Interceptor>,
    pub delivery: Arc<RealDelivery>,
}

impl PipelineConfig {
    /// Load from `MAILROOM_*` environment variables, defaulting unset ones.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(WATCHLIST_VAR) {
            config.watchlist = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(raw) = lookup(THRESHOLD_VAR) {
            config.theft_threshold = raw.trim().parse::<u64>().map_err(|e| {
                ConfigError::InvalidValue {
                    key: THRESHOLD_VAR.to_string(),
                    message: format!("{raw:?}: {e}"),
                }
            })?;
        }

        if let Some(raw) = lookup(OBSERVE_PACKAGES_VAR) {
            config.observe_packages = match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: OBSERVE_PACKAGES_VAR.to_string(),
                        message: format!("{raw:?}: expected true/false/1/0"),
                    });
                }
            };
        }

        Ok(config)
    }

    /// Build `[Observer, Interceptor, Auditor] → RealDelivery`, logging via `tracing`.
    pub fn build(&self) -> Mailroom {
        self.build_with_sinks(Arc::new(TracingSink), Arc::new(TracingSink))
    }

    /// Build the standard chain with custom sinks.
    pub fn build_with_sinks(
        &self,
        observations: Arc<dyn ObservationSink>,
        faults: Arc<dyn FaultSink>,
    ) -> Mailroom {
        let observer = Observer::with_watchlist(observations, self.watchlist.clone())
            .observing_packages(self.observe_packages);
        let interceptor = Arc::new(Interceptor::new(self.theft_threshold));
        let delivery = Arc::new(RealDelivery::new());

        let stages: Vec<Arc<dyn Stage>> = vec![
            Arc::new(observer),
            interceptor.clone(),
            Arc::new(Auditor::with_sink(faults)),
        ];

        Mailroom {
            pipeline: Pipeline::new(stages, delivery.clone()),
            interceptor,
            delivery,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = PipelineConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.watchlist, vec!["Austin Powers".to_string()]);
    }

    #[test]
    fn parses_all_vars() {
        let config = PipelineConfig::from_lookup(lookup(&[
            (WATCHLIST_VAR, "Dr. Evil, Number Two,,"),
            (THRESHOLD_VAR, " 100 "),
            (OBSERVE_PACKAGES_VAR, "TRUE"),
        ]))
        .unwrap();

        assert_eq!(config.watchlist, vec!["Dr. Evil", "Number Two"]);
        assert_eq!(config.theft_threshold, 100);
        assert!(config.observe_packages);
    }

    #[test]
    fn rejects_negative_threshold() {
        let err = PipelineConfig::from_lookup(lookup(&[(THRESHOLD_VAR, "-5")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == THRESHOLD_VAR));
    }

    #[test]
    fn rejects_bad_bool() {
        let err = PipelineConfig::from_lookup(lookup(&[(OBSERVE_PACKAGES_VAR, "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains(OBSERVE_PACKAGES_VAR));
    }

    #[test]
    fn builds_standard_chain() {
        let mailroom = PipelineConfig::default().build();
        assert_eq!(
            mailroom.pipeline.stage_names(),
            vec!["observer", "interceptor", "auditor"]
        );
        assert_eq!(mailroom.pipeline.terminal().name(), "delivery");
        assert_eq!(mailroom.interceptor.threshold(), 0);
        assert_eq!(mailroom.delivery.delivered(), 0);
    }
}

//! Configuration graph
//!
//! The materialized, validated configuration of the agent. Component
//! collections hold trait objects keyed by the user-chosen component id;
//! `BTreeMap` keeps ids in ascending order for every consumer.

pub mod component;

pub use component::{
    CombinedReceiver, Component, ConfigComponent, Kind, LoggingProcessor, LoggingReceiver,
    MetricsProcessor, MetricsReceiver, Module,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pipeline id whose presence means the user replaced the built-in pipeline.
pub const DEFAULT_PIPELINE: &str = "default_pipeline";

#[derive(Debug, Default)]
pub struct UnifiedConfig {
    pub combined: Option<Combined>,
    pub logging: Option<Logging>,
    pub metrics: Option<Metrics>,
    pub traces: Option<Traces>,
}

impl UnifiedConfig {
    pub fn has_logging(&self) -> bool {
        self.logging.is_some()
    }

    pub fn has_metrics(&self) -> bool {
        self.metrics.is_some()
    }

    pub fn has_combined(&self) -> bool {
        self.combined.is_some()
    }

    pub fn has_traces(&self) -> bool {
        self.traces.is_some()
    }

    /// Logging pipelines, `None` when the logging service is not configured.
    pub fn logging_pipelines(&self) -> Option<&BTreeMap<String, Pipeline>> {
        self.logging
            .as_ref()
            .and_then(|logging| logging.service.as_ref())
            .map(|service| &service.pipelines)
    }

    pub fn metrics_pipelines(&self) -> Option<&BTreeMap<String, Pipeline>> {
        self.metrics
            .as_ref()
            .and_then(|metrics| metrics.service.as_ref())
            .map(|service| &service.pipelines)
    }
}

#[derive(Debug, Default)]
pub struct Logging {
    pub receivers: BTreeMap<String, Box<dyn LoggingReceiver>>,
    pub processors: BTreeMap<String, Box<dyn LoggingProcessor>>,
    pub service: Option<LoggingService>,
}

#[derive(Debug, Default)]
pub struct Metrics {
    pub receivers: BTreeMap<String, Box<dyn MetricsReceiver>>,
    pub processors: BTreeMap<String, Box<dyn MetricsProcessor>>,
    pub service: Option<MetricsService>,
}

#[derive(Debug, Default)]
pub struct Combined {
    pub receivers: BTreeMap<String, Box<dyn CombinedReceiver>>,
}

#[derive(Debug, Default)]
pub struct Traces {
    pub service: Option<TracesService>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingService {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(default)]
    pub pipelines: BTreeMap<String, Pipeline>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsService {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    #[serde(default)]
    pub pipelines: BTreeMap<String, Pipeline>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracesService {
    #[serde(default)]
    pub pipelines: BTreeMap<String, Pipeline>,
}

/// Ordered chain of component ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline {
    #[serde(rename = "receivers", default)]
    pub receiver_ids: Vec<String>,
    #[serde(rename = "processors", default)]
    pub processor_ids: Vec<String>,
    #[serde(rename = "exporters", default, skip_serializing_if = "Vec::is_empty")]
    pub exporter_ids: Vec<String>,
}

impl Pipeline {
    pub fn with_receivers<I, S>(receiver_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            receiver_ids: receiver_ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

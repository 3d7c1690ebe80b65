//! Prometheus receiver
//!
//! The receiver embeds a Prometheus scrape configuration. Its usage is
//! reported through a custom extraction hook rather than the generic walk:
//! only a fixed set of scrape settings is reported, and counts replace the
//! contents of relabel rules and target groups.

use crate::model::{ConfigComponent, MetricsReceiver};
use crate::tracking::feature::{index_segment, ENABLED};
use crate::tracking::{CustomFeature, CustomFeatures, Field, Shape, Trackable};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const RESERVED_TARGET_LABELS: &[&str] = &["location", "namespace", "cluster"];

const SCRAPE_CONFIG_FEATURES: &[&str] = &[
    "scheme",
    "honor_timestamps",
    "scrape_interval",
    "scrape_timeout",
    "sample_limit",
    "label_limit",
    "label_name_length_limit",
    "label_value_length_limit",
    "body_size_limit",
    "relabel_configs",
    "metric_relabel_configs",
    "static_config_target_groups",
];

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scrape_interval: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scrape_timeout: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub evaluation_interval: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrometheusConfig {
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub scrape_configs: Vec<ScrapeConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    pub job_name: String,
    #[serde(default)]
    pub scheme: String,
    #[serde(default)]
    pub metrics_path: String,
    #[serde(default)]
    pub honor_labels: bool,
    #[serde(default = "default_true")]
    pub honor_timestamps: bool,
    #[serde(default)]
    pub scrape_interval: String,
    #[serde(default)]
    pub scrape_timeout: String,
    #[serde(default)]
    pub sample_limit: u64,
    #[serde(default)]
    pub target_limit: u64,
    #[serde(default)]
    pub label_limit: u64,
    #[serde(default)]
    pub label_name_length_limit: u64,
    #[serde(default)]
    pub label_value_length_limit: u64,
    #[serde(default)]
    pub body_size_limit: u64,
    #[serde(default)]
    pub relabel_configs: Vec<RelabelConfig>,
    #[serde(default)]
    pub metric_relabel_configs: Vec<RelabelConfig>,
    #[serde(default)]
    pub static_configs: Vec<StaticConfig>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            job_name: String::new(),
            scheme: String::new(),
            metrics_path: String::new(),
            honor_labels: false,
            honor_timestamps: true,
            scrape_interval: String::new(),
            scrape_timeout: String::new(),
            sample_limit: 0,
            target_limit: 0,
            label_limit: 0,
            label_name_length_limit: 0,
            label_value_length_limit: 0,
            body_size_limit: 0,
            relabel_configs: Vec::new(),
            metric_relabel_configs: Vec::new(),
            static_configs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelabelConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_labels: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub separator: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub regex: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target_label: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub replacement: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub action: String,
}

/// One target group of `static_configs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticConfig {
    pub targets: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl ScrapeConfig {
    /// Reportable settings in reporting order. Counts stand in for rule and
    /// target contents.
    fn tracked_settings(&self) -> [(&'static str, String); 12] {
        [
            ("scheme", self.scheme.clone()),
            ("honor_timestamps", self.honor_timestamps.to_string()),
            ("scrape_interval", self.scrape_interval.clone()),
            ("scrape_timeout", self.scrape_timeout.clone()),
            ("sample_limit", self.sample_limit.to_string()),
            ("label_limit", self.label_limit.to_string()),
            (
                "label_name_length_limit",
                self.label_name_length_limit.to_string(),
            ),
            (
                "label_value_length_limit",
                self.label_value_length_limit.to_string(),
            ),
            ("body_size_limit", self.body_size_limit.to_string()),
            ("relabel_configs", self.relabel_configs.len().to_string()),
            (
                "metric_relabel_configs",
                self.metric_relabel_configs.len().to_string(),
            ),
            (
                "static_config_target_groups",
                self.static_configs.len().to_string(),
            ),
        ]
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.honor_labels {
            bail!("honor_labels is not supported");
        }
        for rule in &self.relabel_configs {
            if RESERVED_TARGET_LABELS.contains(&rule.target_label.as_str()) {
                bail!("relabel_configs cannot rename location, namespace or cluster");
            }
        }
        for rule in &self.metric_relabel_configs {
            if rule.target_label == "__name__" {
                bail!("metric_relabel_configs cannot rename __name__");
            }
            if RESERVED_TARGET_LABELS.contains(&rule.target_label.as_str()) {
                bail!("metric_relabel_configs cannot rename location, namespace or cluster");
            }
        }
        Ok(())
    }
}

impl PrometheusConfig {
    /// Rejects settings the receiver cannot honor.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.scrape_configs.is_empty() {
            bail!("no Prometheus scrape_configs");
        }
        for scrape_config in &self.scrape_configs {
            scrape_config.validate().with_context(|| {
                format!(
                    "error validating scrape_config for job {}",
                    scrape_config.job_name
                )
            })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrometheusReceiver {
    #[serde(flatten)]
    pub config: ConfigComponent,
    #[serde(rename = "config", default)]
    pub prom_config: PrometheusConfig,
}

impl_component!(PrometheusReceiver, "prometheus", [MetricsReceiver]);

impl Trackable for PrometheusReceiver {
    // `config` is reported by the custom hook only
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(vec![Field::inline(&self.config)])
    }

    fn custom_features(&self) -> Option<&dyn CustomFeatures> {
        Some(self)
    }
}

impl CustomFeatures for PrometheusReceiver {
    fn extract_features(&self) -> anyhow::Result<Vec<CustomFeature>> {
        let mut features = vec![CustomFeature::new([ENABLED], "true")];

        for (i, scrape_config) in self.prom_config.scrape_configs.iter().enumerate() {
            for (name, value) in scrape_config.tracked_settings() {
                if value.is_empty() || value == "0" || value == "false" {
                    continue;
                }
                features.push(CustomFeature::new(
                    [
                        "config".to_string(),
                        index_segment(i),
                        "scrape_configs".to_string(),
                        name.to_string(),
                    ],
                    value,
                ));
            }
        }

        Ok(features)
    }

    fn list_all_features(&self) -> Vec<String> {
        std::iter::once(ENABLED.to_string())
            .chain(
                SCRAPE_CONFIG_FEATURES
                    .iter()
                    .map(|name| format!("config.[].scrape_configs.{}", name)),
            )
            .collect()
    }
}

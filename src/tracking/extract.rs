//! Feature extraction over a whole configuration

use super::error::TrackingError;
use super::feature::{index_segment, FeatureRecord};
use super::walker::walk_component;
use crate::config::TrackingConfig;
use crate::model::{Component, Kind, Module, Pipeline, UnifiedConfig, DEFAULT_PIPELINE};
use std::collections::BTreeMap;
use tracing::{debug, warn};

const PIPELINES_TYPE: &str = "pipelines";
const DEFAULT_PIPELINE_OVERRIDDEN: &str = "default_pipeline_overridden";

/// Extracts every feature record of `config`.
///
/// The two default-pipeline records come first (logging, then metrics),
/// followed by metrics receivers and processors, logging receivers and
/// processors, and combined receivers. Components are visited in ascending
/// id order. The first error aborts the extraction.
pub fn extract_features(config: &UnifiedConfig) -> Result<Vec<FeatureRecord>, TrackingError> {
    let mut features = default_pipeline_overrides(config);

    if let Some(metrics) = &config.metrics {
        features.extend(tracked_components(
            Module::Metrics,
            Kind::Receivers,
            &metrics.receivers,
        )?);
        features.extend(tracked_components(
            Module::Metrics,
            Kind::Processors,
            &metrics.processors,
        )?);
    }

    if let Some(logging) = &config.logging {
        features.extend(tracked_components(
            Module::Logging,
            Kind::Receivers,
            &logging.receivers,
        )?);
        features.extend(tracked_components(
            Module::Logging,
            Kind::Processors,
            &logging.processors,
        )?);
    }

    if let Some(combined) = &config.combined {
        features.extend(tracked_components(
            Module::Combined,
            Kind::Receivers,
            &combined.receivers,
        )?);
    }

    debug!(records = features.len(), "Extracted feature usage");
    Ok(features)
}

/// Extraction gated by the crate settings.
pub fn report_features(
    config: &UnifiedConfig,
    settings: &TrackingConfig,
) -> Result<Vec<FeatureRecord>, TrackingError> {
    if !settings.feature_tracking {
        warn!("Feature tracking disabled, no usage will be reported");
        return Ok(Vec::new());
    }
    extract_features(config)
}

/// One record per sub-agent telling whether the user defined a pipeline
/// named `default_pipeline`. Always logging first, then metrics.
pub fn default_pipeline_overrides(config: &UnifiedConfig) -> Vec<FeatureRecord> {
    let overridden = |pipelines: Option<&BTreeMap<String, Pipeline>>| {
        pipelines.map_or(false, |p| p.contains_key(DEFAULT_PIPELINE))
    };

    vec![
        pipeline_record(Module::Logging, overridden(config.logging_pipelines())),
        pipeline_record(Module::Metrics, overridden(config.metrics_pipelines())),
    ]
}

fn pipeline_record(module: Module, overridden: bool) -> FeatureRecord {
    FeatureRecord::template(module.as_str(), Kind::Service.as_str(), PIPELINES_TYPE)
        .child(DEFAULT_PIPELINE_OVERRIDDEN)
        .with_value(overridden.to_string())
}

fn tracked_components<C: Component + ?Sized>(
    module: Module,
    kind: Kind,
    components: &BTreeMap<String, Box<C>>,
) -> Result<Vec<FeatureRecord>, TrackingError> {
    let mut features = Vec::new();
    for (i, (id, component)) in components.iter().enumerate() {
        let template = FeatureRecord::template(
            module.as_str(),
            kind.as_str(),
            component.component_type(),
        )
        .child(index_segment(i));

        let records = walk_component(component.as_ref(), &template)?;
        debug!(
            module = %module,
            kind = %kind,
            id = %id,
            component_type = component.component_type(),
            records = records.len(),
            "Walked component"
        );
        features.extend(records);
    }
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Logging, Metrics, MetricsService};

    #[test]
    fn test_empty_config_has_two_records() {
        let features = extract_features(&UnifiedConfig::default()).unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].module, "logging");
        assert_eq!(features[1].module, "metrics");
        for feature in &features {
            assert_eq!(feature.kind, "service");
            assert_eq!(feature.component_type, "pipelines");
            assert_eq!(feature.key, vec!["default_pipeline_overridden"]);
            assert_eq!(feature.value, "false");
        }
    }

    #[test]
    fn test_metrics_default_pipeline_overridden() {
        let mut service = MetricsService::default();
        service.pipelines.insert(
            DEFAULT_PIPELINE.to_string(),
            Pipeline::with_receivers(["foo", "goo", "bar"]),
        );
        let config = UnifiedConfig {
            metrics: Some(Metrics {
                service: Some(service),
                ..Metrics::default()
            }),
            ..UnifiedConfig::default()
        };

        let features = default_pipeline_overrides(&config);
        assert_eq!(features[0].value, "false");
        assert_eq!(features[1].value, "true");
    }

    #[test]
    fn test_logging_without_service() {
        let config = UnifiedConfig {
            logging: Some(Logging::default()),
            ..UnifiedConfig::default()
        };
        let features = default_pipeline_overrides(&config);
        assert_eq!(features[0].value, "false");
    }

    #[test]
    fn test_report_features_disabled() {
        let settings = TrackingConfig {
            feature_tracking: false,
            log_level: "info".to_string(),
            log_json: false,
        };
        let features = report_features(&UnifiedConfig::default(), &settings).unwrap();
        assert!(features.is_empty());
    }

    #[test]
    fn test_report_features_enabled() {
        let settings = TrackingConfig {
            feature_tracking: true,
            log_level: "info".to_string(),
            log_json: false,
        };
        let features = report_features(&UnifiedConfig::default(), &settings).unwrap();
        assert_eq!(features.len(), 2);
    }
}

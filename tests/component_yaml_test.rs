//! End-to-end tests over the built-in component types
//!
//! Components are decoded from YAML snippets, assembled into a
//! configuration, and run through extraction, the catalog and the
//! enabled-receiver counts.

use agentconf::components::{
    ComponentRegistry, ExcludeLogsProcessor, FilesReceiver, HostmetricsReceiver,
    ModifyFieldsProcessor, OtlpReceiver, PrometheusReceiver, WindowsEventLogReceiver,
};
use agentconf::model::{
    Combined, Kind, Logging, LoggingService, Metrics, MetricsService, Module, Pipeline,
    UnifiedConfig,
};
use agentconf::tracking::{extract_features, list_all_features, report_features, FeatureRecord};
use agentconf::usage::count_enabled_receivers;
use agentconf::TrackingConfig;

const FILES: &str = r#"
type: files
include_paths: [/var/log/app/*.log, /var/log/other.log]
exclude_paths: [/var/log/app/debug.log]
record_log_file_path: true
"#;

const WINDOWS: &str = r#"
type: windows_event_log
channels: [System, Application]
receiver_version: "2"
render_as_xml: true
"#;

const MODIFY_FIELDS: &str = r#"
type: modify_fields
fields:
  labels.env:
    static_value: production
  severity:
    move_from: jsonPayload.level
    map_values:
      W: WARNING
      E: ERROR
"#;

const EXCLUDE_LOGS: &str = r#"
type: exclude_logs
match_any: ['severity = "DEBUG"']
"#;

const HOSTMETRICS: &str = r#"
type: hostmetrics
collection_interval: 30s
"#;

const PROMETHEUS: &str = r#"
type: prometheus
config:
  scrape_configs:
    - job_name: node
      scrape_interval: 15s
      static_configs:
        - targets: [localhost:9100]
"#;

const OTLP: &str = r#"
type: otlp
grpc_endpoint: 0.0.0.0:4317
metrics_mode: googlecloudmonitoring
"#;

fn config() -> UnifiedConfig {
    let files: FilesReceiver = serde_yaml::from_str(FILES).unwrap();
    let windows: WindowsEventLogReceiver = serde_yaml::from_str(WINDOWS).unwrap();
    let modify: ModifyFieldsProcessor = serde_yaml::from_str(MODIFY_FIELDS).unwrap();
    let exclude: ExcludeLogsProcessor = serde_yaml::from_str(EXCLUDE_LOGS).unwrap();
    let hostmetrics: HostmetricsReceiver = serde_yaml::from_str(HOSTMETRICS).unwrap();
    let prometheus: PrometheusReceiver = serde_yaml::from_str(PROMETHEUS).unwrap();
    let otlp: OtlpReceiver = serde_yaml::from_str(OTLP).unwrap();

    let mut logging = Logging::default();
    logging.receivers.insert("app".into(), Box::new(files));
    logging.receivers.insert("windows".into(), Box::new(windows));
    logging.processors.insert("modify".into(), Box::new(modify));
    logging.processors.insert("drop_debug".into(), Box::new(exclude));
    let mut logging_service = LoggingService::default();
    logging_service.pipelines.insert(
        "app".into(),
        Pipeline {
            receiver_ids: vec!["app".into(), "windows".into()],
            processor_ids: vec!["modify".into(), "drop_debug".into()],
            exporter_ids: Vec::new(),
        },
    );
    logging.service = Some(logging_service);

    let mut metrics = Metrics::default();
    metrics.receivers.insert("hostmetrics".into(), Box::new(hostmetrics));
    metrics.receivers.insert("prometheus".into(), Box::new(prometheus));
    let mut metrics_service = MetricsService::default();
    metrics_service.pipelines.insert(
        "default_pipeline".into(),
        Pipeline::with_receivers(["hostmetrics", "prometheus", "otlp"]),
    );
    metrics.service = Some(metrics_service);

    let mut combined = Combined::default();
    combined.receivers.insert("otlp".into(), Box::new(otlp));

    UnifiedConfig {
        combined: Some(combined),
        logging: Some(logging),
        metrics: Some(metrics),
        traces: None,
    }
}

fn rendered(features: &[FeatureRecord]) -> Vec<String> {
    features.iter().map(ToString::to_string).collect()
}

#[test]
fn test_extract_from_yaml_components() {
    let features = extract_features(&config()).unwrap();

    let expected = vec![
        "logging/service:pipelines default_pipeline_overridden=false",
        "metrics/service:pipelines default_pipeline_overridden=true",
        "metrics/receivers:hostmetrics [0].enabled=true",
        "metrics/receivers:prometheus [1].enabled=true",
        "metrics/receivers:prometheus [1].config.[0].scrape_configs.honor_timestamps=true",
        "metrics/receivers:prometheus [1].config.[0].scrape_configs.scrape_interval=15s",
        "metrics/receivers:prometheus [1].config.[0].scrape_configs.static_config_target_groups=1",
        "logging/receivers:files [0].enabled=true",
        "logging/receivers:files [0].include_paths.__length=2",
        "logging/receivers:files [0].exclude_paths.__length=1",
        "logging/receivers:files [0].record_log_file_path=true",
        "logging/receivers:windows_event_log [1].enabled=true",
        "logging/receivers:windows_event_log [1].channels.__length=2",
        "logging/receivers:windows_event_log [1].receiver_version=2",
        "logging/receivers:windows_event_log [1].render_as_xml=true",
        "logging/processors:exclude_logs [0].enabled=true",
        "logging/processors:exclude_logs [0].match_any.__length=1",
        "logging/processors:modify_fields [1].enabled=true",
        "logging/processors:modify_fields [1].fields.__length=2",
        "logging/processors:modify_fields [1].fields.[1].map_values.__length=2",
        "combined/receivers:otlp [0].enabled=true",
        "combined/receivers:otlp [0].grpc_endpoint=endpoint",
        "combined/receivers:otlp [0].metrics_mode=googlecloudmonitoring",
    ];
    assert_eq!(rendered(&features), expected);
}

#[test]
fn test_no_literal_leaks() {
    let features = extract_features(&config()).unwrap();
    for feature in &features {
        for secret in ["/var/log", "0.0.0.0", "production", "jsonPayload", "localhost", "DEBUG"] {
            assert!(
                !feature.value.contains(secret) && !feature.joined_key().contains(secret),
                "{} leaks {}",
                feature,
                secret
            );
        }
    }
}

#[test]
fn test_record_json_shape() {
    let features = extract_features(&config()).unwrap();
    let json = serde_json::to_value(&features[2]).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "module": "metrics",
            "kind": "receivers",
            "type": "hostmetrics",
            "key": ["[0]", "enabled"],
            "value": "true",
        })
    );

    let labels = features[2].labels();
    assert_eq!(labels["feature"], "receivers:hostmetrics");
    assert_eq!(labels["key"], "[0].enabled");
}

#[test]
fn test_report_features_disabled() {
    let settings = TrackingConfig {
        feature_tracking: false,
        log_level: "info".into(),
        log_json: false,
    };
    assert!(report_features(&config(), &settings).unwrap().is_empty());

    let settings = TrackingConfig {
        feature_tracking: true,
        ..settings
    };
    assert_eq!(
        report_features(&config(), &settings).unwrap(),
        extract_features(&config()).unwrap()
    );
}

#[test]
fn test_enabled_receivers() {
    let enabled = count_enabled_receivers(&config()).unwrap();

    assert_eq!(enabled.logs_receiver_counts_by_type.len(), 2);
    assert_eq!(enabled.logs_receiver_counts_by_type["files"], 1);
    assert_eq!(enabled.logs_receiver_counts_by_type["windows_event_log"], 1);
    assert_eq!(enabled.metrics_receiver_counts_by_type["hostmetrics"], 1);
    assert_eq!(enabled.metrics_receiver_counts_by_type["prometheus"], 1);
    assert_eq!(enabled.metrics_receiver_counts_by_type["otlp"], 1);
}

#[test]
fn test_catalog_covers_default_types() {
    let registry = ComponentRegistry::with_defaults();
    let catalog = list_all_features(&registry);

    for (module, kind, component_type) in registry.types() {
        assert!(
            catalog.iter().any(|entry| entry.module == module
                && entry.kind == kind
                && entry.component_type == component_type
                && entry.field == "enabled"),
            "{}/{}:{} missing from catalog",
            module,
            kind,
            component_type
        );
    }

    assert!(catalog.iter().any(|entry| entry.module == Module::Metrics
        && entry.kind == Kind::Receivers
        && entry.field == "config.[].scrape_configs.scrape_interval"));
    assert!(!catalog
        .iter()
        .any(|entry| entry.field == "transformation_test" || entry.field == "disable_gpu_metrics"));
}

#[test]
fn test_registry_instances_extract() {
    let registry = ComponentRegistry::with_defaults();
    let component = registry
        .create(Module::Logging, Kind::Receivers, "files")
        .unwrap();
    let template = FeatureRecord::template("logging", "receivers", component.component_type())
        .child("[0]");
    let records = agentconf::tracking::walk_component(component.as_ref(), &template).unwrap();
    assert_eq!(rendered(&records), vec!["logging/receivers:files [0].enabled=true"]);
}

//! Receivers shared by the logging and metrics sub-agents

use crate::model::{CombinedReceiver, ConfigComponent, MetricsReceiver};
use crate::tracking::{Field, Shape, Trackable};
use serde::{Deserialize, Serialize};

/// OTLP receiver. The endpoint is reported as a fixed marker, never literally.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtlpReceiver {
    #[serde(flatten)]
    pub config: ConfigComponent,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub grpc_endpoint: String,
    /// `googlecloudmonitoring` or `googlemanagedprometheus`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub metrics_mode: String,
}

impl_component!(OtlpReceiver, "otlp", [MetricsReceiver, CombinedReceiver]);

impl Trackable for OtlpReceiver {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(vec![
            Field::inline(&self.config),
            Field::named("grpc_endpoint", &self.grpc_endpoint).override_with("endpoint"),
            Field::named("metrics_mode", &self.metrics_mode).tracked(),
        ])
    }
}

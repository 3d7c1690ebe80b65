//! Metrics receivers

use crate::model::{ConfigComponent, MetricsReceiver};
use crate::tracking::{Field, Shape, Trackable};
use serde::{Deserialize, Serialize};

/// Default collection interval applied when none is configured.
pub const DEFAULT_COLLECTION_INTERVAL: &str = "60s";

/// Settings shared by every metrics receiver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsReceiverShared {
    /// Duration string such as `30s`
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub collection_interval: String,
}

impl MetricsReceiverShared {
    pub fn collection_interval_or_default(&self) -> &str {
        if self.collection_interval.is_empty() {
            DEFAULT_COLLECTION_INTERVAL
        } else {
            &self.collection_interval
        }
    }
}

impl Trackable for MetricsReceiverShared {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(vec![Field::named(
            "collection_interval",
            &self.collection_interval,
        )])
    }
}

/// Host CPU, memory, disk, network and process metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostmetricsReceiver {
    #[serde(flatten)]
    pub config: ConfigComponent,
    #[serde(flatten)]
    pub shared: MetricsReceiverShared,
    /// Set by the platform, not by users
    #[serde(skip)]
    pub disable_gpu_metrics: bool,
}

impl_component!(HostmetricsReceiver, "hostmetrics", [MetricsReceiver]);

impl Trackable for HostmetricsReceiver {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(vec![
            Field::inline(&self.config),
            Field::inline(&self.shared),
            Field::named("disable_gpu_metrics", &self.disable_gpu_metrics).excluded(),
        ])
    }
}

use crate::model::{ConfigComponent, MetricsProcessor};
use crate::tracking::{Field, Shape, Trackable};
use serde::{Deserialize, Serialize};

/// Drops metrics whose type matches one of the prefix patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludeMetricsProcessor {
    #[serde(flatten)]
    pub config: ConfigComponent,
    #[serde(default)]
    pub metrics_pattern: Vec<String>,
}

impl_component!(ExcludeMetricsProcessor, "exclude_metrics", [MetricsProcessor]);

impl Trackable for ExcludeMetricsProcessor {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(vec![
            Field::inline(&self.config),
            Field::named("metrics_pattern", &self.metrics_pattern),
        ])
    }
}

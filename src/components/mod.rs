//! Concrete component types and their registry

/// Implements `Component` and the listed role traits for a component struct
/// with a `config: ConfigComponent` field, plus a `new()` constructor that
/// fills in the discriminator.
macro_rules! impl_component {
    ($ty:ty, $name:literal, [$($role:path),+ $(,)?]) => {
        impl $ty {
            pub const TYPE: &'static str = $name;

            pub fn new() -> Self {
                Self {
                    config: $crate::model::ConfigComponent::new($name),
                    ..Default::default()
                }
            }
        }

        impl $crate::model::Component for $ty {
            fn component_type(&self) -> &'static str {
                $name
            }
        }

        $(
            impl $role for $ty {}
        )+
    };
}

pub mod combined;
pub mod logging_processors;
pub mod logging_receivers;
pub mod metrics_processors;
pub mod metrics_receivers;
pub mod prometheus;
pub mod registry;

pub use combined::OtlpReceiver;
pub use logging_processors::{
    ExcludeLogsProcessor, ModifyField, ModifyFieldsProcessor, ParseJsonProcessor,
    ParseRegexProcessor, ParserShared,
};
pub use logging_receivers::{
    FilesReceiver, FluentForwardReceiver, SyslogReceiver, SystemdJournaldReceiver, TcpReceiver,
    WindowsEventLogReceiver,
};
pub use metrics_processors::ExcludeMetricsProcessor;
pub use metrics_receivers::{HostmetricsReceiver, MetricsReceiverShared};
pub use prometheus::{PrometheusConfig, PrometheusReceiver, RelabelConfig, ScrapeConfig, StaticConfig};
pub use registry::{ComponentRegistry, RegistryError};

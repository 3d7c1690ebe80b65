//! Component traits and the shared discriminator

use crate::tracking::{Field, Shape, Trackable};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

crate::define_name_enum! {
    /// Sub-agent a component belongs to
    Module {
        Logging => "logging",
        Metrics => "metrics",
        Combined => "combined",
    }
}

crate::define_name_enum! {
    /// Role of a component inside its sub-agent
    Kind {
        Receivers => "receivers",
        Processors => "processors",
        Service => "service",
    }
}

/// A type-discriminated configuration unit.
pub trait Component: Trackable + Debug + Send + Sync {
    /// Registered type name, e.g. `files` or `hostmetrics`.
    fn component_type(&self) -> &'static str;
}

pub trait LoggingReceiver: Component {}

pub trait LoggingProcessor: Component {}

pub trait MetricsReceiver: Component {}

pub trait MetricsProcessor: Component {}

/// Receiver feeding both the logging and the metrics sub-agents.
pub trait CombinedReceiver: MetricsReceiver {}

/// Common part of every component: the `type` discriminator as written in
/// the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigComponent {
    #[serde(rename = "type")]
    pub component_type: String,
}

impl ConfigComponent {
    pub fn new(component_type: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
        }
    }
}

impl Trackable for ConfigComponent {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(vec![Field::discriminator("type", &self.component_type)])
    }
}

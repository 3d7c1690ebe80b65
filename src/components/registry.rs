//! Component type registry

use super::{
    ExcludeLogsProcessor, ExcludeMetricsProcessor, FilesReceiver, FluentForwardReceiver,
    HostmetricsReceiver, ModifyFieldsProcessor, OtlpReceiver, ParseJsonProcessor,
    ParseRegexProcessor, PrometheusReceiver, SyslogReceiver, SystemdJournaldReceiver,
    TcpReceiver, WindowsEventLogReceiver,
};
use crate::model::{Component, Kind, Module};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Builds a default instance of a registered component type.
pub type ComponentFactory = Arc<dyn Fn() -> Box<dyn Component> + Send + Sync>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("component type {component_type} already registered for {module} {kind}")]
    Duplicate {
        module: Module,
        kind: Kind,
        component_type: String,
    },
}

type TypeFactories = BTreeMap<&'static str, ComponentFactory>;

/// Registered component types, keyed by sub-agent and role, then type name
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    factories: BTreeMap<(Module, Kind), TypeFactories>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.insert(Module::Logging, Kind::Receivers, FilesReceiver::new);
        registry.insert(Module::Logging, Kind::Receivers, SyslogReceiver::new);
        registry.insert(Module::Logging, Kind::Receivers, TcpReceiver::new);
        registry.insert(Module::Logging, Kind::Receivers, FluentForwardReceiver::new);
        registry.insert(Module::Logging, Kind::Receivers, WindowsEventLogReceiver::new);
        registry.insert(Module::Logging, Kind::Receivers, SystemdJournaldReceiver::new);

        registry.insert(Module::Logging, Kind::Processors, ParseJsonProcessor::new);
        registry.insert(Module::Logging, Kind::Processors, ParseRegexProcessor::new);
        registry.insert(Module::Logging, Kind::Processors, ModifyFieldsProcessor::new);
        registry.insert(Module::Logging, Kind::Processors, ExcludeLogsProcessor::new);

        registry.insert(Module::Metrics, Kind::Receivers, HostmetricsReceiver::new);
        registry.insert(Module::Metrics, Kind::Receivers, PrometheusReceiver::new);
        registry.insert(Module::Metrics, Kind::Processors, ExcludeMetricsProcessor::new);

        registry.insert(Module::Combined, Kind::Receivers, OtlpReceiver::new);

        registry
    }

    /// Registers a component type. The type name is taken from a freshly
    /// built instance.
    pub fn register<T, F>(&mut self, module: Module, kind: Kind, build: F) -> Result<(), RegistryError>
    where
        T: Component + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let component_type = build().component_type();
        if self.contains(module, kind, component_type) {
            return Err(RegistryError::Duplicate {
                module,
                kind,
                component_type: component_type.to_string(),
            });
        }
        self.insert(module, kind, build);
        Ok(())
    }

    fn insert<T, F>(&mut self, module: Module, kind: Kind, build: F)
    where
        T: Component + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let component_type = build().component_type();
        debug!(%module, %kind, component_type, "Registered component type");
        let factory: ComponentFactory = Arc::new(move || -> Box<dyn Component> { Box::new(build()) });
        self.factories
            .entry((module, kind))
            .or_default()
            .insert(component_type, factory);
    }

    fn factory(&self, module: Module, kind: Kind, component_type: &str) -> Option<&ComponentFactory> {
        self.factories.get(&(module, kind))?.get(component_type)
    }

    pub fn contains(&self, module: Module, kind: Kind, component_type: &str) -> bool {
        self.factory(module, kind, component_type).is_some()
    }

    /// Default instance of a registered type
    pub fn create(&self, module: Module, kind: Kind, component_type: &str) -> Option<Box<dyn Component>> {
        self.factory(module, kind, component_type).map(|factory| factory())
    }

    fn entries(&self) -> impl Iterator<Item = (Module, Kind, &'static str, &ComponentFactory)> + '_ {
        self.factories.iter().flat_map(|((module, kind), types)| {
            types
                .iter()
                .map(move |(component_type, factory)| (*module, *kind, *component_type, factory))
        })
    }

    /// Registered types in (module, kind, type) order
    pub fn types(&self) -> impl Iterator<Item = (Module, Kind, &'static str)> + '_ {
        self.entries()
            .map(|(module, kind, component_type, _)| (module, kind, component_type))
    }

    /// Default instances of every registered type, in (module, kind, type) order
    pub fn instances(&self) -> impl Iterator<Item = (Module, Kind, Box<dyn Component>)> + '_ {
        self.entries()
            .map(|(module, kind, _, factory)| (module, kind, factory()))
    }

    pub fn len(&self) -> usize {
        self.factories.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ComponentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.types()).finish()
    }
}

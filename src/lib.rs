//! agentconf - configuration graph and feature-usage extraction for an
//! observability agent
//!
//! The agent is configured through a typed graph of receivers, processors
//! and pipelines for logs and metrics. This library holds that graph and
//! turns it into anonymized usage telemetry: which configuration knobs were
//! set, reported without leaking user-supplied literals.
//!
//! # Core Concepts
//!
//! - **Components**: type-discriminated configuration units (receivers,
//!   processors) grouped by sub-agent and keyed by a user-chosen id
//! - **Tracking metadata**: per-field declarations telling whether a field's
//!   usage is reported and with which value
//! - **Feature records**: flat `(module, kind, type, key, value)` facts
//!   produced by walking a configuration
//!
//! # Example Usage
//!
//! ```
//! use agentconf::components::FilesReceiver;
//! use agentconf::model::{Logging, UnifiedConfig};
//! use agentconf::tracking::extract_features;
//!
//! let mut logging = Logging::default();
//! logging.receivers.insert(
//!     "app".to_string(),
//!     Box::new(FilesReceiver {
//!         include_paths: vec!["/var/log/app.log".to_string()],
//!         ..FilesReceiver::new()
//!     }),
//! );
//! let config = UnifiedConfig {
//!     logging: Some(logging),
//!     ..UnifiedConfig::default()
//! };
//!
//! let features = extract_features(&config).unwrap();
//! for feature in &features {
//!     println!("{}", feature);
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`model`]: configuration graph and component traits
//! - [`components`]: concrete component types and their registry
//! - [`tracking`]: feature walker, extraction and catalog
//! - [`usage`]: enabled-receiver counts

#[macro_use]
mod macros;

pub mod components;
pub mod config;
pub mod model;
pub mod tracking;
pub mod usage;
pub mod util;

// Re-export key types for convenient access
pub use components::{ComponentRegistry, RegistryError};
pub use config::{ConfigError, TrackingConfig};
pub use model::{Component, Kind, Module, UnifiedConfig};
pub use tracking::{extract_features, report_features, FeatureRecord, TrackingError};
pub use usage::{count_enabled_receivers, EnabledReceivers, UsageError};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_agentconf() {
        assert_eq!(NAME, "agentconf");
    }
}

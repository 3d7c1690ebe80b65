//! Feature-usage extraction
//!
//! Configuration types declare, per field, whether their usage is reported
//! and with which value. [`extract_features`] walks a whole
//! [`UnifiedConfig`](crate::model::UnifiedConfig) and produces a flat,
//! deterministic list of [`FeatureRecord`]s:
//!
//! ```text
//! metrics/receivers:hostmetrics [0].enabled=true
//! logging/receivers:files [0].include_paths.__length=2
//! combined/receivers:otlp [0].grpc_endpoint=endpoint
//! ```
//!
//! Fields carrying user-supplied literals are either untracked (only their
//! presence shows up through container lengths) or tracked with an override
//! value that replaces the literal.

pub mod catalog;
pub mod error;
pub mod extract;
pub mod feature;
pub mod metadata;
pub mod shape;
pub mod walker;

pub use catalog::{list_all_features, list_component_features, CatalogEntry};
pub use error::TrackingError;
pub use extract::{default_pipeline_overrides, extract_features, report_features};
pub use feature::{CustomFeature, FeatureRecord};
pub use metadata::{FieldMetadata, FieldPath, Tracking};
pub use shape::{CustomFeatures, Field, IntWidth, Shape, Trackable};
pub use walker::{walk, walk_component};

//! Catalog of every reportable field per registered component type
//!
//! The catalog is computed from default instances, so it lists what a type
//! *could* report rather than what a given configuration does report.

use super::feature::ENABLED;
use super::shape::{Shape, Trackable};
use crate::components::ComponentRegistry;
use crate::model::{Kind, Module};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub module: Module,
    pub kind: Kind,
    #[serde(rename = "type")]
    pub component_type: String,
    /// Field path joined with `.`
    pub field: String,
    /// Fixed value reported instead of the literal, empty when none
    pub override_value: String,
}

impl fmt::Display for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}:{},{},{}",
            self.module, self.kind, self.component_type, self.field, self.override_value
        )
    }
}

/// Lists the reportable fields of every type in `registry`, sorted and
/// without duplicates.
pub fn list_all_features(registry: &ComponentRegistry) -> Vec<CatalogEntry> {
    let mut entries = Vec::new();

    for (module, kind, component) in registry.instances() {
        let component_type = component.component_type();
        for (field, override_value) in list_component_features(component.as_ref()) {
            entries.push(CatalogEntry {
                module,
                kind,
                component_type: component_type.to_string(),
                field,
                override_value,
            });
        }
    }

    entries.sort();
    entries.dedup();
    debug!(entries = entries.len(), "Built feature catalog");
    entries
}

/// Field paths and override values a single component can report.
pub fn list_component_features<T: Trackable + ?Sized>(component: &T) -> Vec<(String, String)> {
    if let Some(hook) = component.custom_features() {
        return hook
            .list_all_features()
            .into_iter()
            .map(|field| (field, String::new()))
            .collect();
    }

    let mut out = Vec::new();
    list_fields(component.shape(), &[], &mut out);
    out
}

fn list_fields(shape: Shape<'_>, path: &[String], out: &mut Vec<(String, String)>) {
    let Shape::Struct(fields) = shape.deref() else {
        return;
    };

    for field in fields {
        let metadata = &field.metadata;

        if field.is_discriminator {
            out.push((joined(path, Some(ENABLED)), "true".to_string()));
            continue;
        }
        if metadata.is_excluded {
            continue;
        }

        let mut field_path = path.to_vec();
        if !metadata.path_name.is_empty() {
            field_path.push(metadata.path_name.clone());
        }

        if let Some(hook) = field.value.custom_features() {
            for feature in hook.list_all_features() {
                out.push((joined(&field_path, Some(&feature)), String::new()));
            }
            continue;
        }

        let listed = (joined(&field_path, None), metadata.override_value.clone());
        match field.value.shape() {
            shape @ Shape::Struct(_) => {
                if metadata.has_tracking {
                    out.push(listed);
                }
                list_fields(shape, &field_path, out);
            }
            Shape::Map(mut entries) => {
                if !metadata.has_tracking {
                    continue;
                }
                out.push(listed);
                entries.sort_by(|a, b| a.0.cmp(b.0));
                for (key, value) in entries {
                    let mut entry_path = field_path.clone();
                    entry_path.push(key.to_string());
                    list_fields(value.shape(), &entry_path, out);
                }
            }
            Shape::Seq(_) | Shape::Str(_) => {
                if metadata.has_tracking {
                    out.push(listed);
                }
            }
            _ => out.push(listed),
        }
    }
}

fn joined(path: &[String], last: Option<&str>) -> String {
    path.iter()
        .map(String::as_str)
        .chain(last)
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{FilesReceiver, OtlpReceiver, PrometheusReceiver, WindowsEventLogReceiver};
    use crate::tracking::Field;
    use std::collections::BTreeMap;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(f, o)| (f.to_string(), o.to_string()))
            .collect()
    }

    #[test]
    fn test_files_receiver_catalog() {
        let features = list_component_features(&FilesReceiver::new());
        assert_eq!(
            features,
            pairs(&[
                ("enabled", "true"),
                ("exclude_paths", ""),
                ("wildcard_refresh_interval", ""),
                ("record_log_file_path", ""),
            ])
        );
    }

    #[test]
    fn test_tracked_strings_are_listed() {
        let features = list_component_features(&WindowsEventLogReceiver::new());
        assert_eq!(
            features,
            pairs(&[
                ("enabled", "true"),
                ("receiver_version", ""),
                ("render_as_xml", ""),
            ])
        );
    }

    #[test]
    fn test_override_value_is_listed() {
        let features = list_component_features(&OtlpReceiver::new());
        assert!(features.contains(&("grpc_endpoint".to_string(), "endpoint".to_string())));
        assert!(features.contains(&("metrics_mode".to_string(), String::new())));
    }

    #[test]
    fn test_custom_component_uses_hook() {
        let features = list_component_features(&PrometheusReceiver::new());
        assert_eq!(features.len(), 13);
        assert_eq!(features[0], ("enabled".to_string(), String::new()));
    }

    struct Nested {
        name: String,
        limit: i32,
    }

    impl Trackable for Nested {
        fn shape(&self) -> Shape<'_> {
            Shape::Struct(vec![
                Field::named("name", &self.name),
                Field::named("limit", &self.limit),
            ])
        }
    }

    struct Outer {
        inner: Nested,
        flattened: Nested,
        by_name: BTreeMap<String, Nested>,
        hidden: bool,
    }

    impl Trackable for Outer {
        fn shape(&self) -> Shape<'_> {
            Shape::Struct(vec![
                Field::named("inner", &self.inner),
                Field::inline(&self.flattened),
                Field::named("by_name", &self.by_name).tracked(),
                Field::named("hidden", &self.hidden).excluded(),
            ])
        }
    }

    #[test]
    fn test_nested_paths() {
        let mut by_name = BTreeMap::new();
        by_name.insert(
            "a".to_string(),
            Nested {
                name: String::new(),
                limit: 0,
            },
        );
        let outer = Outer {
            inner: Nested {
                name: String::new(),
                limit: 0,
            },
            flattened: Nested {
                name: String::new(),
                limit: 0,
            },
            by_name,
            hidden: true,
        };

        assert_eq!(
            list_component_features(&outer),
            pairs(&[
                ("inner.limit", ""),
                ("limit", ""),
                ("by_name", ""),
                ("by_name.a.limit", ""),
            ])
        );
    }

    #[test]
    fn test_registry_catalog_sorted() {
        let entries = list_all_features(&ComponentRegistry::with_defaults());
        let mut sorted = entries.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(entries, sorted);

        let enabled = entries.iter().filter(|e| e.field == "enabled").count();
        assert_eq!(enabled, ComponentRegistry::with_defaults().len());

        let otlp = entries
            .iter()
            .find(|e| e.component_type == "otlp" && e.field == "grpc_endpoint")
            .unwrap();
        assert_eq!(otlp.to_string(), "combined/receivers:otlp,grpc_endpoint,endpoint");
    }
}

//! Feature records and path composition

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Segment synthesized from a component's type discriminator.
pub const ENABLED: &str = "enabled";
/// Segment carrying the entry count of a map or sequence.
pub const LENGTH: &str = "__length";
/// Segment carrying a preserved map key.
pub const KEY: &str = "__key";

/// Positional segment for the i-th entry of a collection, e.g. `[0]`.
pub fn index_segment(i: usize) -> String {
    format!("[{}]", i)
}

/// One reportable fact about configuration usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Sub-agent the component belongs to: `logging`, `metrics` or `combined`
    pub module: String,
    /// `receivers`, `processors` or `service`
    pub kind: String,
    /// Component type as returned by `Component::component_type`
    #[serde(rename = "type")]
    pub component_type: String,
    pub key: Vec<String>,
    pub value: String,
}

impl FeatureRecord {
    /// Template for a component walk: module, kind and type are fixed, key and value empty.
    pub fn template(
        module: impl Into<String>,
        kind: impl Into<String>,
        component_type: impl Into<String>,
    ) -> Self {
        Self {
            module: module.into(),
            kind: kind.into(),
            component_type: component_type.into(),
            key: Vec::new(),
            value: String::new(),
        }
    }

    /// Copy of this record with `segments` appended to the key.
    pub fn extend<I, S>(&self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut record = self.clone();
        record.key.extend(segments.into_iter().map(Into::into));
        record
    }

    /// Copy of this record with one segment appended to the key.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut record = self.clone();
        record.key.push(segment.into());
        record
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Key segments joined with `.`
    pub fn joined_key(&self) -> String {
        self.key.join(".")
    }

    /// Label set shipped by the telemetry reporter for this record.
    pub fn labels(&self) -> BTreeMap<&'static str, String> {
        let mut labels = BTreeMap::new();
        labels.insert("module", self.module.clone());
        labels.insert("feature", format!("{}:{}", self.kind, self.component_type));
        labels.insert("key", self.joined_key());
        labels.insert("value", self.value.clone());
        labels
    }
}

impl fmt::Display for FeatureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}:{} {}={}",
            self.module,
            self.kind,
            self.component_type,
            self.joined_key(),
            self.value
        )
    }
}

/// Key/value pair produced by a component's custom extraction hook.
///
/// The walker prefixes `key` with the path of the component before turning
/// it into a [`FeatureRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFeature {
    pub key: Vec<String>,
    pub value: String,
}

impl CustomFeature {
    pub fn new<I, S>(key: I, value: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into_iter().map(Into::into).collect(),
            value: value.into(),
        }
    }
}

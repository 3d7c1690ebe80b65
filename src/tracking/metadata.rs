//! Per-field tracking metadata
//!
//! Every field of a trackable configuration type carries a [`FieldMetadata`]
//! describing how the walker treats it. Metadata is normally declared with
//! the typed builders on [`Field`](super::shape::Field); [`FieldMetadata::from_tags`]
//! accepts the annotation-string form (`tracking:"override,keys"`,
//! `yaml:"name,inline"`) for schemas that are still described that way.

/// Tracking annotation of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Tracking {
    /// No annotation. Only auto-tracked scalars are reported.
    #[default]
    Untracked,
    /// Field is reported. With an override the override replaces the literal value.
    Tracked {
        override_value: Option<String>,
        keep_keys: bool,
    },
    /// Field and all of its descendants are never reported.
    Excluded,
}

/// Structural annotation of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
    /// Field contributes its own path segment.
    Named(String),
    /// Fields of the nested struct are flattened into the parent path.
    Inline,
}

/// Metadata derived once per field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldMetadata {
    pub is_excluded: bool,
    pub is_inline: bool,
    pub has_tracking: bool,
    pub has_override: bool,
    pub keep_keys: bool,
    /// Externally visible path segment. Empty for the root and for inline fields.
    pub path_name: String,
    pub override_value: String,
}

impl FieldMetadata {
    /// Metadata of a component root: untracked, no path segment.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(path: FieldPath, tracking: Tracking) -> Self {
        let (path_name, is_inline) = match path {
            FieldPath::Named(name) => (name, false),
            FieldPath::Inline => (String::new(), true),
        };

        let mut metadata = Self {
            path_name,
            is_inline,
            ..Self::default()
        };

        match tracking {
            Tracking::Untracked => {}
            Tracking::Excluded => metadata.is_excluded = true,
            Tracking::Tracked {
                override_value,
                keep_keys,
            } => {
                metadata.has_tracking = true;
                metadata.keep_keys = keep_keys;
                if let Some(value) = override_value {
                    metadata.has_override = true;
                    metadata.override_value = value;
                }
            }
        }

        metadata
    }

    /// Untracked field with its own path segment.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(FieldPath::Named(name.into()), Tracking::Untracked)
    }

    /// Untracked inline field.
    pub fn inline() -> Self {
        Self::new(FieldPath::Inline, Tracking::Untracked)
    }

    /// Derives metadata from annotation strings.
    ///
    /// `tracking` is `None` when the field has no tracking annotation. An empty
    /// string marks the field tracked, a non-empty first segment is the override
    /// value, a second segment `keys` preserves map keys, and `-` excludes the
    /// field. `structural` is the path name, optionally followed by `,inline`.
    pub fn from_tags(tracking: Option<&str>, structural: &str) -> Self {
        let mut parts = structural.split(',');
        let name = parts.next().unwrap_or_default().to_string();
        let is_inline = parts.any(|part| part == "inline");

        let tracking = match tracking {
            None => Tracking::Untracked,
            Some("-") => Tracking::Excluded,
            Some(tag) => {
                let mut segments = tag.split(',');
                let override_value = segments
                    .next()
                    .filter(|value| !value.is_empty())
                    .map(str::to_string);
                let keep_keys = segments.next() == Some("keys");
                Tracking::Tracked {
                    override_value,
                    keep_keys,
                }
            }
        };

        let mut metadata = Self::new(FieldPath::Named(name), tracking);
        // `name,inline` keeps the name segment off the path like a bare inline does
        if is_inline {
            metadata.is_inline = true;
            metadata.path_name.clear();
        }
        metadata
    }

    pub fn tracked(mut self) -> Self {
        self.has_tracking = true;
        self
    }

    pub fn with_override(mut self, value: impl Into<String>) -> Self {
        self.has_tracking = true;
        self.has_override = true;
        self.override_value = value.into();
        self
    }

    pub fn with_keys(mut self) -> Self {
        self.keep_keys = true;
        self
    }

    pub fn excluded(mut self) -> Self {
        self.is_excluded = true;
        self
    }

    /// Copy with a different path segment, used for container entries.
    pub fn with_path_name(&self, path_name: impl Into<String>) -> Self {
        Self {
            path_name: path_name.into(),
            ..self.clone()
        }
    }
}

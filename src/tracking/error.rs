use thiserror::Error;

/// Feature extraction errors
///
/// `InlineStruct` and `OverrideStruct` mean a component type declares
/// contradictory field metadata. They abort the whole extraction.
#[derive(Debug, Error)]
pub enum TrackingError {
    /// Tracking declared on an inline struct
    #[error("cannot have tracking on inline struct at {path}")]
    InlineStruct { path: String },

    /// Struct tracked without an override value
    #[error("struct that has tracking must have an override value at {path}")]
    OverrideStruct { path: String },

    /// A component's custom extraction hook failed
    #[error("custom feature extraction failed for {component_type}")]
    CustomExtraction {
        component_type: String,
        #[source]
        source: anyhow::Error,
    },
}

//! Statically declared field tables
//!
//! Configuration types describe themselves to the walker by implementing
//! [`Trackable`]. A struct returns its fields in declaration order together
//! with their [`FieldMetadata`]; containers return their entries; scalars
//! return their value.
//!
//! ```
//! use agentconf::tracking::{Field, Shape, Trackable};
//!
//! struct Listener {
//!     host: String,
//!     port: u16,
//!     verbose: bool,
//! }
//!
//! impl Trackable for Listener {
//!     fn shape(&self) -> Shape<'_> {
//!         Shape::Struct(vec![
//!             Field::named("host", &self.host).override_with("host"),
//!             Field::named("port", &self.port).tracked(),
//!             Field::named("verbose", &self.verbose),
//!         ])
//!     }
//! }
//! ```

use super::feature::CustomFeature;
use super::metadata::FieldMetadata;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Width of a signed integer. Decides whether the value is auto-tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
    Isize,
}

impl IntWidth {
    pub fn is_auto_tracked(self) -> bool {
        !matches!(self, IntWidth::I16)
    }
}

/// Runtime shape of a trackable value.
pub enum Shape<'a> {
    /// Absent optional value
    Nil,
    Bool(bool),
    Int(IntWidth, i64),
    Uint(u64),
    Float(f64),
    Str(&'a str),
    /// Fields in declaration order
    Struct(Vec<Field<'a>>),
    /// Entries keyed by their map key, in any order
    Map(Vec<(&'a str, &'a dyn Trackable)>),
    Seq(Vec<&'a dyn Trackable>),
    /// Present optional or boxed value
    Ptr(&'a dyn Trackable),
}

impl<'a> Shape<'a> {
    /// Zero value check. A present pointer is never zero, an empty container is.
    pub fn is_zero(&self) -> bool {
        match self {
            Shape::Nil => true,
            Shape::Bool(value) => !value,
            Shape::Int(_, value) => *value == 0,
            Shape::Uint(value) => *value == 0,
            Shape::Float(value) => *value == 0.0,
            Shape::Str(value) => value.is_empty(),
            Shape::Struct(fields) => fields.iter().all(|field| field.value.shape().is_zero()),
            Shape::Map(entries) => entries.is_empty(),
            Shape::Seq(items) => items.is_empty(),
            Shape::Ptr(_) => false,
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self, Shape::Struct(_))
    }

    /// Follows `Ptr` links until a non-pointer shape is reached.
    pub fn deref(self) -> Shape<'a> {
        let mut shape = self;
        while let Shape::Ptr(inner) = shape {
            shape = inner.shape();
        }
        shape
    }
}

/// A value that can be walked for feature usage.
pub trait Trackable {
    fn shape(&self) -> Shape<'_>;

    /// Custom extraction hook. When present the walker reports only what the
    /// hook returns for this value and does not look at its shape.
    fn custom_features(&self) -> Option<&dyn CustomFeatures> {
        None
    }
}

/// Extraction hook for values whose usage does not follow the generic rules.
#[cfg_attr(test, mockall::automock)]
pub trait CustomFeatures {
    /// Features reported for this value. Keys are relative to the value's path.
    fn extract_features(&self) -> anyhow::Result<Vec<CustomFeature>>;

    /// Every feature path this value could report, for the feature catalog.
    fn list_all_features(&self) -> Vec<String>;
}

/// One entry of a struct's field table.
pub struct Field<'a> {
    pub value: &'a dyn Trackable,
    pub metadata: FieldMetadata,
    /// Field holds the component's type discriminator
    pub is_discriminator: bool,
}

impl<'a> Field<'a> {
    pub fn new(value: &'a dyn Trackable, metadata: FieldMetadata) -> Self {
        Self {
            value,
            metadata,
            is_discriminator: false,
        }
    }

    pub fn named(name: &str, value: &'a dyn Trackable) -> Self {
        Self::new(value, FieldMetadata::named(name))
    }

    pub fn inline(value: &'a dyn Trackable) -> Self {
        Self::new(value, FieldMetadata::inline())
    }

    /// The type discriminator. Reported as `enabled=true`, never walked.
    pub fn discriminator(name: &str, value: &'a dyn Trackable) -> Self {
        Self {
            is_discriminator: true,
            ..Self::named(name, value)
        }
    }

    pub fn tracked(mut self) -> Self {
        self.metadata = self.metadata.tracked();
        self
    }

    pub fn override_with(mut self, value: &str) -> Self {
        self.metadata = self.metadata.with_override(value);
        self
    }

    pub fn keep_keys(mut self) -> Self {
        self.metadata = self.metadata.with_keys();
        self
    }

    pub fn excluded(mut self) -> Self {
        self.metadata = self.metadata.excluded();
        self
    }
}

impl Trackable for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::Bool(*self)
    }
}

macro_rules! trackable_int {
    ($($ty:ty => $width:ident),* $(,)?) => {
        $(
            impl Trackable for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Int(IntWidth::$width, *self as i64)
                }
            }
        )*
    };
}

macro_rules! trackable_uint {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Trackable for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Uint(*self as u64)
                }
            }
        )*
    };
}

trackable_int!(i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize);
trackable_uint!(u8, u16, u32, u64, usize);

impl Trackable for f32 {
    fn shape(&self) -> Shape<'_> {
        Shape::Float(f64::from(*self))
    }
}

impl Trackable for f64 {
    fn shape(&self) -> Shape<'_> {
        Shape::Float(*self)
    }
}

impl Trackable for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Str(self)
    }
}

impl Trackable for &'static str {
    fn shape(&self) -> Shape<'_> {
        Shape::Str(self)
    }
}

impl<T: Trackable> Trackable for Option<T> {
    fn shape(&self) -> Shape<'_> {
        match self {
            Some(value) => Shape::Ptr(value),
            None => Shape::Nil,
        }
    }

    fn custom_features(&self) -> Option<&dyn CustomFeatures> {
        self.as_ref().and_then(Trackable::custom_features)
    }
}

impl<T: Trackable> Trackable for Box<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Ptr(self.as_ref())
    }

    fn custom_features(&self) -> Option<&dyn CustomFeatures> {
        self.as_ref().custom_features()
    }
}

impl<T: Trackable> Trackable for Vec<T> {
    fn shape(&self) -> Shape<'_> {
        Shape::Seq(self.iter().map(|item| item as &dyn Trackable).collect())
    }
}

impl<V: Trackable> Trackable for BTreeMap<String, V> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(
            self.iter()
                .map(|(key, value)| (key.as_str(), value as &dyn Trackable))
                .collect(),
        )
    }
}

impl<V: Trackable, S: BuildHasher> Trackable for HashMap<String, V, S> {
    fn shape(&self) -> Shape<'_> {
        Shape::Map(
            self.iter()
                .map(|(key, value)| (key.as_str(), value as &dyn Trackable))
                .collect(),
        )
    }
}

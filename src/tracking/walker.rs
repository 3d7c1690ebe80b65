//! Recursive feature walker
//!
//! Walks a [`Trackable`] value and turns every reportable field into a
//! [`FeatureRecord`]. Dispatch is on the value's [`Shape`]:
//!
//! - a custom extraction hook replaces the walk of the value entirely
//! - excluded and zero values report nothing
//! - structs report an override record when tracked, then walk their fields
//! - maps and sequences report their length, then walk their entries
//! - scalars report their value (or override) when tracked or auto-tracked

use super::error::TrackingError;
use super::feature::{index_segment, FeatureRecord, ENABLED, KEY, LENGTH};
use super::metadata::FieldMetadata;
use super::shape::{CustomFeatures, Field, Shape, Trackable};
use tracing::trace;

/// Walks `value` with `metadata`, extending `template` for every record.
///
/// Any metadata violation aborts the walk; no partial result is returned.
pub fn walk<T: Trackable + ?Sized>(
    value: &T,
    metadata: &FieldMetadata,
    template: &FeatureRecord,
) -> Result<Vec<FeatureRecord>, TrackingError> {
    let mut records = Vec::new();
    visit(
        value.custom_features(),
        value.shape(),
        metadata,
        template,
        false,
        &mut records,
    )?;
    Ok(records)
}

/// Walks a component held in a collection.
///
/// Components are always present, so the root is never treated as a zero
/// value even when every field is unset.
pub fn walk_component<T: Trackable + ?Sized>(
    component: &T,
    template: &FeatureRecord,
) -> Result<Vec<FeatureRecord>, TrackingError> {
    let mut records = Vec::new();
    visit(
        component.custom_features(),
        component.shape(),
        &FieldMetadata::root(),
        template,
        true,
        &mut records,
    )?;
    Ok(records)
}

fn visit(
    custom: Option<&dyn CustomFeatures>,
    shape: Shape<'_>,
    metadata: &FieldMetadata,
    template: &FeatureRecord,
    present: bool,
    out: &mut Vec<FeatureRecord>,
) -> Result<(), TrackingError> {
    if let Some(hook) = custom {
        return visit_custom(hook, template, out);
    }

    if metadata.is_excluded {
        return Ok(());
    }

    if !present && shape.is_zero() {
        return Ok(());
    }

    match shape.deref() {
        Shape::Struct(fields) => visit_struct(fields, metadata, template, out),
        Shape::Map(entries) => visit_map(entries, metadata, template, out),
        Shape::Seq(items) => visit_seq(items, metadata, template, out),
        Shape::Bool(value) => visit_scalar(value.to_string(), true, metadata, template, out),
        Shape::Int(width, value) => visit_scalar(
            value.to_string(),
            width.is_auto_tracked(),
            metadata,
            template,
            out,
        ),
        Shape::Uint(value) => visit_scalar(value.to_string(), false, metadata, template, out),
        Shape::Float(value) => visit_scalar(value.to_string(), false, metadata, template, out),
        Shape::Str(value) => visit_scalar(value.to_string(), false, metadata, template, out),
        Shape::Nil | Shape::Ptr(_) => Ok(()),
    }
}

fn visit_custom(
    hook: &dyn CustomFeatures,
    template: &FeatureRecord,
    out: &mut Vec<FeatureRecord>,
) -> Result<(), TrackingError> {
    let features = hook
        .extract_features()
        .map_err(|source| TrackingError::CustomExtraction {
            component_type: template.component_type.clone(),
            source,
        })?;

    for feature in features {
        push(out, template.extend(feature.key).with_value(feature.value));
    }
    Ok(())
}

fn visit_struct(
    fields: Vec<Field<'_>>,
    metadata: &FieldMetadata,
    template: &FeatureRecord,
    out: &mut Vec<FeatureRecord>,
) -> Result<(), TrackingError> {
    if metadata.has_tracking && !metadata.has_override {
        return Err(TrackingError::OverrideStruct {
            path: error_path(template, metadata),
        });
    }

    let base = with_path_name(template, metadata);

    if metadata.has_tracking {
        if metadata.is_inline {
            return Err(TrackingError::InlineStruct {
                path: error_path(template, metadata),
            });
        }
        push(out, base.clone().with_value(metadata.override_value.as_str()));
    }

    for field in fields {
        if field.is_discriminator {
            push(out, base.child(ENABLED).with_value("true"));
            continue;
        }
        visit(
            field.value.custom_features(),
            field.value.shape(),
            &field.metadata,
            &base,
            false,
            out,
        )?;
    }
    Ok(())
}

fn visit_map(
    mut entries: Vec<(&str, &dyn Trackable)>,
    metadata: &FieldMetadata,
    template: &FeatureRecord,
    out: &mut Vec<FeatureRecord>,
) -> Result<(), TrackingError> {
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let base = with_path_name(template, metadata);
    push(out, base.child(LENGTH).with_value(entries.len().to_string()));

    for (i, (key, value)) in entries.into_iter().enumerate() {
        if metadata.keep_keys {
            push(
                out,
                base.extend([index_segment(i), KEY.to_string()])
                    .with_value(key),
            );
        }
        visit_entry(value, i, metadata, &base, out)?;
    }
    Ok(())
}

fn visit_seq(
    items: Vec<&dyn Trackable>,
    metadata: &FieldMetadata,
    template: &FeatureRecord,
    out: &mut Vec<FeatureRecord>,
) -> Result<(), TrackingError> {
    let base = with_path_name(template, metadata);
    push(out, base.child(LENGTH).with_value(items.len().to_string()));

    for (i, value) in items.into_iter().enumerate() {
        visit_entry(value, i, metadata, &base, out)?;
    }
    Ok(())
}

/// Entries inherit the container's metadata. Struct entries, judged on the
/// entry's own shape before dereferencing, nest under the index segment; any
/// other entry takes the index as its own path name.
fn visit_entry(
    value: &dyn Trackable,
    index: usize,
    metadata: &FieldMetadata,
    base: &FeatureRecord,
    out: &mut Vec<FeatureRecord>,
) -> Result<(), TrackingError> {
    let shape = value.shape();
    if shape.is_struct() {
        visit(
            value.custom_features(),
            shape,
            &metadata.with_path_name(""),
            &base.child(index_segment(index)),
            false,
            out,
        )
    } else {
        visit(
            value.custom_features(),
            shape,
            &metadata.with_path_name(index_segment(index)),
            base,
            false,
            out,
        )
    }
}

fn visit_scalar(
    text: String,
    auto_tracked: bool,
    metadata: &FieldMetadata,
    template: &FeatureRecord,
    out: &mut Vec<FeatureRecord>,
) -> Result<(), TrackingError> {
    if !metadata.has_tracking && !auto_tracked {
        return Ok(());
    }

    let value = if metadata.has_override {
        metadata.override_value.clone()
    } else {
        text
    };
    push(out, with_path_name(template, metadata).with_value(value));
    Ok(())
}

fn with_path_name(template: &FeatureRecord, metadata: &FieldMetadata) -> FeatureRecord {
    if metadata.path_name.is_empty() {
        template.clone()
    } else {
        template.child(metadata.path_name.as_str())
    }
}

fn error_path(template: &FeatureRecord, metadata: &FieldMetadata) -> String {
    with_path_name(template, metadata).joined_key()
}

fn push(out: &mut Vec<FeatureRecord>, record: FeatureRecord) {
    trace!(record = %record, "feature");
    out.push(record);
}

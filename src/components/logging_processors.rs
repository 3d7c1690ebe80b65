//! Logging processors

use crate::model::{ConfigComponent, LoggingProcessor};
use crate::tracking::{Field, Shape, Trackable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parser settings shared by the `parse_*` processors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserShared {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub time_key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub time_format: String,
    /// Field name to target type (`string`, `integer`, `bool`, `float`, `hex`)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub types: BTreeMap<String, String>,
}

impl Trackable for ParserShared {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(vec![
            Field::named("field", &self.field),
            Field::named("time_key", &self.time_key),
            Field::named("time_format", &self.time_format),
            Field::named("types", &self.types),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseJsonProcessor {
    #[serde(flatten)]
    pub config: ConfigComponent,
    #[serde(flatten)]
    pub parser: ParserShared,
}

impl_component!(ParseJsonProcessor, "parse_json", [LoggingProcessor]);

impl Trackable for ParseJsonProcessor {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(vec![Field::inline(&self.config), Field::inline(&self.parser)])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseRegexProcessor {
    #[serde(flatten)]
    pub config: ConfigComponent,
    #[serde(flatten)]
    pub parser: ParserShared,
    pub regex: String,
}

impl_component!(ParseRegexProcessor, "parse_regex", [LoggingProcessor]);

impl Trackable for ParseRegexProcessor {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(vec![
            Field::inline(&self.config),
            Field::inline(&self.parser),
            Field::named("regex", &self.regex),
        ])
    }
}

/// How a single output field of `modify_fields` is produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyField {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub move_from: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub copy_from: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_value: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub map_values: BTreeMap<String, String>,
    /// `integer` or `float`
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub omit_if: String,
}

impl Trackable for ModifyField {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(vec![
            Field::named("move_from", &self.move_from),
            Field::named("copy_from", &self.copy_from),
            Field::named("static_value", &self.static_value),
            Field::named("map_values", &self.map_values),
            Field::named("type", &self.field_type),
            Field::named("omit_if", &self.omit_if),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifyFieldsProcessor {
    #[serde(flatten)]
    pub config: ConfigComponent,
    #[serde(default)]
    pub fields: BTreeMap<String, ModifyField>,
}

impl_component!(ModifyFieldsProcessor, "modify_fields", [LoggingProcessor]);

impl Trackable for ModifyFieldsProcessor {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(vec![
            Field::inline(&self.config),
            Field::named("fields", &self.fields),
        ])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludeLogsProcessor {
    #[serde(flatten)]
    pub config: ConfigComponent,
    pub match_any: Vec<String>,
}

impl_component!(ExcludeLogsProcessor, "exclude_logs", [LoggingProcessor]);

impl Trackable for ExcludeLogsProcessor {
    fn shape(&self) -> Shape<'_> {
        Shape::Struct(vec![
            Field::inline(&self.config),
            Field::named("match_any", &self.match_any),
        ])
    }
}

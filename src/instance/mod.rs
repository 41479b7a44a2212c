//! In-memory instances of wire schemas.
//!
//! An [`Instance`] is a concrete value conforming to a [`Schema`]: one slot
//! per declared field, each either set or unset. Unset is distinct from an
//! explicit empty value (an empty string or empty array is set). Instances
//! are produced by the decoder or built directly; fixed-value tag fields
//! are always populated on a finished instance.

use crate::errors::{CodecResult, DecodeError};
use crate::schema::{Field, FieldType, Schema};
use std::sync::Arc;

/// A single field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// String value
    Str(String),
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// Nested record
    Record(Instance),
    /// Ordered sequence
    Array(Vec<FieldValue>),
    /// Raw payload of an unrecognized union variant
    Unknown(serde_json::Map<String, serde_json::Value>),
}

impl FieldValue {
    /// View as a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// View as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// View as an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// View as a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// View as a nested record
    pub fn as_record(&self) -> Option<&Instance> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// View as a sequence
    pub fn as_array(&self) -> Option<&[FieldValue]> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Kind name, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Record(_) => "record",
            Self::Array(_) => "array",
            Self::Unknown(_) => "unknown",
        }
    }

    fn conforms_to(&self, ty: &FieldType) -> bool {
        match (self, ty) {
            (Self::Str(_), FieldType::String) => true,
            (Self::Bool(_), FieldType::Bool) => true,
            (Self::Int(_), FieldType::Int) => true,
            (Self::Float(_) | Self::Int(_), FieldType::Float) => true,
            (Self::Record(r), FieldType::Record(name)) => r.schema().name() == name,
            (Self::Record(r), FieldType::Union(u)) => u.has_variant_schema(r.schema().name()),
            (Self::Unknown(_), FieldType::Union(u)) => u.has_fallback(),
            (Self::Array(items), FieldType::Array(elem)) => {
                items.iter().all(|v| v.conforms_to(elem))
            }
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<Instance> for FieldValue {
    fn from(instance: Instance) -> Self {
        Self::Record(instance)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(items: Vec<FieldValue>) -> Self {
        Self::Array(items)
    }
}

/// A value conforming to a schema
#[derive(Debug, Clone)]
pub struct Instance {
    schema: Arc<Schema>,
    values: Vec<Option<FieldValue>>,
}

impl Instance {
    pub(crate) fn empty(schema: Arc<Schema>) -> Self {
        let values = vec![None; schema.fields().len()];
        Self { schema, values }
    }

    /// Start building an instance of the given schema
    pub fn builder(schema: &Arc<Schema>) -> InstanceBuilder {
        InstanceBuilder {
            instance: Self::empty(schema.clone()),
            error: None,
        }
    }

    /// The schema this instance conforms to
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Get a field value by in-memory name; `None` when unset or undeclared
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.schema
            .index_of(name)
            .and_then(|i| self.values[i].as_ref())
    }

    /// Whether the named field is set
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of set fields
    pub fn set_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Fields in declaration order, paired with their (possibly unset) value
    pub fn slots(&self) -> impl Iterator<Item = (&Field, Option<&FieldValue>)> {
        self.schema
            .fields()
            .iter()
            .zip(self.values.iter().map(Option::as_ref))
    }

    pub(crate) fn set_index(&mut self, index: usize, value: FieldValue) {
        self.values[index] = Some(value);
    }

    /// Populate unset fixed-value fields with their declared value
    pub(crate) fn fill_fixed(&mut self) {
        for (i, field) in self.schema.fields().iter().enumerate() {
            if self.values[i].is_none() {
                if let Some(fixed) = field.fixed_value() {
                    self.values[i] = Some(FieldValue::Str(fixed.to_string()));
                }
            }
        }
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.schema.name() == other.schema.name() && self.values == other.values
    }
}

/// Fluent builder for [`Instance`].
///
/// Only explicitly provided fields are set; the first error (unknown field,
/// value not conforming to the declared type) is reported at [`build`].
///
/// [`build`]: InstanceBuilder::build
#[derive(Debug)]
pub struct InstanceBuilder {
    instance: Instance,
    error: Option<DecodeError>,
}

impl InstanceBuilder {
    /// Set a field by in-memory name
    pub fn set(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        if self.error.is_some() {
            return self;
        }
        let schema = self.instance.schema.clone();
        match schema.index_of(name) {
            Some(index) => {
                let value = value.into();
                let field = &schema.fields()[index];
                if value.conforms_to(field.field_type()) {
                    self.instance.set_index(index, value);
                } else {
                    self.error = Some(DecodeError::TypeMismatch {
                        field: name.to_string(),
                        expected: field.field_type().type_name(),
                        actual: value.kind().to_string(),
                    });
                }
            }
            None => {
                self.error = Some(DecodeError::UnknownField {
                    schema: schema.name().to_string(),
                    field: name.to_string(),
                });
            }
        }
        self
    }

    /// Finalize the instance, populating fixed-value tag fields
    pub fn build(mut self) -> CodecResult<Instance> {
        if let Some(err) = self.error {
            return Err(err.into());
        }
        self.instance.fill_fixed();
        Ok(self.instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::registry::registry;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_sets_only_provided_fields() {
        let schema = registry().schema("reaction").unwrap();
        let reaction = Instance::builder(schema)
            .set("name", "thumbsup")
            .set("count", 2)
            .build()
            .unwrap();

        assert_eq!(reaction.get("name").and_then(FieldValue::as_str), Some("thumbsup"));
        assert_eq!(reaction.get("count").and_then(FieldValue::as_int), Some(2));
        assert!(!reaction.is_set("users"));
        assert_eq!(reaction.set_count(), 2);
    }

    #[test]
    fn test_builder_rejects_unknown_field() {
        let schema = registry().schema("reaction").unwrap();
        let err = Instance::builder(schema)
            .set("emoji", "thumbsup")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("no field `emoji`"));
    }

    #[test]
    fn test_builder_rejects_mismatched_value() {
        let schema = registry().schema("reaction").unwrap();
        let err = Instance::builder(schema)
            .set("count", "two")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("expected integer"));
    }

    #[test]
    fn test_fixed_tag_is_populated_on_build() {
        let schema = registry().schema("typingEvent").unwrap();
        let fresh = Instance::builder(schema).build().unwrap();
        assert_eq!(fresh.get("type").and_then(FieldValue::as_str), Some("typing"));
        assert!(!fresh.is_set("channel"));
        assert!(!fresh.is_set("id"));
    }

    #[test]
    fn test_empty_array_is_set() {
        let schema = registry().schema("reaction").unwrap();
        let reaction = Instance::builder(schema)
            .set("users", Vec::new())
            .build()
            .unwrap();
        assert!(reaction.is_set("users"));
        assert_eq!(reaction.get("users").and_then(FieldValue::as_array), Some(&[][..]));
    }
}

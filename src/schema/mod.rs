//! Schema descriptors for wire shapes.
//!
//! A [`Schema`] is a named record type with an ordered list of typed fields.
//! Fields declare only their in-memory (lowerCamelCase) name; the wire name
//! is derived through [`crate::naming`] at construction time. Nested records
//! and union variants reference other schemas by name, resolved against the
//! process-wide [`registry`] during decoding, which keeps recursive shapes
//! (message → attachment → block → text element) representable.
//!
//! Schemas are immutable once built and shared behind `Arc`.

use crate::naming;
use std::collections::HashMap;
use std::sync::Arc;

pub mod registry;

/// Type of a schema field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// UTF-8 string
    String,
    /// Boolean
    Bool,
    /// 64-bit signed integer
    Int,
    /// 64-bit float
    Float,
    /// Nested record, referenced by schema name
    Record(String),
    /// Ordered sequence of a single element type
    Array(Box<FieldType>),
    /// Discriminator-selected union of record schemas
    Union(UnionType),
}

impl FieldType {
    /// Nested record type referencing a registered schema
    pub fn record(schema: impl Into<String>) -> Self {
        Self::Record(schema.into())
    }

    /// Array of the given element type
    pub fn array(element: FieldType) -> Self {
        Self::Array(Box::new(element))
    }

    /// Human-readable type name, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "boolean",
            Self::Int => "integer",
            Self::Float => "float",
            Self::Record(_) => "record",
            Self::Array(_) => "array",
            Self::Union(_) => "union",
        }
    }
}

/// A polymorphic union selected by a discriminator field.
///
/// The discriminator is read from the wire object before the rest of the
/// structure is decoded; its value selects the variant schema. A union may
/// declare a fallback, in which case unrecognized (or absent) discriminator
/// values decode to the raw key/value payload instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionType {
    discriminator: String,
    variants: Vec<(String, String)>,
    fallback: bool,
}

impl UnionType {
    /// Create a union keyed on the given discriminator wire field
    pub fn new(discriminator: impl Into<String>) -> Self {
        Self {
            discriminator: discriminator.into(),
            variants: Vec::new(),
            fallback: false,
        }
    }

    /// Add a variant: discriminator value → variant schema name
    pub fn variant(mut self, tag: impl Into<String>, schema: impl Into<String>) -> Self {
        self.variants.push((tag.into(), schema.into()));
        self
    }

    /// Allow unrecognized discriminator values, decoded as raw payloads
    pub fn with_fallback(mut self) -> Self {
        self.fallback = true;
        self
    }

    /// Discriminator wire field name
    pub fn discriminator(&self) -> &str {
        &self.discriminator
    }

    /// Resolve a discriminator value to its variant schema name
    pub fn resolve(&self, tag: &str) -> Option<&str> {
        self.variants
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, s)| s.as_str())
    }

    /// Whether unrecognized discriminator values are tolerated
    pub fn has_fallback(&self) -> bool {
        self.fallback
    }

    /// Whether the named schema is one of this union's variants
    pub fn has_variant_schema(&self, schema: &str) -> bool {
        self.variants.iter().any(|(_, s)| s == schema)
    }
}

/// A single typed field of a schema
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    wire: String,
    ty: FieldType,
    fixed: Option<String>,
}

impl Field {
    fn new(name: impl Into<String>, ty: FieldType) -> Self {
        let name = name.into();
        let wire = naming::to_wire_name(&name);
        Self {
            name,
            wire,
            ty,
            fixed: None,
        }
    }

    /// In-memory (lowerCamelCase) field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wire (snake_case) field name
    pub fn wire_name(&self) -> &str {
        &self.wire
    }

    /// Declared field type
    pub fn field_type(&self) -> &FieldType {
        &self.ty
    }

    /// Compile-time-fixed value, if this is a fixed tag field
    pub fn fixed_value(&self) -> Option<&str> {
        self.fixed.as_deref()
    }
}

/// A named record schema with an ordered set of typed fields
#[derive(Debug)]
pub struct Schema {
    name: String,
    fields: Vec<Field>,
    by_name: HashMap<String, usize>,
    by_wire: HashMap<String, usize>,
}

impl Schema {
    /// Start building a schema with the given name
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Schema name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Index of a field by in-memory name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Look up a field by in-memory name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.index_of(name).map(|i| &self.fields[i])
    }

    /// Look up a field by wire name
    pub fn field_by_wire(&self, wire: &str) -> Option<(usize, &Field)> {
        self.by_wire.get(wire).map(|&i| (i, &self.fields[i]))
    }
}

/// Builder for [`Schema`]
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<Field>,
}

impl SchemaBuilder {
    /// Declare a field by its in-memory name
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push(Field::new(name, ty));
        self
    }

    /// Declare a string field carrying a compile-time-fixed value, such as
    /// a union discriminator tag
    pub fn fixed(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut field = Field::new(name, FieldType::String);
        field.fixed = Some(value.into());
        self.fields.push(field);
        self
    }

    /// Finalize the schema
    pub fn build(self) -> Arc<Schema> {
        let mut by_name = HashMap::with_capacity(self.fields.len());
        let mut by_wire = HashMap::with_capacity(self.fields.len());
        for (i, field) in self.fields.iter().enumerate() {
            let prev = by_name.insert(field.name.clone(), i);
            debug_assert!(prev.is_none(), "duplicate field `{}`", field.name);
            by_wire.insert(field.wire.clone(), i);
        }
        Arc::new(Schema {
            name: self.name,
            fields: self.fields,
            by_name,
            by_wire,
        })
    }
}

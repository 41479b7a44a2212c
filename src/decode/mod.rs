//! Schema-driven JSON decoding.
//!
//! Decoding is total and side-effect-free: it never mutates the input JSON
//! representation, and its two compatibility tolerances are deliberate —
//! unknown wire fields are ignored (the upstream API may add fields this
//! client does not yet model) and missing wire fields, along with explicit
//! nulls, leave the corresponding in-memory field unset. Everything else
//! that disagrees with the schema fails with a typed [`DecodeError`].

use crate::errors::{CodecError, CodecResult, DecodeError};
use crate::instance::{FieldValue, Instance};
use crate::schema::registry::registry;
use crate::schema::{FieldType, Schema, UnionType};
use serde_json::Value;
use std::sync::Arc;
use tracing::trace;

/// Result of decoding a discriminator union
#[derive(Debug, Clone, PartialEq)]
pub enum UnionValue {
    /// The discriminator selected a modeled variant
    Known(Instance),
    /// The union's fallback caught an unrecognized discriminator; the raw
    /// key/value payload is preserved as decoded
    Unrecognized(serde_json::Map<String, Value>),
}

/// Decode a JSON document against a schema
pub fn decode_str(text: &str, schema: &Arc<Schema>) -> CodecResult<Instance> {
    let value: Value = serde_json::from_str(text).map_err(DecodeError::Json)?;
    decode_value(&value, schema)
}

/// Decode an already-parsed JSON value against a schema
pub fn decode_value(value: &Value, schema: &Arc<Schema>) -> CodecResult<Instance> {
    decode_record(value, schema, "")
}

/// Decode a JSON value as one variant of a discriminator union
pub fn decode_union(value: &Value, union: &UnionType) -> CodecResult<UnionValue> {
    decode_union_at(value, union, "")
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn lookup(name: &str) -> CodecResult<Arc<Schema>> {
    registry()
        .schema(name)
        .cloned()
        .ok_or_else(|| DecodeError::UnknownSchema(name.to_string()).into())
}

fn decode_record(value: &Value, schema: &Arc<Schema>, path: &str) -> CodecResult<Instance> {
    let object = value.as_object().ok_or_else(|| DecodeError::InvalidDocument {
        schema: schema.name().to_string(),
        actual: kind_of(value).to_string(),
    })?;

    let mut instance = Instance::empty(schema.clone());
    for (wire_key, wire_value) in object {
        let Some((index, field)) = schema.field_by_wire(wire_key) else {
            trace!(schema = schema.name(), field = %wire_key, "ignoring unknown wire field");
            continue;
        };
        // Explicit null and omission both map to unset.
        if wire_value.is_null() {
            continue;
        }
        let field_path = join(path, field.name());
        let decoded = decode_field(wire_value, field.field_type(), &field_path)?;
        instance.set_index(index, decoded);
    }
    instance.fill_fixed();
    Ok(instance)
}

fn decode_field(value: &Value, ty: &FieldType, path: &str) -> CodecResult<FieldValue> {
    let mismatch = |expected: &'static str| -> CodecError {
        DecodeError::TypeMismatch {
            field: path.to_string(),
            expected,
            actual: kind_of(value).to_string(),
        }
        .into()
    };

    match ty {
        FieldType::String => value
            .as_str()
            .map(|s| FieldValue::Str(s.to_string()))
            .ok_or_else(|| mismatch("string")),
        FieldType::Bool => value
            .as_bool()
            .map(FieldValue::Bool)
            .ok_or_else(|| mismatch("boolean")),
        FieldType::Int => match value {
            Value::Number(n) => n.as_i64().map(FieldValue::Int).ok_or_else(|| mismatch("integer")),
            // The reference format carries some integers as quoted strings
            // (RTM envelope ids among them).
            Value::String(s) => s
                .parse::<i64>()
                .map(FieldValue::Int)
                .map_err(|_| mismatch("integer")),
            _ => Err(mismatch("integer")),
        },
        FieldType::Float => match value {
            Value::Number(n) => n.as_f64().map(FieldValue::Float).ok_or_else(|| mismatch("float")),
            Value::String(s) => s
                .parse::<f64>()
                .map(FieldValue::Float)
                .map_err(|_| mismatch("float")),
            _ => Err(mismatch("float")),
        },
        FieldType::Record(name) => {
            let schema = lookup(name)?;
            Ok(FieldValue::Record(decode_record(value, &schema, path)?))
        }
        FieldType::Array(element) => {
            let items = value.as_array().ok_or_else(|| mismatch("array"))?;
            let mut decoded = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                decoded.push(decode_field(item, element, &format!("{path}[{i}]"))?);
            }
            Ok(FieldValue::Array(decoded))
        }
        FieldType::Union(union) => Ok(match decode_union_at(value, union, path)? {
            UnionValue::Known(instance) => FieldValue::Record(instance),
            UnionValue::Unrecognized(raw) => FieldValue::Unknown(raw),
        }),
    }
}

fn decode_union_at(value: &Value, union: &UnionType, path: &str) -> CodecResult<UnionValue> {
    let object = value.as_object().ok_or_else(|| DecodeError::TypeMismatch {
        field: path.to_string(),
        expected: "object",
        actual: kind_of(value).to_string(),
    })?;

    let tag = match object.get(union.discriminator()) {
        Some(Value::String(tag)) => Some(tag.as_str()),
        Some(Value::Null) | None => None,
        Some(other) => {
            return Err(DecodeError::TypeMismatch {
                field: join(path, union.discriminator()),
                expected: "string",
                actual: kind_of(other).to_string(),
            }
            .into())
        }
    };

    match tag.and_then(|t| union.resolve(t).map(|s| (t, s))) {
        Some((_, schema_name)) => {
            let schema = lookup(schema_name)?;
            Ok(UnionValue::Known(decode_record(value, &schema, path)?))
        }
        None if union.has_fallback() => Ok(UnionValue::Unrecognized(object.clone())),
        None => Err(DecodeError::UnknownVariant {
            field: path.to_string(),
            discriminator: union.discriminator().to_string(),
            value: tag.unwrap_or("<missing>").to_string(),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CodecError;
    use crate::schema::registry::{block_union, rtm_event_union};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn schema(name: &str) -> Arc<Schema> {
        registry().schema(name).cloned().unwrap()
    }

    #[test]
    fn test_unknown_wire_fields_are_ignored() {
        let reaction = decode_value(
            &json!({"name": "wave", "users": ["U1"], "count": 1, "added_by_admin": true}),
            &schema("reaction"),
        )
        .unwrap();
        assert_eq!(reaction.get("name").and_then(FieldValue::as_str), Some("wave"));
        assert_eq!(reaction.set_count(), 3);
    }

    #[test]
    fn test_missing_fields_stay_unset() {
        let reaction = decode_value(&json!({"name": "wave"}), &schema("reaction")).unwrap();
        assert!(!reaction.is_set("users"));
        assert!(!reaction.is_set("count"));
    }

    #[test]
    fn test_explicit_null_stays_unset() {
        let reaction =
            decode_value(&json!({"name": "wave", "count": null}), &schema("reaction")).unwrap();
        assert!(!reaction.is_set("count"));
    }

    #[test]
    fn test_type_mismatch_reports_path() {
        let err = decode_value(
            &json!({"ok": true, "channel": {"id": "C1", "topic": {"value": 7}}}),
            &schema("channelsCreateResponse"),
        )
        .unwrap_err();
        match err {
            CodecError::Decode(DecodeError::TypeMismatch { field, expected, actual }) => {
                assert_eq!(field, "channel.topic.value");
                assert_eq!(expected, "string");
                assert_eq!(actual, "number");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_integer_accepts_wire_string() {
        let event = decode_value(
            &json!({"type": "typing", "channel": "c", "id": "123"}),
            &schema("typingEvent"),
        )
        .unwrap();
        assert_eq!(event.get("id").and_then(FieldValue::as_int), Some(123));

        let err = decode_value(&json!({"id": "12x"}), &schema("typingEvent")).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Decode(DecodeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_array_decodes_to_set_empty_sequence() {
        let message = decode_value(
            &json!({"type": "message", "ts": "1.2", "reactions": []}),
            &schema("message"),
        )
        .unwrap();
        assert_eq!(
            message.get("reactions").and_then(FieldValue::as_array),
            Some(&[][..])
        );
    }

    #[test]
    fn test_array_elements_report_indexed_paths() {
        let err = decode_value(
            &json!({"name": "wave", "users": ["U1", 7]}),
            &schema("reaction"),
        )
        .unwrap_err();
        match err {
            CodecError::Decode(DecodeError::TypeMismatch { field, .. }) => {
                assert_eq!(field, "users[1]");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_union_selects_variant_by_discriminator() {
        let block = decode_union(
            &json!({"type": "section", "block_id": "b1", "text": {"type": "mrkdwn", "text": "hi"}}),
            &block_union(),
        )
        .unwrap();
        match block {
            UnionValue::Known(instance) => {
                assert_eq!(instance.schema().name(), "sectionBlock");
                let text = instance.get("text").and_then(FieldValue::as_record).unwrap();
                assert_eq!(text.get("text").and_then(FieldValue::as_str), Some("hi"));
            }
            other => panic!("unexpected union value: {other:?}"),
        }
    }

    #[test]
    fn test_union_fallback_preserves_raw_payload() {
        let block = decode_union(
            &json!({"type": "video", "video_url": "https://example.com/v"}),
            &block_union(),
        )
        .unwrap();
        match block {
            UnionValue::Unrecognized(raw) => {
                assert_eq!(raw["type"], "video");
                assert_eq!(raw["video_url"], "https://example.com/v");
            }
            other => panic!("unexpected union value: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_variant_without_fallback_fails() {
        let strict = UnionType::new("type")
            .variant("typing", "typingEvent")
            .variant("hello", "helloEvent");
        let err = decode_union(&json!({"type": "goodbye"}), &strict).unwrap_err();
        match err {
            CodecError::Decode(DecodeError::UnknownVariant { discriminator, value, .. }) => {
                assert_eq!(discriminator, "type");
                assert_eq!(value, "goodbye");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = decode_union(&json!({"channel": "c"}), &strict).unwrap_err();
        assert!(err.to_string().contains("<missing>"));
    }

    #[test]
    fn test_rtm_event_union_routes_message_events() {
        let event = decode_union(
            &json!({"type": "message", "text": "hi", "ts": "1.2", "channel": "C1", "user": "U1"}),
            &rtm_event_union(),
        )
        .unwrap();
        match event {
            UnionValue::Known(instance) => assert_eq!(instance.schema().name(), "message"),
            other => panic!("unexpected union value: {other:?}"),
        }
    }

    #[test]
    fn test_decode_does_not_consume_input() {
        let value = json!({"name": "wave", "count": 1});
        let first = decode_value(&value, &schema("reaction")).unwrap();
        let second = decode_value(&value, &schema("reaction")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_root_must_be_object() {
        let err = decode_str("[1, 2]", &schema("reaction")).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Decode(DecodeError::InvalidDocument { .. })
        ));
    }

    #[test]
    fn test_invalid_json_is_surfaced() {
        let err = decode_str("{not json", &schema("reaction")).unwrap_err();
        assert!(matches!(err, CodecError::Decode(DecodeError::Json(_))));
    }
}

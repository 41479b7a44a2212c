//! Minimal-document JSON encoding.
//!
//! Only set fields are emitted; unset optional fields are omitted entirely
//! rather than written as `null`, because the wire format distinguishes
//! "field omitted" from "field explicitly null" and downstream consumers
//! rely on omission for defaults. Fields are written in schema declaration
//! order, so encoded text is stable and reproducible. Fixed-value tag
//! fields are populated at construction time and therefore always appear —
//! a freshly built instance encodes to `{}`, or to just its tag(s).

use crate::errors::{CodecResult, DecodeError};
use crate::instance::{FieldValue, Instance};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

impl Serialize for Instance {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.set_count()))?;
        for (field, slot) in self.slots() {
            if let Some(value) = slot {
                map.serialize_entry(field.wire_name(), value)?;
            }
        }
        map.end()
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Str(s) => serializer.serialize_str(s),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::Record(instance) => instance.serialize(serializer),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Unknown(raw) => raw.serialize(serializer),
        }
    }
}

/// Encode an instance to minimal JSON text
pub fn encode(instance: &Instance) -> CodecResult<String> {
    serde_json::to_string(instance).map_err(|e| DecodeError::Json(e).into())
}

/// Encode an instance to a parsed JSON value.
///
/// The declaration-order guarantee applies to [`encode`]d text; a
/// [`serde_json::Value`] map orders keys on its own terms.
pub fn encode_value(instance: &Instance) -> CodecResult<serde_json::Value> {
    serde_json::to_value(instance).map_err(|e| DecodeError::Json(e).into())
}

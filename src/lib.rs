//! Slack API wire-format codec
//!
//! Typed JSON codec and fixture-validation core for the Slack Web and RTM
//! APIs:
//! - Schema-driven decoding of snake_case wire payloads into typed
//!   in-memory instances, tolerant of unknown and missing fields
//! - Minimal-document encoding (unset fields omitted, never null)
//! - Discriminator-selected polymorphic shapes (message subtypes, Block
//!   Kit blocks, RTM events) with fallback variants
//! - A recursive field-presence validator and sample-corpus harness for
//!   captured API responses
//!
//! HTTP transport, authentication, rate limiting, and the RTM socket are
//! external collaborators: they hand raw JSON text to this core and take
//! typed instances (or minimal JSON) back.
//!
//! # Quick Start
//!
//! ```rust
//! use slack_codec::{decode_str, encode, registry, validate, Exclusions, Instance};
//!
//! # fn main() -> slack_codec::CodecResult<()> {
//! let schema = registry().schema("typingEvent").cloned().expect("registered");
//!
//! // Wire → instance, with string-to-integer coercion on the id.
//! let event = decode_str(r#"{"type":"typing","channel":"C024BE91L","id":"123"}"#, &schema)?;
//! assert_eq!(event.get("id").and_then(|v| v.as_int()), Some(123));
//! assert!(validate(&event, &Exclusions::none()).is_ok());
//!
//! // A fresh instance carries only its fixed tag.
//! let fresh = Instance::builder(&schema).build()?;
//! assert_eq!(encode(&fresh)?, r#"{"type":"typing"}"#);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Core modules
pub mod decode;
pub mod encode;
pub mod errors;
pub mod instance;
pub mod naming;
pub mod schema;

// Validation harness
pub mod corpus;
pub mod validate;

// Tests
#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use corpus::{Corpus, CorpusReport};
pub use decode::{decode_str, decode_union, decode_value, UnionValue};
pub use encode::{encode, encode_value};
pub use errors::{CodecError, CodecResult, DecodeError, FixtureError, ValidationError};
pub use instance::{FieldValue, Instance, InstanceBuilder};
pub use schema::registry::{registry, SchemaRegistry};
pub use schema::{Field, FieldType, Schema, SchemaBuilder, UnionType};
pub use validate::{validate, Exclusions, FieldPath, ValidationReport};

/// Default fixture corpus root, relative to the working directory
pub const DEFAULT_FIXTURE_ROOT: &str = "fixtures";

/// Environment variable overriding the fixture corpus root
pub const FIXTURE_ROOT_ENV: &str = "SLACK_CODEC_FIXTURES";

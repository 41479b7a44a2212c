//! Recursive field-presence validation.
//!
//! A test-time harness utility: given a decoded instance and the set of
//! fields known to be legitimately absent for that sample, walk the object
//! graph and assert every other field is populated. Nested records and
//! array elements are visited with the same exclusion set (element-level
//! exclusions are not independently addressable). Every violation is
//! collected — the harness accumulates rather than failing fast, so a
//! single run reports everything wrong with a fixture.
//!
//! This never runs in production decode paths.

use crate::errors::{CodecResult, ValidationError};
use crate::instance::{FieldValue, Instance};
use regex::Regex;
use std::fmt;

/// One segment of a field path
#[derive(Debug, Clone, PartialEq)]
enum PathSegment {
    Field(String),
    Index(usize),
}

/// Typed path to a field inside an instance graph, such as
/// `channel.topic.value` or `messages[0].text`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPath(Vec<PathSegment>);

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{name}")?;
                }
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Fields allowed to be unset for a given sample.
///
/// Entries match a field's in-memory name at any depth, either exactly or
/// by regular expression (the latter covers generated indexed families like
/// `image24`, `image512`). A matched field is skipped entirely, including
/// its subtree.
#[derive(Debug, Default)]
pub struct Exclusions {
    names: Vec<String>,
    patterns: Vec<Regex>,
}

impl Exclusions {
    /// No exclusions: every field must be set
    pub fn none() -> Self {
        Self::default()
    }

    /// Build from a list of exact field names
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            patterns: Vec::new(),
        }
    }

    /// Add one exact field name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Add a regular-expression entry, matched against field names
    pub fn pattern(mut self, pattern: &str) -> CodecResult<Self> {
        let regex = Regex::new(pattern).map_err(|source| ValidationError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        self.patterns.push(regex);
        Ok(self)
    }

    /// Whether the given field name is excluded
    pub fn matches(&self, field_name: &str) -> bool {
        self.names.iter().any(|n| n == field_name)
            || self.patterns.iter().any(|p| p.is_match(field_name))
    }
}

/// Outcome of a validation run
#[derive(Debug)]
pub struct ValidationReport {
    violations: Vec<FieldPath>,
}

impl ValidationReport {
    /// Whether every checked field was set
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Paths of every unset field, in traversal order
    pub fn violations(&self) -> &[FieldPath] {
        &self.violations
    }

    /// Convert into a result, rendering violation paths
    pub fn into_result(self) -> CodecResult<()> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::UnsetFields {
                paths: self.violations.iter().map(ToString::to_string).collect(),
            }
            .into())
        }
    }
}

/// Walk every field of `instance`, asserting presence of all fields not
/// covered by `exclusions`
pub fn validate(instance: &Instance, exclusions: &Exclusions) -> ValidationReport {
    let mut violations = Vec::new();
    let mut path = Vec::new();
    walk(instance, exclusions, &mut path, &mut violations);
    ValidationReport { violations }
}

fn walk(
    instance: &Instance,
    exclusions: &Exclusions,
    path: &mut Vec<PathSegment>,
    violations: &mut Vec<FieldPath>,
) {
    for (field, slot) in instance.slots() {
        if exclusions.matches(field.name()) {
            continue;
        }
        path.push(PathSegment::Field(field.name().to_string()));
        match slot {
            None => violations.push(FieldPath(path.clone())),
            Some(FieldValue::Record(inner)) => walk(inner, exclusions, path, violations),
            Some(FieldValue::Array(items)) => {
                for (i, item) in items.iter().enumerate() {
                    if let FieldValue::Record(inner) = item {
                        path.push(PathSegment::Index(i));
                        walk(inner, exclusions, path, violations);
                        path.pop();
                    }
                }
            }
            // Scalars and fallback payloads are leaves.
            Some(_) => {}
        }
        path.pop();
    }
}

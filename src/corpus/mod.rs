//! Sample corpus harness.
//!
//! Captured API responses live in a file tree, one JSON document per
//! operation, addressed by the operation name with dots mapped to path
//! segments (`channels.create` → `channels/create.json`). The harness
//! loads a fixture, decodes it against the operation's registered response
//! schema, and runs the field-presence validator with the caller's
//! exclusion list. A missing fixture is reported as its own error kind so
//! test output distinguishes "no sample captured" from "sample captured
//! but schema mismatch".

use crate::decode::decode_str;
use crate::errors::{CodecResult, DecodeError, FixtureError};
use crate::instance::Instance;
use crate::schema::registry::registry;
use crate::validate::{validate, Exclusions, ValidationReport};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A fixture corpus rooted at a directory
#[derive(Debug, Clone)]
pub struct Corpus {
    root: PathBuf,
}

impl Corpus {
    /// Create a corpus rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a corpus from the environment.
    ///
    /// Reads [`crate::FIXTURE_ROOT_ENV`], falling back to
    /// [`crate::DEFAULT_FIXTURE_ROOT`].
    pub fn from_env() -> Self {
        let root = std::env::var(crate::FIXTURE_ROOT_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(crate::DEFAULT_FIXTURE_ROOT));
        Self::new(root)
    }

    /// The corpus root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the fixture path for an operation name
    pub fn fixture_path(&self, operation: &str) -> PathBuf {
        let mut path = self.root.clone();
        for segment in operation.split('.') {
            path.push(segment);
        }
        path.set_extension("json");
        path
    }

    /// Load the raw fixture document for an operation
    pub fn load(&self, operation: &str) -> CodecResult<String> {
        let path = self.fixture_path(operation);
        if !path.is_file() {
            return Err(FixtureError::NotFound {
                operation: operation.to_string(),
                path,
            }
            .into());
        }
        let text = fs::read_to_string(&path).map_err(|source| FixtureError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(operation, path = %path.display(), bytes = text.len(), "loaded fixture");
        Ok(text)
    }

    /// Decode an operation's fixture against its registered response schema
    pub fn decode(&self, operation: &str) -> CodecResult<Instance> {
        let schema = registry()
            .operation_schema(operation)
            .cloned()
            .ok_or_else(|| DecodeError::UnknownOperation(operation.to_string()))?;
        let text = self.load(operation)?;
        decode_str(&text, &schema)
    }

    /// Decode an operation's fixture and validate field presence against
    /// the given exclusion list
    pub fn verify(&self, operation: &str, exclusions: &Exclusions) -> CodecResult<ValidationReport> {
        let instance = self.decode(operation)?;
        let report = validate(&instance, exclusions);
        debug!(
            operation,
            violations = report.violations().len(),
            "verified fixture"
        );
        Ok(report)
    }

    /// Like [`verify`], but collapses the report into a result
    ///
    /// [`verify`]: Corpus::verify
    pub fn check(&self, operation: &str, exclusions: &Exclusions) -> CodecResult<()> {
        self.verify(operation, exclusions)?.into_result()
    }

    /// Run a batch of checks, one outcome per operation
    pub fn run(&self, checks: &[(&str, Exclusions)]) -> CorpusReport {
        let outcomes = checks
            .iter()
            .map(|(operation, exclusions)| {
                (operation.to_string(), self.check(operation, exclusions))
            })
            .collect();
        CorpusReport { outcomes }
    }
}

/// Pass/fail outcomes of a batch corpus run
#[derive(Debug)]
pub struct CorpusReport {
    outcomes: Vec<(String, CodecResult<()>)>,
}

impl CorpusReport {
    /// All outcomes, in check order
    pub fn outcomes(&self) -> &[(String, CodecResult<()>)] {
        &self.outcomes
    }

    /// Number of passing operations
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|(_, r)| r.is_ok()).count()
    }

    /// Number of failing operations
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    /// Whether every operation passed
    pub fn is_ok(&self) -> bool {
        self.failed() == 0
    }

    /// Failing operations with their errors
    pub fn failures(&self) -> impl Iterator<Item = (&str, &crate::errors::CodecError)> {
        self.outcomes
            .iter()
            .filter_map(|(op, r)| r.as_ref().err().map(|e| (op.as_str(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CodecError;

    #[test]
    fn test_fixture_path_maps_dots_to_segments() {
        let corpus = Corpus::new("fixtures");
        assert_eq!(
            corpus.fixture_path("channels.create"),
            PathBuf::from("fixtures/channels/create.json")
        );
        assert_eq!(
            corpus.fixture_path("chat.postMessage"),
            PathBuf::from("fixtures/chat/postMessage.json")
        );
    }

    #[test]
    fn test_missing_fixture_is_its_own_error() {
        let corpus = Corpus::new("fixtures");
        let err = corpus.load("channels.destroy").unwrap_err();
        match err {
            CodecError::Fixture(FixtureError::NotFound { operation, path }) => {
                assert_eq!(operation, "channels.destroy");
                assert!(path.ends_with("channels/destroy.json"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unbound_operation_is_distinct_from_missing_fixture() {
        let corpus = Corpus::new("fixtures");
        let err = corpus.decode("channels.destroy").unwrap_err();
        assert!(matches!(
            err,
            CodecError::Decode(DecodeError::UnknownOperation(_))
        ));
    }
}

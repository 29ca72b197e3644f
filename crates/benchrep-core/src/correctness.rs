//! Correctness scoring against a static reference document.

use crate::errors::ReportError;
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Scores an observed result count against an expected value.
///
/// A ratio of exactly 1 counts as correct; anything else (including NaN
/// from a missing reference entry) marks the result incorrect.
pub trait CorrectnessChecker {
    fn correctness(&self, experiment_id: usize, query: &str, actual: f64) -> f64;
}

/// Reference document shape: `{ "type": "queries", "queries": { name: n } }`.
#[derive(Debug, Deserialize)]
struct ReferenceDocument {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    queries: HashMap<String, f64>,
}

/// Per-query expected cardinalities.
pub struct QueryCardinalities {
    expected: HashMap<String, f64>,
}

impl QueryCardinalities {
    pub fn new(expected: HashMap<String, f64>) -> Self {
        Self { expected }
    }
}

impl CorrectnessChecker for QueryCardinalities {
    fn correctness(&self, _experiment_id: usize, query: &str, actual: f64) -> f64 {
        actual / self.expected.get(query).copied().unwrap_or(f64::NAN)
    }
}

/// Loads a checker from a JSON reference document. Fails fast on an
/// unrecognized `type`.
pub fn load_checker(path: &Path) -> anyhow::Result<Box<dyn CorrectnessChecker>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read correctness reference {}", path.display()))?;
    let document: ReferenceDocument = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse correctness reference {}", path.display()))?;
    if document.kind != "queries" {
        return Err(ReportError::UnsupportedReference(document.kind).into());
    }
    Ok(Box::new(QueryCardinalities::new(document.queries)))
}

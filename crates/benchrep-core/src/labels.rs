//! Display names for experiments and queries, with positional overrides.

use crate::errors::ReportError;
use crate::ordered::OrderedMap;
use std::path::Path;

/// Derives display names for a list of experiment directories.
///
/// The name is the path component after the last separator; an empty
/// basename (e.g. a trailing slash) falls back to `experiment_<index>`.
/// A comma-separated override list replaces the derived names, but only
/// when its length matches the directory count exactly.
pub fn experiment_names(
    directories: &[impl AsRef<Path>],
    override_labels: Option<&str>,
) -> Result<Vec<String>, ReportError> {
    let derived: Vec<String> = directories
        .iter()
        .enumerate()
        .map(|(index, dir)| {
            let raw = dir.as_ref().to_string_lossy();
            let base = raw
                .rsplit(['/', '\\'])
                .next()
                .unwrap_or_default()
                .to_string();
            if base.is_empty() {
                format!("experiment_{index}")
            } else {
                base
            }
        })
        .collect();
    apply_overrides(derived, override_labels)
}

/// Applies a comma-separated override list to raw query names under the
/// same exact-count invariant as experiment labels.
pub fn query_names(
    raw: Vec<String>,
    override_labels: Option<&str>,
) -> Result<Vec<String>, ReportError> {
    apply_overrides(raw, override_labels)
}

fn apply_overrides(
    names: Vec<String>,
    override_labels: Option<&str>,
) -> Result<Vec<String>, ReportError> {
    match override_labels {
        None | Some("") => Ok(names),
        Some(labels) => {
            let overridden: Vec<String> = labels.split(',').map(str::to_string).collect();
            if overridden.len() != names.len() {
                return Err(ReportError::LabelCountMismatch {
                    expected: names.len(),
                    actual: overridden.len(),
                });
            }
            Ok(overridden)
        }
    }
}

/// Renames the Nth insertion-ordered key to `labels[N]`, keeping each
/// value's positional association.
pub fn relabel<V>(map: OrderedMap<V>, labels: &[String]) -> OrderedMap<V> {
    map.into_entries()
        .into_iter()
        .zip(labels.iter())
        .map(|((_, value), label)| (label.clone(), value))
        .collect()
}

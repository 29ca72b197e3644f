//! `%NAME%` placeholder substitution for plot templates.

use anyhow::Context;
use std::path::Path;

/// Replaces every `%NAME%` occurrence (global, case-sensitive) with the
/// value's string form. Placeholders with no supplied value stay literal;
/// the shipped TeX templates place optional ones where `%` opens a TeX
/// comment, so leftovers are harmless by construction.
pub fn instantiate(template: &str, values: &[(&str, String)]) -> String {
    let mut contents = template.to_string();
    for (name, value) in values {
        contents = contents.replace(&format!("%{name}%"), value);
    }
    contents
}

/// Substitutes, runs the optional post-processing transform, and writes
/// the final document.
pub fn instantiate_to_file(
    template: &str,
    out_path: &Path,
    values: &[(&str, String)],
    modifier: Option<&dyn Fn(String) -> String>,
) -> anyhow::Result<()> {
    let mut contents = instantiate(template, values);
    if let Some(modifier) = modifier {
        contents = modifier(contents);
    }
    std::fs::write(out_path, contents)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{instantiate, instantiate_to_file};

    #[test]
    fn replaces_all_known_placeholders() {
        let result = instantiate(
            "Hello %NAME%, total=%N%",
            &[("NAME", "X".to_string()), ("N", "3".to_string())],
        );
        assert_eq!(result, "Hello X, total=3");
    }

    #[test]
    fn repeated_placeholders_are_all_replaced() {
        let result = instantiate("%A% + %A%", &[("A", "1".to_string())]);
        assert_eq!(result, "1 + 1");
    }

    #[test]
    fn unknown_placeholders_stay_literal() {
        let result = instantiate("keep %MISSING% as-is", &[("OTHER", "x".to_string())]);
        assert_eq!(result, "keep %MISSING% as-is");
    }

    #[test]
    fn modifier_runs_after_substitution() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.txt");
        instantiate_to_file(
            "value=%V%",
            &out,
            &[("V", "1".to_string())],
            Some(&|contents: String| contents.replace("value", "final")),
        )
        .unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "final=1");
    }
}

use anyhow::Context;
use std::borrow::Cow;
use std::path::PathBuf;

/// Common data when running a command: built once per invocation and
/// passed through the pipeline instead of living in process globals.
pub struct TaskContext {
    /// Directory output files are written to (and the renderer runs in).
    pub cwd: PathBuf,
    pub verbose: bool,
    /// Overrides the embedded plot templates when set.
    pub templates_root: Option<PathBuf>,
}

impl TaskContext {
    /// Resolves a plot template: a file under `templates_root` when one is
    /// configured, the embedded default otherwise.
    pub fn template(&self, name: &str, embedded: &'static str) -> anyhow::Result<Cow<'static, str>> {
        match &self.templates_root {
            Some(root) => {
                let path = root.join(name);
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read template {}", path.display()))?;
                Ok(Cow::Owned(contents))
            }
            None => Ok(Cow::Borrowed(embedded)),
        }
    }
}

use thiserror::Error;

/// Fatal error categories of the reporting pipeline.
///
/// Numeric edge cases (empty sample sets, missing fields, zero
/// denominators) are deliberately NOT errors; they resolve to NaN or a
/// documented fallback so batch report generation survives partial data.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid label override: expected {expected} labels while {actual} were given")]
    LabelCountMismatch { expected: usize, actual: usize },

    #[error("tried to combine experiments with different query sets")]
    QuerySetMismatch,

    #[error("no queries could be found")]
    NoQueries,

    #[error("unsupported correctness reference with type '{0}'")]
    UnsupportedReference(String),

    #[error("malformed input in {path} (line {line}): {message}")]
    Parse {
        path: String,
        line: usize,
        message: String,
    },

    #[error("{command} failed with status {status}:\n{output}")]
    Renderer {
        command: String,
        status: i32,
        output: String,
    },
}

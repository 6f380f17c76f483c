use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Recoverable failures raised while extracting a single field.
///
/// Neither variant aborts a run: the orchestrator turns them into
/// [`Diagnostic`](crate::engine::Diagnostic) records and empty defaults.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid pattern for field '{field}': {source} (pattern: {pattern})")]
    PatternCompile {
        field: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("date component '{component}' is not an integer: {raw:?}")]
    DateComponent {
        component: &'static str,
        raw: String,
    },
}

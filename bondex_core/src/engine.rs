//! Extraction orchestration.
//!
//! For every field of every group the engine resolves a pattern, scans the
//! text, and shapes the matches. A failing field degrades to its empty value
//! and a [`Diagnostic`]; siblings and later groups are unaffected.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::field::{FieldMap, MatchGroup, PatternSource};
use crate::postprocess::Processed;
use crate::{matcher, patterns, postprocess};

/// A recovered per-field failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Index of the group in the request.
    pub group: usize,
    pub field: String,
    pub message: String,
}

/// Results plus the diagnostics raised while producing them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// One mapping per input group, in input order.
    pub results: Vec<FieldMap>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl ExtractionReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    fn record(&mut self, group: usize, field: &str, error: &Error) {
        warn!(group, field, "{error}");
        self.diagnostics.push(Diagnostic {
            group,
            field: field.to_string(),
            message: error.to_string(),
        });
    }
}

/// Stateless field extractor.
///
/// Holds nothing between calls; the builtin registry is the only shared state
/// and it is read-only, so one extractor can serve any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor;

impl Extractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Extract every group from `text`.
    #[must_use]
    pub fn run(&self, text: &str, groups: &[MatchGroup]) -> ExtractionReport {
        let mut report = ExtractionReport {
            results: Vec::with_capacity(groups.len()),
            diagnostics: Vec::new(),
        };

        for (index, group) in groups.iter().enumerate() {
            let mut values = FieldMap::with_capacity(group.len());
            for (key, source) in group {
                let processed = Self::extract_field(text, key, source).unwrap_or_else(|e| {
                    report.record(index, key, &e);
                    postprocess::empty_value(key).into()
                });
                for fallback in &processed.fallbacks {
                    report.record(index, key, fallback);
                }
                values.insert(key.clone(), processed.value);
            }
            report.results.push(values);
        }

        report
    }

    /// Resolve, scan and shape a single field.
    ///
    /// Date components that had to fall back to raw text come back in
    /// [`Processed::fallbacks`] next to the value.
    ///
    /// # Errors
    /// Returns [`crate::Error::PatternCompile`] when the resolved pattern is
    /// not a valid regex.
    pub fn extract_field(text: &str, key: &str, source: &PatternSource) -> Result<Processed> {
        let resolved = patterns::resolve(key, source);
        debug!(
            field = key,
            origin = resolved.origin.as_str(),
            pattern = %resolved.source,
            "resolved pattern"
        );

        let matches = matcher::execute(key, text, &resolved.source)?;
        Ok(postprocess::process(key, &matches))
    }
}

/// Extract `groups` from `text`; diagnostics are only logged.
#[must_use]
pub fn extract_fields(text: &str, groups: &[MatchGroup]) -> Vec<FieldMap> {
    Extractor::new().run(text, groups).results
}

//! Parallel extraction over many documents.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::engine::{ExtractionReport, Extractor};
use crate::field::MatchGroup;

/// A document handed to [`extract_batch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Where the text came from (file path, listing id, `-` for stdin).
    pub source: String,
    pub text: String,
}

impl Document {
    #[must_use]
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
        }
    }
}

/// Extraction output for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentResult {
    pub source: String,
    /// Hex SHA-256 of the document text.
    pub digest: String,
    #[serde(flatten)]
    pub report: ExtractionReport,
}

/// Hex-encoded SHA-256 digest of `text`.
#[must_use]
pub fn content_digest(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Run the same groups over every document; output order follows input order.
#[must_use]
pub fn extract_batch(documents: &[Document], groups: &[MatchGroup]) -> Vec<DocumentResult> {
    let extractor = Extractor::new();
    documents
        .par_iter()
        .map(|doc| DocumentResult {
            source: doc.source.clone(),
            digest: content_digest(&doc.text),
            report: extractor.run(&doc.text, groups),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ExtractedValue, PatternSource};

    #[test]
    fn digest_is_stable_hex() {
        let a = content_digest("股票代码：600900.SH");
        let b = content_digest("股票代码：600900.SH");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, content_digest("股票代码：600901.SH"));
    }

    #[test]
    fn batch_keeps_document_order() {
        let docs: Vec<Document> = (0..32)
            .map(|i| Document::new(format!("doc-{i}"), format!("数量：{i}")))
            .collect();
        let mut group = MatchGroup::new();
        group.insert("数量".to_string(), PatternSource::Predefined);

        let results = extract_batch(&docs, &[group]);

        assert_eq!(results.len(), docs.len());
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.source, format!("doc-{i}"));
            assert_eq!(
                result.report.results[0]["数量"],
                ExtractedValue::scalar(i.to_string())
            );
        }
    }
}

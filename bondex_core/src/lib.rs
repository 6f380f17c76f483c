#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Declarative field extraction for bond disclosure text.
//!
//! Callers describe the fields they want as ordered [`MatchGroup`]s; each
//! field either names a builtin pattern (via [`PREDEFINED_SENTINEL`]) or
//! carries its own regex. [`extract_fields`] returns one [`FieldMap`] per
//! group with dates normalized to `YYYY-MM-DD`, security codes collected and
//! free text captured.
//!
//! ```
//! use bondex_core::{ExtractedValue, MatchGroup, PatternSource, extract_fields};
//!
//! let mut group = MatchGroup::new();
//! group.insert("stock-code".to_string(), PatternSource::Predefined);
//! group.insert("换股期限".to_string(), PatternSource::Predefined);
//!
//! let text = "stock-code: 600900.SH，2023年6月2日至2027年6月1日";
//! let results = extract_fields(text, &[group]);
//!
//! assert_eq!(results[0]["stock-code"], ExtractedValue::scalar("600900.SH"));
//! assert_eq!(
//!     results[0]["换股期限"],
//!     ExtractedValue::list(["2023-06-02", "2027-06-01"])
//! );
//! ```

pub mod batch;
pub mod date;
pub mod engine;
mod error;
pub mod field;
pub mod matcher;
pub mod patterns;
pub mod postprocess;

pub use batch::{Document, DocumentResult, content_digest, extract_batch};
pub use engine::{Diagnostic, ExtractionReport, Extractor, extract_fields};
pub use error::{Error, Result};
pub use field::{
    ExtractedValue, FieldMap, MatchGroup, PREDEFINED_SENTINEL, PatternSource, RawMatch,
};
pub use patterns::{FieldKind, PredefinedPattern, builtin_patterns};
pub use postprocess::Processed;

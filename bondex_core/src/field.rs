//! Field request and result types.
//!
//! A [`MatchGroup`] maps field keys to a [`PatternSource`]; extracting it yields
//! a [`FieldMap`] with exactly one [`ExtractedValue`] per key, in request order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sentinel pattern value meaning "resolve through the pattern registry".
pub const PREDEFINED_SENTINEL: &str = "*自定义*";

/// Ordered set of field requests evaluated together.
pub type MatchGroup = IndexMap<String, PatternSource>;

/// Ordered extraction result for one [`MatchGroup`].
pub type FieldMap = IndexMap<String, ExtractedValue>;

/// Where a field's regular expression comes from.
///
/// Serialized as a plain string: the [`PREDEFINED_SENTINEL`] selects the
/// registry, anything else is a custom regex used verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum PatternSource {
    #[default]
    Predefined,
    Custom(String),
}

impl PatternSource {
    #[must_use]
    pub fn custom(pattern: impl Into<String>) -> Self {
        Self::Custom(pattern.into())
    }

    #[must_use]
    pub const fn is_predefined(&self) -> bool {
        matches!(self, Self::Predefined)
    }
}

impl From<&str> for PatternSource {
    fn from(raw: &str) -> Self {
        if raw == PREDEFINED_SENTINEL {
            Self::Predefined
        } else {
            Self::Custom(raw.to_string())
        }
    }
}

impl From<String> for PatternSource {
    fn from(raw: String) -> Self {
        if raw == PREDEFINED_SENTINEL {
            Self::Predefined
        } else {
            Self::Custom(raw)
        }
    }
}

impl From<PatternSource> for String {
    fn from(source: PatternSource) -> Self {
        match source {
            PatternSource::Predefined => PREDEFINED_SENTINEL.to_string(),
            PatternSource::Custom(pattern) => pattern,
        }
    }
}

/// Final, shaped value of one field.
///
/// An empty result is `Scalar("")` for scalar-shaped fields and `List([])`
/// for the exchange-window range field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExtractedValue {
    Scalar(String),
    List(Vec<String>),
}

impl ExtractedValue {
    #[must_use]
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    #[must_use]
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Scalar(_) => None,
            Self::List(items) => Some(items),
        }
    }

    /// True for `""` and `[]`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }
}

impl Default for ExtractedValue {
    fn default() -> Self {
        Self::Scalar(String::new())
    }
}

/// Unprocessed result of one regex occurrence.
///
/// Patterns with zero or one capture group produce [`RawMatch::Text`]; two or
/// more groups produce a [`RawMatch::Tuple`] with one entry per group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawMatch {
    Text(String),
    Tuple(Vec<String>),
}

impl RawMatch {
    /// The bare string, or the first tuple component (`""` for an empty tuple).
    #[must_use]
    pub fn first(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::Tuple(parts) => parts.first().map_or("", String::as_str),
        }
    }
}

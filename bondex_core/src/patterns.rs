//! Builtin pattern registry.
//!
//! The table is process-wide and immutable. Every builtin field is addressable
//! by its Han-script key and by a Latin alias, and its label accepts either
//! spelling. Fields outside the table fall back to a keyed template.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::field::PatternSource;

/// Closed classification that decides how raw matches are shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum FieldKind {
    /// Calendar dates assembled from (year, month, day) captures.
    Date = 0,
    /// Security codes: scalar for one match, list for several.
    Code = 1,
    /// Everything else.
    #[default]
    Generic = 2,
}

impl FieldKind {
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Date => "date",
            Self::Code => "code",
            Self::Generic => "generic",
        }
    }

    /// Classify a field key; keys absent from the builtin table are generic.
    #[must_use]
    pub fn classify(key: &str) -> Self {
        lookup(key).map_or(Self::Generic, |p| p.kind)
    }

    /// The exchange window is the only list-shaped date field.
    #[must_use]
    pub fn is_range_key(key: &str) -> bool {
        RANGE_KEYS.contains(&key)
    }
}

/// A builtin field definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredefinedPattern {
    pub key: &'static str,
    pub alias: &'static str,
    pub kind: FieldKind,
    pub template: &'static str,
}

/// A regex template with a `{key}` slot filled by the (escaped) field key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTemplate {
    template: &'static str,
}

impl KeyTemplate {
    pub const SLOT: &'static str = "{key}";

    #[must_use]
    pub const fn new(template: &'static str) -> Self {
        Self { template }
    }

    #[must_use]
    pub const fn template(&self) -> &'static str {
        self.template
    }

    #[must_use]
    pub fn render(&self, key: &str) -> String {
        self.template.replace(Self::SLOT, &regex::escape(key))
    }
}

/// Template for name-like fields; stops at Han clause punctuation.
pub const NAME_TEMPLATE: KeyTemplate = KeyTemplate::new(r"{key}[：:]\s*([^\n，。]+)");

/// Keys rendered through [`NAME_TEMPLATE`].
pub const NAME_ALIASES: &[&str] = &["名称", "简称", "name", "short-name"];

/// Fallback for unknown keys: the key, an optional colon, then the rest of the line.
pub const DEFAULT_TEMPLATE: KeyTemplate = KeyTemplate::new(r"{key}[：:]?\s*([^\n]+)");

const RANGE_KEYS: &[&str] = &["换股期限", "exchange-window"];

const STOCK_CODE: &str = r"(?:股票代码|stock-code)[：:]\s*([A-Z0-9]{6}\.[A-Z]{2})";

const BUILTIN_PATTERNS: &[PredefinedPattern] = &[
    // securities
    PredefinedPattern {
        key: "标的证券",
        alias: "underlying-security",
        kind: FieldKind::Code,
        template: STOCK_CODE,
    },
    PredefinedPattern {
        key: "股票代码",
        alias: "stock-code",
        kind: FieldKind::Code,
        template: STOCK_CODE,
    },
    PredefinedPattern {
        key: "基金代码",
        alias: "fund-code",
        kind: FieldKind::Code,
        template: r"(?:基金代码|fund-code)[：:]\s*([A-Z0-9]{6})",
    },
    PredefinedPattern {
        key: "债券代码",
        alias: "bond-code",
        kind: FieldKind::Code,
        template: r"(?:债券代码|bond-code)[：:]\s*([A-Z0-9]{6,})",
    },
    // dates
    PredefinedPattern {
        key: "换股期限",
        alias: "exchange-window",
        kind: FieldKind::Date,
        template: r"(\d{4})\s*年\s*(\d{1,2})\s*月\s*(\d{1,2})\s*日",
    },
    PredefinedPattern {
        key: "发行日期",
        alias: "issue-date",
        kind: FieldKind::Date,
        template: r"(?:发行日期|issue-date)[：:]\s*(\d{4})年(\d{1,2})月(\d{1,2})日",
    },
    PredefinedPattern {
        key: "起息日",
        alias: "value-date",
        kind: FieldKind::Date,
        template: r"(?:起息日|value-date)[：:]\s*(\d{4})[年/-](\d{1,2})[月/-](\d{1,2})日?",
    },
    PredefinedPattern {
        key: "到期日",
        alias: "maturity-date",
        kind: FieldKind::Date,
        template: r"(?:到期日|maturity-date)[：:]\s*(\d{4})[年/-](\d{1,2})[月/-](\d{1,2})日?",
    },
    PredefinedPattern {
        key: "日期",
        alias: "date",
        kind: FieldKind::Date,
        template: r"(\d{4})[年/-](\d{1,2})[月/-](\d{1,2})日?",
    },
    // amounts
    PredefinedPattern {
        key: "金额",
        alias: "amount",
        kind: FieldKind::Generic,
        template: r"(?:金额|amount)[：:]\s*([\d,]+\.?\d*)\s*[万元亿]?",
    },
    PredefinedPattern {
        key: "利率",
        alias: "interest-rate",
        kind: FieldKind::Generic,
        template: r"(?:利率|interest-rate)[：:]\s*([\d.]+)\s*%",
    },
    PredefinedPattern {
        key: "数量",
        alias: "quantity",
        kind: FieldKind::Generic,
        template: r"(?:数量|quantity)[：:]\s*(\d+)",
    },
    PredefinedPattern {
        key: "规模",
        alias: "scale",
        kind: FieldKind::Generic,
        template: r"(?:规模|scale)[：:]\s*([\d,]+\.?\d*)\s*[万元亿]?",
    },
    // contact details
    PredefinedPattern {
        key: "联系人",
        alias: "contact",
        kind: FieldKind::Generic,
        template: r"(?:联系人|contact)[：:]\s*([^\n]+)",
    },
    PredefinedPattern {
        key: "电话",
        alias: "phone",
        kind: FieldKind::Generic,
        template: r"(?:电话|phone)[：:]\s*([\d\-()\s]+)",
    },
    PredefinedPattern {
        key: "邮箱",
        alias: "email",
        kind: FieldKind::Generic,
        template: r"(?:邮箱|email)[：:]\s*([\w.-]+@[\w.-]+)",
    },
    PredefinedPattern {
        key: "地址",
        alias: "address",
        kind: FieldKind::Generic,
        template: r"(?:地址|address)[：:]\s*([^\n]+)",
    },
];

static BY_KEY: OnceLock<HashMap<&'static str, &'static PredefinedPattern>> = OnceLock::new();

/// Index of the builtin table by Han key and Latin alias.
fn by_key() -> &'static HashMap<&'static str, &'static PredefinedPattern> {
    BY_KEY.get_or_init(|| {
        BUILTIN_PATTERNS
            .iter()
            .flat_map(|p| [(p.key, p), (p.alias, p)])
            .collect()
    })
}

/// Builtin definitions in declaration order.
pub fn builtin_patterns() -> impl Iterator<Item = &'static PredefinedPattern> {
    BUILTIN_PATTERNS.iter()
}

/// Find the builtin definition for a Han key or Latin alias.
#[must_use]
pub fn lookup(key: &str) -> Option<&'static PredefinedPattern> {
    by_key().get(key).copied()
}

/// Which rule produced a resolved pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternOrigin {
    Custom,
    Builtin,
    Named,
    Synthesized,
}

impl PatternOrigin {
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Custom => "custom",
            Self::Builtin => "builtin",
            Self::Named => "named",
            Self::Synthesized => "synthesized",
        }
    }
}

/// The effective regex source for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPattern {
    pub origin: PatternOrigin,
    pub source: String,
}

/// Resolve the regex for `key`.
///
/// Precedence: custom pattern, builtin table, name template, synthesized
/// default. Never fails; a bad regex only surfaces when it is compiled.
#[must_use]
pub fn resolve(key: &str, source: &PatternSource) -> ResolvedPattern {
    if let PatternSource::Custom(pattern) = source {
        return ResolvedPattern {
            origin: PatternOrigin::Custom,
            source: pattern.clone(),
        };
    }

    if let Some(builtin) = lookup(key) {
        return ResolvedPattern {
            origin: PatternOrigin::Builtin,
            source: builtin.template.to_string(),
        };
    }

    if NAME_ALIASES.contains(&key) {
        return ResolvedPattern {
            origin: PatternOrigin::Named,
            source: NAME_TEMPLATE.render(key),
        };
    }

    ResolvedPattern {
        origin: PatternOrigin::Synthesized,
        source: DEFAULT_TEMPLATE.render(key),
    }
}

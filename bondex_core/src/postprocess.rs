//! Shaping raw matches into field values.
//!
//! The field key decides the [`FieldKind`], and the kind decides whether the
//! matches collapse to a scalar, stay a list, or fall back to the empty
//! default.

use tracing::debug;

use crate::date;
use crate::error::Error;
use crate::field::{ExtractedValue, RawMatch};
use crate::patterns::FieldKind;

/// How many dates the range field keeps.
const RANGE_LEN: usize = 2;

/// A shaped value plus the recoverable errors hit while shaping it.
#[derive(Debug, Default)]
pub struct Processed {
    pub value: ExtractedValue,
    /// Date components that fell back to raw text.
    pub fallbacks: Vec<Error>,
}

impl From<ExtractedValue> for Processed {
    fn from(value: ExtractedValue) -> Self {
        Self {
            value,
            fallbacks: Vec::new(),
        }
    }
}

/// Value reported for `key` when nothing usable matched.
#[must_use]
pub fn empty_value(key: &str) -> ExtractedValue {
    if FieldKind::is_range_key(key) {
        ExtractedValue::List(Vec::new())
    } else {
        ExtractedValue::default()
    }
}

/// Shape `matches` for `key` according to its kind.
#[must_use]
pub fn process(key: &str, matches: &[RawMatch]) -> Processed {
    if matches.is_empty() {
        return empty_value(key).into();
    }

    match FieldKind::classify(key) {
        FieldKind::Date => shape_dates(key, matches),
        FieldKind::Code => shape_codes(matches).into(),
        FieldKind::Generic => shape_generic(matches).into(),
    }
}

fn shape_dates(key: &str, matches: &[RawMatch]) -> Processed {
    let range = FieldKind::is_range_key(key);
    let limit = if range { RANGE_LEN } else { 1 };
    let mut dates = Vec::with_capacity(limit);
    let mut fallbacks = Vec::new();

    for m in matches {
        if dates.len() == limit {
            break;
        }
        match m {
            RawMatch::Tuple(parts) => {
                let [y, mo, d, ..] = parts.as_slice() else {
                    debug!(field = key, ?m, "too few date components, skipped");
                    continue;
                };
                dates.push(date::try_normalize(y, mo, d).unwrap_or_else(|e| {
                    fallbacks.push(e);
                    date::raw_join(y, mo, d)
                }));
            }
            // bare strings are kept as captured
            RawMatch::Text(s) => dates.push(s.clone()),
        }
    }

    let value = if range {
        ExtractedValue::List(dates)
    } else {
        dates
            .into_iter()
            .next()
            .map_or_else(ExtractedValue::default, ExtractedValue::Scalar)
    };
    Processed { value, fallbacks }
}

fn shape_codes(matches: &[RawMatch]) -> ExtractedValue {
    match matches {
        [single] => ExtractedValue::scalar(single.first()),
        many => ExtractedValue::List(many.iter().map(|m| m.first().to_string()).collect()),
    }
}

fn shape_generic(matches: &[RawMatch]) -> ExtractedValue {
    match matches {
        // a lone bare string is kept even when empty; a tuple needs a non-empty part
        [RawMatch::Text(s)] => ExtractedValue::Scalar(s.clone()),
        [RawMatch::Tuple(parts)] => parts
            .iter()
            .find(|p| !p.is_empty())
            .map_or_else(ExtractedValue::default, |p| ExtractedValue::Scalar(p.clone())),
        many => {
            let mut flat = Vec::new();
            for m in many {
                match m {
                    RawMatch::Text(s) => flat.push(s.clone()),
                    RawMatch::Tuple(parts) => {
                        flat.extend(parts.iter().filter(|p| !p.is_empty()).cloned());
                    }
                }
            }
            ExtractedValue::List(flat)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(key: &str, matches: &[RawMatch]) -> ExtractedValue {
        process(key, matches).value
    }

    fn text(s: &str) -> RawMatch {
        RawMatch::Text(s.to_string())
    }

    fn tuple(parts: &[&str]) -> RawMatch {
        RawMatch::Tuple(parts.iter().map(|s| (*s).to_string()).collect())
    }

    #[test]
    fn empty_defaults() {
        assert_eq!(shape("到期日", &[]), ExtractedValue::scalar(""));
        assert_eq!(shape("换股期限", &[]), ExtractedValue::List(Vec::new()));
        assert_eq!(shape("exchange-window", &[]), ExtractedValue::List(Vec::new()));
        assert_eq!(shape("issuer", &[]), ExtractedValue::scalar(""));
    }

    #[test]
    fn range_keeps_first_two_dates() {
        let matches = [
            tuple(&["2023", "6", "2"]),
            tuple(&["2027", "6", "1"]),
            tuple(&["2030", "1", "1"]),
        ];
        assert_eq!(
            shape("换股期限", &matches),
            ExtractedValue::list(["2023-06-02", "2027-06-01"])
        );
    }

    #[test]
    fn range_with_one_date_is_short_list() {
        let matches = [tuple(&["2023", "6", "2"])];
        assert_eq!(
            shape("exchange-window", &matches),
            ExtractedValue::list(["2023-06-02"])
        );
    }

    #[test]
    fn single_date_takes_first() {
        let matches = [tuple(&["2023", "6", "2"]), tuple(&["2024", "7", "3"])];
        assert_eq!(shape("起息日", &matches), ExtractedValue::scalar("2023-06-02"));
    }

    #[test]
    fn date_shaped_text_kept_verbatim() {
        let matches = [text("2023年6月2日")];
        assert_eq!(shape("日期", &matches), ExtractedValue::scalar("2023年6月2日"));
    }

    #[test]
    fn bare_strings_kept_short_tuples_dropped() {
        assert_eq!(shape("发行日期", &[text("20230602")]), ExtractedValue::scalar("20230602"));
        assert_eq!(
            shape("换股期限", &[tuple(&["2023", "6"]), text("soon"), text("later")]),
            ExtractedValue::list(["soon", "later"])
        );
        assert_eq!(shape("到期日", &[tuple(&["2023", "6"])]), ExtractedValue::scalar(""));
    }

    #[test]
    fn non_numeric_date_falls_back() {
        let processed = process("到期日", &[tuple(&["2023", "六", "2"])]);
        assert_eq!(processed.value, ExtractedValue::scalar("2023-六-2"));
        assert_eq!(processed.fallbacks.len(), 1);
        assert!(matches!(
            processed.fallbacks[0],
            Error::DateComponent { component: "month", .. }
        ));
    }

    #[test]
    fn fallbacks_only_for_kept_dates() {
        let matches = [
            tuple(&["2023", "6", "2"]),
            tuple(&["2024", "x", "1"]),
            tuple(&["2025", "y", "1"]),
        ];
        assert_eq!(process("起息日", &matches).fallbacks.len(), 0);
        assert_eq!(process("换股期限", &matches).fallbacks.len(), 1);
    }

    #[test]
    fn code_single_is_scalar() {
        assert_eq!(
            shape("股票代码", &[text("600900.SH")]),
            ExtractedValue::scalar("600900.SH")
        );
        assert_eq!(
            shape("bond-code", &[tuple(&["143001", "SH"])]),
            ExtractedValue::scalar("143001")
        );
    }

    #[test]
    fn code_many_is_list_of_first_components() {
        let matches = [text("600900.SH"), tuple(&["000001.SZ", "x"]), text("601988.SH")];
        let value = shape("标的证券", &matches);
        assert_eq!(
            value,
            ExtractedValue::list(["600900.SH", "000001.SZ", "601988.SH"])
        );
        assert_eq!(value.as_list().map(<[String]>::len), Some(matches.len()));
    }

    #[test]
    fn generic_tuple_picks_first_non_empty() {
        assert_eq!(
            shape("issuer", &[tuple(&["", "长江电力", ""])]),
            ExtractedValue::scalar("长江电力")
        );
    }

    #[test]
    fn generic_empty_asymmetry() {
        assert_eq!(shape("issuer", &[tuple(&["", ""])]), ExtractedValue::scalar(""));
        assert_eq!(shape("issuer", &[text("")]), ExtractedValue::scalar(""));
        // the bare string survives flattening even when empty
        assert_eq!(
            shape("issuer", &[text(""), tuple(&["", ""])]),
            ExtractedValue::list([""])
        );
    }

    #[test]
    fn generic_many_flattens() {
        let matches = [tuple(&["a", "", "b"]), text("c"), tuple(&["", "d"])];
        assert_eq!(
            shape("联系人", &matches),
            ExtractedValue::list(["a", "b", "c", "d"])
        );
    }
}

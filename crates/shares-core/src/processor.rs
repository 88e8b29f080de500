//! Extremum extraction from disclosure payloads.
//!
//! [`ExtremumProcessor`] validates the payload shape, keeps observations whose
//! fiscal year is after the cutoff and whose value is numeric, and reduces them
//! to the maximum and minimum by value. It has no side effects.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    config::DEFAULT_FISCAL_YEAR_CUTOFF,
    error::{Result, SharesError},
    types::{DisclosurePayload, ExtremumPair, ExtremumPoint, Observation, Snapshot},
};

/// Reduces a disclosure payload to a [`Snapshot`].
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use shares_core::ExtremumProcessor;
///
/// let payload = json!({
///     "entityName": "ACME",
///     "units": { "shares": [
///         { "fy": "2019", "val": 500 },
///         { "fy": "2021", "val": 900 },
///         { "fy": "2022", "val": 300 }
///     ]}
/// });
///
/// let snapshot = ExtremumProcessor::default().process(&payload).unwrap();
/// assert_eq!(snapshot.max.val, 900.0);
/// assert_eq!(snapshot.min.fy, "2022");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtremumProcessor {
    cutoff: String,
}

impl Default for ExtremumProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_FISCAL_YEAR_CUTOFF)
    }
}

impl ExtremumProcessor {
    /// Create a processor keeping fiscal years strictly greater than `cutoff`.
    pub fn new(cutoff: impl Into<String>) -> Self {
        Self {
            cutoff: cutoff.into(),
        }
    }

    /// The fiscal-year cutoff in use.
    #[must_use]
    pub fn cutoff(&self) -> &str {
        &self.cutoff
    }

    /// Validates and reduces `payload`.
    ///
    /// # Errors
    /// Returns [`SharesError::InvalidStructure`] if the payload lacks a non-empty
    /// `entityName` string or a `units.shares` array, and
    /// [`SharesError::EmptyAfterFilter`] if no observation survives filtering.
    pub fn process(&self, payload: &Value) -> Result<Snapshot> {
        let payload = validate(payload)?;
        let observations = self.filter(&payload.units.shares);

        debug!(
            entity = %payload.entity_name,
            total = payload.units.shares.len(),
            kept = observations.len(),
            cutoff = %self.cutoff,
            "Filtered shares observations"
        );

        let pair = reduce_extremes(&observations).ok_or_else(|| SharesError::EmptyAfterFilter {
            cutoff: self.cutoff.clone(),
        })?;

        Ok(Snapshot::new(payload.entity_name, pair))
    }

    /// Keeps entries with a fiscal year after the cutoff and a numeric value.
    ///
    /// Order is preserved. Entries that are not objects are skipped.
    #[must_use]
    pub fn filter(&self, entries: &[Value]) -> Vec<Observation> {
        entries
            .iter()
            .filter_map(|entry| {
                let fiscal_year = fiscal_year_after(entry.get("fy"), &self.cutoff)?;
                let value = coerce_number(entry.get("val"));
                (!value.is_nan()).then(|| Observation::new(fiscal_year, value))
            })
            .collect()
    }
}

/// Checks the payload shape and returns its typed view.
///
/// # Errors
/// Returns [`SharesError::InvalidStructure`] when `entityName` is missing,
/// empty, or not a string, or when `units.shares` is missing or not an array.
pub fn validate(payload: &Value) -> Result<DisclosurePayload> {
    let payload = DisclosurePayload::deserialize(payload)
        .map_err(|e| SharesError::InvalidStructure(e.to_string()))?;

    if payload.entity_name.is_empty() {
        return Err(SharesError::InvalidStructure(
            "entityName is empty".to_string(),
        ));
    }

    Ok(payload)
}

/// Finds the maximum and minimum observations by value.
///
/// Each side is a single scan that only replaces the current best on a strict
/// improvement, so ties keep the earliest observation. Returns `None` for an
/// empty slice.
#[must_use]
pub fn reduce_extremes(observations: &[Observation]) -> Option<ExtremumPair> {
    let first = observations.first()?;
    let mut max = first;
    let mut min = first;

    for obs in &observations[1..] {
        if obs.value > max.value {
            max = obs;
        }
        if obs.value < min.value {
            min = obs;
        }
    }

    Some(ExtremumPair {
        max: ExtremumPoint::from(max),
        min: ExtremumPoint::from(min),
    })
}

/// Returns the fiscal year as text if it is after `cutoff`.
///
/// Text years compare lexicographically against the cutoff. Numeric years
/// compare numerically against the cutoff read as a number. Anything else is
/// never after the cutoff.
fn fiscal_year_after(fy: Option<&Value>, cutoff: &str) -> Option<String> {
    match fy? {
        Value::String(year) => (year.as_str() > cutoff).then(|| year.clone()),
        Value::Number(year) => {
            let numeric = year.as_f64()?;
            (numeric > string_to_number(cutoff)).then(|| year.to_string())
        }
        _ => None,
    }
}

/// Coerces a JSON value to a number the way loosely typed hosts do.
///
/// Missing values and objects are NaN, `null` is 0, booleans are 0 or 1, and
/// strings go through [`string_to_number`]. An empty array is 0 and a
/// one-element array coerces like its element.
#[must_use]
pub fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        None | Some(Value::Object(_)) => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => string_to_number(s),
        Some(Value::Array(items)) => match items.as_slice() {
            [] => 0.0,
            // Arrays coerce through their text, where `true` is not numeric.
            [Value::Bool(_)] => f64::NAN,
            [single] => coerce_number(Some(single)),
            _ => f64::NAN,
        },
    }
}

/// Parses numeric text.
///
/// Surrounding whitespace is ignored and empty text is 0. Accepts decimal
/// literals with optional sign and exponent, `Infinity` with optional sign, and
/// unsigned `0x`/`0o`/`0b` integers. Everything else is NaN.
#[must_use]
pub fn string_to_number(text: &str) -> f64 {
    let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&text[2..], radix);
    }

    let is_decimal = text.bytes().any(|b| b.is_ascii_digit())
        && text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !is_decimal {
        return f64::NAN;
    }

    text.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
    .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obs(fy: &str, value: f64) -> Observation {
        Observation::new(fy, value)
    }

    #[test]
    fn test_cutoff_is_strict() {
        let processor = ExtremumProcessor::default();
        let kept = processor.filter(&[
            json!({ "fy": "2020", "val": 1 }),
            json!({ "fy": "2021", "val": 2 }),
        ]);

        assert_eq!(kept, vec![obs("2021", 2.0)]);
    }

    #[test]
    fn test_numeric_strings_are_coerced() {
        let processor = ExtremumProcessor::default();
        let kept = processor.filter(&[
            json!({ "fy": "2021", "val": "abc" }),
            json!({ "fy": "2022", "val": "1234" }),
            json!({ "fy": "2023" }),
            json!({ "fy": "2023", "val": { "n": 1 } }),
        ]);

        assert_eq!(kept, vec![obs("2022", 1234.0)]);
    }

    #[test]
    fn test_fiscal_year_comparison_is_lexicographic() {
        let processor = ExtremumProcessor::default();
        let kept = processor.filter(&[
            json!({ "fy": "999", "val": 1 }),
            json!({ "fy": "20201", "val": 2 }),
            json!({ "fy": "10000", "val": 3 }),
            json!({ "fy": "FY21", "val": 4 }),
        ]);

        // "999" and "FY21" sort after "2020"; "10000" sorts before it.
        assert_eq!(
            kept,
            vec![obs("999", 1.0), obs("20201", 2.0), obs("FY21", 4.0)]
        );
    }

    #[test]
    fn test_numeric_fiscal_years_compare_numerically() {
        let processor = ExtremumProcessor::default();
        let kept = processor.filter(&[
            json!({ "fy": 2020, "val": 1 }),
            json!({ "fy": 2021, "val": 2 }),
            json!({ "fy": null, "val": 3 }),
            json!({ "val": 4 }),
            json!(42),
        ]);

        assert_eq!(kept, vec![obs("2021", 2.0)]);
    }

    #[test]
    fn test_max_tie_keeps_first() {
        let pair = reduce_extremes(&[obs("2021", 100.0), obs("2022", 100.0)]).unwrap();
        assert_eq!(pair.max.fy, "2021");
        assert_eq!(pair.min.fy, "2021");
    }

    #[test]
    fn test_min_tie_keeps_first() {
        let pair = reduce_extremes(&[
            obs("2021", 500.0),
            obs("2022", 100.0),
            obs("2023", 100.0),
            obs("2024", 500.0),
        ])
        .unwrap();
        assert_eq!(pair.max.fy, "2021");
        assert_eq!(pair.min.fy, "2022");
    }

    #[test]
    fn test_reduce_empty_is_none() {
        assert!(reduce_extremes(&[]).is_none());
    }

    #[test]
    fn test_max_never_below_min() {
        let mut state: u64 = 0x5eed;
        let mut next = || {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            state >> 33
        };

        for _ in 0..500 {
            let len = 1 + (next() % 12) as usize;
            let observations: Vec<_> = (0..len)
                .map(|i| {
                    let value = (next() % 2_000_000) as f64 - 1_000_000.0;
                    obs(&format!("{}", 2021 + i), value)
                })
                .collect();

            let pair = reduce_extremes(&observations).unwrap();
            assert!(pair.max.val >= pair.min.val, "{observations:?}");
            assert!(observations.iter().all(|o| o.value <= pair.max.val));
            assert!(observations.iter().all(|o| o.value >= pair.min.val));
        }

        for values in [
            &[f64::INFINITY, 1.0][..],
            &[-5.0, f64::NEG_INFINITY, 12.0, 12.0],
        ] {
            let observations: Vec<_> = values
                .iter()
                .enumerate()
                .map(|(i, v)| obs(&format!("202{}", i + 1), *v))
                .collect();
            let pair = reduce_extremes(&observations).unwrap();
            assert!(pair.max.val >= pair.min.val, "{values:?}");
        }
    }

    #[test]
    fn test_acme_scenario() {
        let payload = json!({
            "entityName": "ACME",
            "units": { "shares": [
                { "fy": "2019", "val": 500 },
                { "fy": "2021", "val": 900 },
                { "fy": "2022", "val": 300 }
            ]}
        });

        let snapshot = ExtremumProcessor::default().process(&payload).unwrap();
        assert_eq!(snapshot.entity_name, "ACME");
        assert_eq!(snapshot.max, ExtremumPoint::new(900.0, "2021"));
        assert_eq!(snapshot.min, ExtremumPoint::new(300.0, "2022"));
    }

    #[test]
    fn test_all_at_cutoff_is_empty() {
        let payload = json!({
            "entityName": "ACME",
            "units": { "shares": [
                { "fy": "2020", "val": 500 },
                { "fy": "2020", "val": 900 }
            ]}
        });

        let err = ExtremumProcessor::default().process(&payload).unwrap_err();
        assert_eq!(
            err,
            SharesError::EmptyAfterFilter {
                cutoff: "2020".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_structure() {
        let processor = ExtremumProcessor::default();
        for payload in [
            json!(null),
            json!({ "units": { "shares": [] } }),
            json!({ "entityName": "", "units": { "shares": [] } }),
            json!({ "entityName": 12, "units": { "shares": [] } }),
            json!({ "entityName": "ACME" }),
            json!({ "entityName": "ACME", "units": {} }),
            json!({ "entityName": "ACME", "units": { "shares": "many" } }),
        ] {
            assert!(
                matches!(
                    processor.process(&payload),
                    Err(SharesError::InvalidStructure(_))
                ),
                "{payload}"
            );
        }
    }

    #[test]
    fn test_custom_cutoff() {
        let payload = json!({
            "entityName": "ACME",
            "units": { "shares": [
                { "fy": "2021", "val": 1 },
                { "fy": "2023", "val": 2 }
            ]}
        });

        let snapshot = ExtremumProcessor::new("2022").process(&payload).unwrap();
        assert_eq!(snapshot.max, ExtremumPoint::new(2.0, "2023"));
        assert_eq!(snapshot.min, ExtremumPoint::new(2.0, "2023"));
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(Some(&json!(12.5))), 12.5);
        assert_eq!(coerce_number(Some(&json!(null))), 0.0);
        assert_eq!(coerce_number(Some(&json!(true))), 1.0);
        assert_eq!(coerce_number(Some(&json!(false))), 0.0);
        assert_eq!(coerce_number(Some(&json!([]))), 0.0);
        assert_eq!(coerce_number(Some(&json!(["7"]))), 7.0);
        assert!(coerce_number(Some(&json!([1, 2]))).is_nan());
        assert_eq!(coerce_number(Some(&json!([[5]]))), 5.0);
        assert_eq!(coerce_number(Some(&json!([["7"]]))), 7.0);
        assert_eq!(coerce_number(Some(&json!([[null]]))), 0.0);
        assert!(coerce_number(Some(&json!([true]))).is_nan());
        assert!(coerce_number(Some(&json!([[1, 2]]))).is_nan());
        assert!(coerce_number(Some(&json!({}))).is_nan());
        assert!(coerce_number(None).is_nan());
    }

    #[test]
    fn test_string_to_number() {
        assert_eq!(string_to_number("  42 "), 42.0);
        assert_eq!(string_to_number(""), 0.0);
        assert_eq!(string_to_number("-1.5e3"), -1500.0);
        assert_eq!(string_to_number(".5"), 0.5);
        assert_eq!(string_to_number("0x1F"), 31.0);
        assert_eq!(string_to_number("0b101"), 5.0);
        assert_eq!(string_to_number("0o17"), 15.0);
        assert_eq!(string_to_number("Infinity"), f64::INFINITY);
        assert_eq!(string_to_number("-Infinity"), f64::NEG_INFINITY);
        assert!(string_to_number("inf").is_nan());
        assert!(string_to_number("NaN").is_nan());
        assert!(string_to_number("12abc").is_nan());
        assert!(string_to_number("0x").is_nan());
        assert!(string_to_number("1,000").is_nan());
        assert!(string_to_number("e5").is_nan());
    }
}

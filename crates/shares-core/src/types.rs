//! Core data types for the shares-outstanding pipeline.
//!
//! This module defines the data structures that flow through the pipeline:
//!
//! - [`DisclosurePayload`] - Schema-validated view of the remote payload
//! - [`Observation`] - A single filtered shares-outstanding observation
//! - [`ExtremumPoint`] - A value together with its fiscal year
//! - [`ExtremumPair`] - The maximum and minimum points of a filtered set
//! - [`Snapshot`] - The persisted, renderable result

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Schema-validated disclosure payload.
///
/// Only `entityName` and `units.shares` are required; every other field of the
/// remote document is ignored. Entries of `units.shares` stay untyped until the
/// filter step decides which of them count as observations.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DisclosurePayload {
    /// Registrant name as reported by the service.
    #[serde(rename = "entityName")]
    pub entity_name: String,
    /// Observation collections keyed by unit.
    pub units: DisclosureUnits,
}

/// The `units` object of a disclosure payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DisclosureUnits {
    /// Raw share-count entries, each expected to carry `fy` and `val`.
    pub shares: Vec<Value>,
}

/// A single shares-outstanding observation that passed the filter.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    /// Fiscal year as text (e.g. `"2021"`).
    pub fiscal_year: String,
    /// Reported value after numeric coercion.
    pub value: f64,
}

impl Observation {
    /// Creates a new observation.
    #[must_use]
    pub fn new(fiscal_year: impl Into<String>, value: f64) -> Self {
        Self {
            fiscal_year: fiscal_year.into(),
            value,
        }
    }
}

/// A value paired with the fiscal year it was reported for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtremumPoint {
    /// Reported value.
    pub val: f64,
    /// Fiscal year of the observation.
    #[serde(default, deserialize_with = "fiscal_year_text")]
    pub fy: String,
}

impl ExtremumPoint {
    /// Creates a new point.
    #[must_use]
    pub fn new(val: f64, fy: impl Into<String>) -> Self {
        Self { val, fy: fy.into() }
    }
}

impl From<&Observation> for ExtremumPoint {
    fn from(obs: &Observation) -> Self {
        Self::new(obs.value, obs.fiscal_year.clone())
    }
}

/// Maximum and minimum of a non-empty filtered observation set.
///
/// `max.val >= min.val` always holds for pairs produced by the processor.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtremumPair {
    /// Largest value (first occurrence on ties).
    pub max: ExtremumPoint,
    /// Smallest value (first occurrence on ties).
    pub min: ExtremumPoint,
}

/// The persisted result of one successful fetch-and-process cycle.
///
/// Serializes to `{"entityName": .., "max": {"val", "fy"}, "min": {"val", "fy"}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Registrant name.
    #[serde(rename = "entityName")]
    pub entity_name: String,
    /// Maximum shares outstanding after the cutoff.
    pub max: ExtremumPoint,
    /// Minimum shares outstanding after the cutoff.
    pub min: ExtremumPoint,
}

impl Snapshot {
    /// Builds a snapshot from an entity name and a reduced pair.
    #[must_use]
    pub fn new(entity_name: impl Into<String>, pair: ExtremumPair) -> Self {
        Self {
            entity_name: entity_name.into(),
            max: pair.max,
            min: pair.min,
        }
    }
}

/// Accepts a fiscal year stored either as text or as a bare number.
fn fiscal_year_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_wire_shape() {
        let snapshot = Snapshot::new(
            "ACME",
            ExtremumPair {
                max: ExtremumPoint::new(900.0, "2021"),
                min: ExtremumPoint::new(300.0, "2022"),
            },
        );

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            value,
            json!({
                "entityName": "ACME",
                "max": { "val": 900.0, "fy": "2021" },
                "min": { "val": 300.0, "fy": "2022" }
            })
        );
        assert!(value["max"]["val"].is_number());
    }

    #[test]
    fn test_numeric_fiscal_year_is_accepted() {
        let snapshot: Snapshot = serde_json::from_value(json!({
            "entityName": "ACME",
            "max": { "val": 900, "fy": 2021 },
            "min": { "val": 300 }
        }))
        .unwrap();

        assert_eq!(snapshot.max.fy, "2021");
        assert_eq!(snapshot.min.fy, "");
        assert_eq!(snapshot.max.val, 900.0);
    }

    #[test]
    fn test_payload_ignores_unknown_fields() {
        let payload: DisclosurePayload = serde_json::from_value(json!({
            "cik": 10795,
            "entityName": "ACME",
            "units": { "shares": [{ "fy": "2021", "val": 1 }], "USD": [] }
        }))
        .unwrap();

        assert_eq!(payload.entity_name, "ACME");
        assert_eq!(payload.units.shares.len(), 1);
    }
}

//! Score validation for model-produced JSON score objects.
//!
//! The score step asks a model for a JSON object of named criteria. Models get
//! this wrong often enough that malformed output is a first-class, expected
//! condition: [`validate_score`] never fails, it substitutes a configured
//! fallback record instead.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Validation rules for a score object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSchema {
    pub min_value: i64,
    pub max_value: i64,
    /// Exact set of criterion keys the model must produce
    pub required_keys: Vec<String>,
    /// Value substituted for every criterion when the output is unusable
    pub fallback_value: i64,
}

impl Default for ScoreSchema {
    fn default() -> Self {
        Self {
            min_value: 1,
            max_value: 10,
            required_keys: vec![
                "impact".to_string(),
                "feasibility".to_string(),
                "originality".to_string(),
                "clarity".to_string(),
            ],
            fallback_value: 6,
        }
    }
}

/// A validated score: named criteria plus their sum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(flatten)]
    pub criteria: BTreeMap<String, i64>,
    pub total: i64,
}

impl ScoreRecord {
    /// The fallback record: every required key at the fallback value.
    pub fn fallback(schema: &ScoreSchema) -> Self {
        let criteria: BTreeMap<String, i64> = schema
            .required_keys
            .iter()
            .map(|key| (key.clone(), schema.fallback_value))
            .collect();
        Self {
            total: schema.fallback_value * schema.required_keys.len() as i64,
            criteria,
        }
    }
}

/// Turn a free-form string purportedly containing a JSON score object into a
/// well-formed [`ScoreRecord`].
///
/// Parses the string as JSON, requires every schema key to be present and
/// coercible to an integer, clamps each value into `[min, max]`, and derives
/// `total` as the sum of the clamped values. Any failure along the way yields
/// the fallback record. Never fails.
pub fn validate_score(raw: &str, schema: &ScoreSchema) -> ScoreRecord {
    match parse_score(raw, schema) {
        Some(record) => record,
        None => ScoreRecord::fallback(schema),
    }
}

fn parse_score(raw: &str, schema: &ScoreSchema) -> Option<ScoreRecord> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    let object = value.as_object()?;

    let mut criteria = BTreeMap::new();
    for key in &schema.required_keys {
        let coerced = coerce_int(object.get(key)?)?;
        criteria.insert(key.clone(), coerced.clamp(schema.min_value, schema.max_value));
    }

    let total = criteria.values().sum();
    Some(ScoreRecord { criteria, total })
}

/// Coerce a JSON value to an integer: integers pass through, floats truncate,
/// numeric strings parse. Anything else is unusable.
fn coerce_int(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

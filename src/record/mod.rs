//! Record normalization.
//!
//! Dataset entries arrive as flat JSON objects with whatever fields the
//! source happened to contain. The normalizer maps each entry onto a fixed
//! field set so every stored record looks the same to the phases downstream.
//! Defaulting happens in two layers: fields absent from the source are
//! filled here, and values that later fail to parse as numbers are defaulted
//! at the point of use by [`int_value_or`] / [`float_value_or`].

use std::collections::{BTreeMap, HashMap};

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A record as read from the dataset source: field name to raw scalar.
pub type RawRecord = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Integer,
    Float,
    Text,
}

impl FieldKind {
    /// Value substituted when the source record lacks the field.
    pub fn default_value(&self) -> &'static str {
        match self {
            FieldKind::Integer => "0",
            FieldKind::Float => "0.0",
            FieldKind::Text => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
        }
    }
}

/// Canonical default-filled representation of a dataset entry.
///
/// Carries exactly the field set the normalizer was built with, regardless
/// of which fields the source record actually had.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedRecord {
    fields: BTreeMap<String, String>,
}

impl NormalizedRecord {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_map(&self) -> HashMap<String, String> {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Converts raw records into [`NormalizedRecord`]s over a fixed field set.
pub struct Normalizer {
    fields: Vec<FieldSpec>,
}

impl Normalizer {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Pure and total: absent or non-scalar values get the kind default.
    pub fn normalize(&self, raw: &RawRecord) -> NormalizedRecord {
        let mut fields = BTreeMap::new();
        for spec in &self.fields {
            let value = raw
                .get(&spec.name)
                .and_then(scalar_to_string)
                .unwrap_or_else(|| spec.kind.default_value().to_string());
            fields.insert(spec.name.clone(), value);
        }
        NormalizedRecord { fields }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parses an integer field out of a read result. Absence and parse failures
/// both yield `default`; parse failures are logged, never propagated.
pub fn int_value_or(fields: &HashMap<String, String>, name: &str, default: i64) -> i64 {
    match fields.get(name) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("unparseable integer value '{}' for field '{}', using {}", raw, name, default);
            default
        }),
    }
}

/// Float counterpart of [`int_value_or`].
pub fn float_value_or(fields: &HashMap<String, String>, name: &str, default: f64) -> f64 {
    match fields.get(name) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("unparseable float value '{}' for field '{}', using {}", raw, name, default);
            default
        }),
    }
}

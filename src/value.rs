//! The `Value` data model consumed by resolution, evaluation and formatting.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde_json::Value as JsonValue;

/// A host-supplied domain object resolvable by field name.
///
/// Implementers expose a narrow, explicit surface instead of requiring
/// reflection over arbitrary host types (see the design notes on "runtime
/// reflection on host records").
pub trait Record: fmt::Debug + Send + Sync {
    /// Resolve a field by name. Lookup is case-insensitive, matching the
    /// resolver's rule for records (`Name on Record`).
    fn field(&self, name: &str) -> Option<Value>;
}

/// Fixed-point decimal with 4 digits of scale, backed by `i128`.
///
/// Avoids pulling in an arbitrary-precision crate the teacher's stack never
/// needed, while still keeping exact decimal arithmetic for currency-style
/// template data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Decimal {
    /// Value multiplied by `10^SCALE`.
    pub scaled: i128,
}

impl Decimal {
    pub const SCALE: u32 = 4;

    pub fn from_i64(v: i64) -> Self {
        Decimal {
            scaled: v as i128 * 10i128.pow(Self::SCALE),
        }
    }

    pub fn from_f64(v: f64) -> Self {
        Decimal {
            scaled: (v * 10f64.powi(Self::SCALE as i32)).round() as i128,
        }
    }

    pub fn to_f64(self) -> f64 {
        self.scaled as f64 / 10f64.powi(Self::SCALE as i32)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = 10i128.pow(Self::SCALE);
        let whole = self.scaled / scale;
        let frac = (self.scaled % scale).abs();
        write!(f, "{whole}.{frac:0width$}", width = Self::SCALE as usize)
    }
}

/// A tagged variant navigated by the property-path resolver and evaluated by
/// the expression evaluator.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Decimal(Decimal),
    Float(f64),
    String(String),
    DateTime(DateTime<FixedOffset>),
    Sequence(Vec<Value>),
    Mapping(Mapping),
    Record(Arc<dyn Record>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Integer(a), Integer(b)) => a == b,
            (Decimal(a), Decimal(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (String(a), String(b)) => a == b,
            (DateTime(a), DateTime(b)) => a == b,
            (Sequence(a), Sequence(b)) => a == b,
            (Mapping(a), Mapping(b)) => a == b,
            // Records compare by field resolution is undefined; opaque handles
            // are never structurally equal except by identity, which `Arc`
            // pointer equality approximates.
            (Record(a), Record(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Insertion-ordered, case-sensitive string-keyed map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, Value)>,
}

impl Mapping {
    pub fn new() -> Self {
        Mapping::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Value {
    /// Truthiness used by the expression evaluator for bare identifiers.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Integer(i) => *i != 0,
            Value::Decimal(d) => d.scaled != 0,
            Value::Float(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::DateTime(_) => true,
            Value::Sequence(s) => !s.is_empty(),
            Value::Mapping(m) => !m.is_empty(),
            Value::Record(_) => true,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Decimal(_) | Value::Float(_))
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Decimal(d) => Some(d.to_f64()),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Build a `Value` from parsed JSON, the common way host applications
    /// hand a data bundle to the engine (`serde_json::Value` -> `Value`).
    pub fn from_json(json: JsonValue) -> Value {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from_json).collect())
            }
            JsonValue::Object(map) => {
                let mut mapping = Mapping::new();
                for (k, v) in map {
                    mapping.insert(k, Value::from_json(v));
                }
                Value::Mapping(mapping)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_formats_with_fixed_scale() {
        let d = Decimal::from_f64(12.5);
        assert_eq!(d.to_string(), "12.5000");
    }

    #[test]
    fn truthiness_matches_spec_table() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Integer(0).is_truthy());
        assert!(!Value::String(String::new()).is_truthy());
        assert!(!Value::Sequence(vec![]).is_truthy());
        assert!(!Value::Mapping(Mapping::new()).is_truthy());
        assert!(Value::Integer(1).is_truthy());
        assert!(Value::String("x".into()).is_truthy());
    }

    #[test]
    fn mapping_preserves_insertion_order() {
        let mut m = Mapping::new();
        m.insert("b", Value::Integer(2));
        m.insert("a", Value::Integer(1));
        let keys: Vec<_> = m.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn from_json_builds_mapping() {
        let json = serde_json::json!({"A": "x", "N": 5});
        let v = Value::from_json(json);
        match v {
            Value::Mapping(m) => {
                assert_eq!(m.get("A"), Some(&Value::String("x".into())));
                assert_eq!(m.get("N"), Some(&Value::Integer(5)));
            }
            _ => panic!("expected mapping"),
        }
    }
}

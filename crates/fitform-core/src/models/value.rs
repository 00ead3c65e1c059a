use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single answered field. Untagged so the wire shape is the bare JSON
/// scalar the frontend sends: `true`, `72.5`, or `"Yes"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric coercion with `parseFloat` semantics: numbers pass through
    /// (NaN fails), text parses its longest leading float prefix, booleans
    /// never parse.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_nan() => None,
            Self::Number(n) => Some(*n),
            Self::Text(s) => parse_float_prefix(s),
            Self::Bool(_) => None,
        }
    }

    /// An answered value is anything except the empty string. `false` and
    /// `0` count as answered; only a cleared text input does not.
    pub fn is_answered(&self) -> bool {
        !matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Parse the longest leading float prefix of `s`, like JS `parseFloat`:
/// `"72.5 kg"` → 72.5, `"  .5"` → 0.5, `"abc"` → None.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;

    while end < bytes.len() {
        let b = bytes[end];
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'+' | b'-' => {
                // Sign is only valid at the start or right after the exponent.
                let after_exp =
                    end > 0 && matches!(bytes[end - 1], b'e' | b'E') && seen_exp;
                if end != 0 && !after_exp {
                    break;
                }
            }
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if seen_digit && !seen_exp => {
                // Only consume the exponent if digits follow it.
                let rest = &bytes[end + 1..];
                let digits_follow = match rest.first() {
                    Some(b'+' | b'-') => matches!(rest.get(1), Some(b'0'..=b'9')),
                    Some(b'0'..=b'9') => true,
                    _ => false,
                };
                if !digits_follow {
                    break;
                }
                seen_exp = true;
            }
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }
    s[..end].parse().ok()
}

/// The flat field-id → value mapping for one in-progress assessment,
/// scoped to a single (trainer, client, template) triple. `BTreeMap` keeps
/// the persisted JSON deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct FormState(pub BTreeMap<String, FieldValue>);

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field_id: &str) -> Option<&FieldValue> {
        self.0.get(field_id)
    }

    pub fn set(&mut self, field_id: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(field_id.into(), value.into());
    }

    /// Current text of a field, if it holds a string.
    pub fn text(&self, field_id: &str) -> Option<&str> {
        self.get(field_id).and_then(FieldValue::as_text)
    }

    /// Numeric coercion of a field (see [`FieldValue::as_number`]).
    pub fn number(&self, field_id: &str) -> Option<f64> {
        self.get(field_id).and_then(FieldValue::as_number)
    }

    /// Whether the field holds an answer (present and not the empty string).
    pub fn is_answered(&self, field_id: &str) -> bool {
        self.get(field_id).is_some_and(FieldValue::is_answered)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }
}

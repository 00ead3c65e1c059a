//! The template wire schema.
//!
//! These shapes are the JSON contract with template authors and the
//! frontend: any template conforming to them is accepted without code
//! changes. Immutable once loaded.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Template {
    /// Stable string key, e.g. `"par_q_plus"`.
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub sections: Vec<Section>,
}

impl Template {
    /// Every field in the template, flattening direct section fields and
    /// all subsection fields, in document order.
    pub fn all_fields(&self) -> impl Iterator<Item = &Field> {
        self.sections.iter().flat_map(Section::all_fields)
    }

    pub fn field(&self, field_id: &str) -> Option<&Field> {
        self.all_fields().find(|f| f.id == field_id)
    }

    /// Every calculated field in the template, wherever it is nested.
    pub fn calculated_fields(&self) -> impl Iterator<Item = &Field> {
        self.all_fields()
            .filter(|f| f.kind == FieldType::Calculated)
    }
}

/// A grouping of fields, optionally gated by a conditional. A section with
/// no conditional is always visible. Sections own direct fields, named
/// subsections, or both.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<Conditional>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<Subsection>,
}

impl Section {
    pub fn all_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields
            .iter()
            .chain(self.subsections.iter().flat_map(|s| s.fields.iter()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Subsection {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

/// A section-level visibility predicate over current field values.
/// Untagged: the two wire shapes are distinguished by their keys.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum Conditional {
    /// Visible iff the named field's current value strictly equals `value`.
    FieldEquals { field: String, value: String },
    /// Visible iff any named field currently holds exactly `"Yes"`.
    AnyOfYes { any_of: Vec<String> },
}

/// A field-level visibility predicate. Only the field/value form exists at
/// field granularity.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldConditional {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Field {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default)]
    pub decimal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<FieldConditional>,
    /// Present exactly on `calculated` fields; resolved against the closed
    /// formula set at load time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum FieldType {
    Text,
    Email,
    Tel,
    Number,
    Date,
    Textarea,
    Radio,
    Checkbox,
    Select,
    Scale,
    /// Derived by formula, never user-entered.
    Calculated,
    /// Declared capture placeholder — render-only, no stored value contract
    /// beyond presence.
    Signature,
}

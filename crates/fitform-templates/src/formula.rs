//! The closed set of named formulas.
//!
//! Formulas are a dispatch table, not an expression language: a template's
//! `formula` string is matched against the known set when the template is
//! loaded, and an unrecognized string fails registration immediately rather
//! than falling through to a null result at evaluation time.

use crate::error::TemplateError;
use crate::schema::Template;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formula {
    /// `weight / (height/100)^2` — BMI from weight (kg) and height (cm),
    /// rounded to 1 decimal place.
    BodyMassIndex,
    /// `avg(waist) / avg(hips)` — waist-hip ratio over two measurements of
    /// each, rounded to 2 decimal places.
    WaistHipRatio,
    /// `220 - age` — estimated maximum heart rate.
    MaxHeartRate,
}

impl Formula {
    /// Resolve a template's formula string. Matching is whitespace-
    /// insensitive so `"avg(waist)/avg(hips)"` and `"avg(waist) / avg(hips)"`
    /// name the same formula.
    pub fn parse(field_id: &str, expr: &str) -> Result<Self, TemplateError> {
        let normalized: String = expr.chars().filter(|c| !c.is_whitespace()).collect();
        match normalized.as_str() {
            "weight/(height/100)^2" => Ok(Self::BodyMassIndex),
            "avg(waist)/avg(hips)" => Ok(Self::WaistHipRatio),
            "220-age" => Ok(Self::MaxHeartRate),
            _ => Err(TemplateError::UnknownFormula {
                field_id: field_id.to_string(),
                formula: expr.to_string(),
            }),
        }
    }

    /// The canonical wire spelling.
    pub fn expr(&self) -> &'static str {
        match self {
            Self::BodyMassIndex => "weight / (height/100)^2",
            Self::WaistHipRatio => "avg(waist) / avg(hips)",
            Self::MaxHeartRate => "220 - age",
        }
    }
}

impl Template {
    /// Resolve every calculated field's formula, in document order.
    /// Validated templates cannot fail here; the `Result` exists for
    /// templates built in code that bypassed registration.
    pub fn resolved_formulas(&self) -> Result<Vec<(String, Formula)>, TemplateError> {
        self.calculated_fields()
            .map(|field| {
                let expr = field.formula.as_deref().ok_or_else(|| {
                    TemplateError::MissingFormula {
                        field_id: field.id.clone(),
                    }
                })?;
                Ok((field.id.clone(), Formula::parse(&field.id, expr)?))
            })
            .collect()
    }
}

//! Formula evaluation.
//!
//! Pure and infallible: any missing, unparseable, or zero input degrades to
//! `None` ("not yet calculable") instead of an error, because a calculated
//! field must never break the form it sits in.

use fitform_core::models::FormState;
use fitform_templates::Formula;

pub fn evaluate(formula: Formula, state: &FormState) -> Option<f64> {
    match formula {
        Formula::BodyMassIndex => {
            let weight = numeric(state, "weight")?;
            let height = numeric(state, "height")?;
            let meters = height / 100.0;
            Some(round_to(weight / (meters * meters), 1))
        }
        Formula::WaistHipRatio => {
            let waist = (number_or_zero(state, "waist_1") + number_or_zero(state, "waist_2")) / 2.0;
            let hips = (number_or_zero(state, "hips_1") + number_or_zero(state, "hips_2")) / 2.0;
            if waist == 0.0 || hips == 0.0 {
                return None;
            }
            Some(round_to(waist / hips, 2))
        }
        Formula::MaxHeartRate => {
            let age = numeric(state, "age")?;
            Some(220.0 - age)
        }
    }
}

/// A required numeric input: missing, unparseable, zero, or non-finite all
/// short-circuit the formula.
fn numeric(state: &FormState, field_id: &str) -> Option<f64> {
    let n = state.number(field_id)?;
    if n == 0.0 || !n.is_finite() {
        return None;
    }
    Some(n)
}

/// An averaged input: missing measurements default to zero; the zero guard
/// happens on the average, not the reading.
fn number_or_zero(state: &FormState, field_id: &str) -> f64 {
    state.number(field_id).unwrap_or(0.0)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

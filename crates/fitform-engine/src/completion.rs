//! Completion tracking against the variable required-field set.

use fitform_core::models::FormState;
use fitform_templates::Template;

use crate::visibility::{field_visible, visible_sections};

/// Percentage of currently-visible required fields that hold an answer.
///
/// Fields in hidden sections don't count, and neither do fields hidden by
/// their own conditional. A template with zero visible required fields
/// reports 0%, never 100% — an assessment with nothing asked of it must not
/// signal as finished.
pub fn completion_percentage(template: &Template, state: &FormState) -> u8 {
    let required: Vec<_> = visible_sections(template, state)
        .into_iter()
        .flat_map(|s| s.all_fields())
        .filter(|f| f.required && field_visible(f, state))
        .collect();

    if required.is_empty() {
        return 0;
    }

    let answered = required
        .iter()
        .filter(|f| state.is_answered(&f.id))
        .count();

    ((answered as f64 / required.len() as f64) * 100.0).round() as u8
}

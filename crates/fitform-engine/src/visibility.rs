//! Conditional visibility.
//!
//! Visibility is a pure function of current state, re-evaluated on every
//! mutation. A conditional referencing a field that has never been set (or
//! that doesn't exist) is simply not satisfied — malformed templates never
//! error here.

use fitform_core::models::FormState;
use fitform_templates::{Conditional, Field, FieldConditional, Section, Template};

/// The literal a field must hold for an any-of conditional to match.
const YES: &str = "Yes";

fn conditional_met(conditional: &Conditional, state: &FormState) -> bool {
    match conditional {
        // Strict equality: only a text value can match, never a number or
        // bool that happens to render the same.
        Conditional::FieldEquals { field, value } => state.text(field) == Some(value),
        Conditional::AnyOfYes { any_of } => {
            any_of.iter().any(|field| state.text(field) == Some(YES))
        }
    }
}

fn field_conditional_met(conditional: &FieldConditional, state: &FormState) -> bool {
    state.text(&conditional.field) == Some(conditional.value.as_str())
}

/// A section with no conditional is always visible.
pub fn section_visible(section: &Section, state: &FormState) -> bool {
    section
        .conditional
        .as_ref()
        .is_none_or(|c| conditional_met(c, state))
}

pub fn visible_sections<'a>(template: &'a Template, state: &FormState) -> Vec<&'a Section> {
    template
        .sections
        .iter()
        .filter(|s| section_visible(s, state))
        .collect()
}

/// Per-field visibility within a visible section. Field-level conditionals
/// are always the single-field/value form.
pub fn field_visible(field: &Field, state: &FormState) -> bool {
    field
        .conditional
        .as_ref()
        .is_none_or(|c| field_conditional_met(c, state))
}

/// The currently-visible fields of a section, direct and subsection fields
/// flattened in document order.
pub fn visible_fields<'a>(section: &'a Section, state: &FormState) -> Vec<&'a Field> {
    section
        .all_fields()
        .filter(|f| field_visible(f, state))
        .collect()
}

//! The in-memory form session (Form State Store).
//!
//! Owns the mutable field-id → value mapping for one subject's in-progress
//! assessment and keeps calculated fields current: every mutation re-runs
//! every formula in the template before returning. Recomputation is
//! deliberately full — template sizes are tens of fields, and correctness
//! beats a dependency graph at that scale.

use std::sync::Arc;

use fitform_core::models::{FieldValue, FormState};
use fitform_templates::{Formula, Section, Template, TemplateError};

use crate::completion::completion_percentage;
use crate::evaluate::evaluate;
use crate::visibility;

#[derive(Debug, Clone)]
pub struct FormSession {
    template: Arc<Template>,
    /// Calculated field id → formula, resolved once at construction.
    formulas: Vec<(String, Formula)>,
    state: FormState,
}

impl FormSession {
    /// A fresh session with no prior answers.
    pub fn new(template: Arc<Template>) -> Result<Self, TemplateError> {
        Self::hydrate(template, FormState::new())
    }

    /// A session restored from a saved `data` blob. The blob replaces the
    /// session state wholesale — no merge, and no recompute: calculated
    /// values were current when saved and their inputs haven't changed.
    pub fn hydrate(template: Arc<Template>, state: FormState) -> Result<Self, TemplateError> {
        let formulas = template.resolved_formulas()?;
        Ok(Self {
            template,
            formulas,
            state,
        })
    }

    pub fn template(&self) -> &Arc<Template> {
        &self.template
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn into_state(self) -> FormState {
        self.state
    }

    pub fn value(&self, field_id: &str) -> Option<&FieldValue> {
        self.state.get(field_id)
    }

    /// Apply one field update, then refresh every calculated field. The
    /// recomputation completes before this returns, so callers never observe
    /// a stale derived value.
    pub fn set_field(&mut self, field_id: impl Into<String>, value: impl Into<FieldValue>) {
        self.state.set(field_id, value);
        self.recompute();
    }

    /// Re-evaluate all formulas against current state. A formula that can't
    /// compute leaves its field untouched; a computed result overwrites.
    fn recompute(&mut self) {
        for (field_id, formula) in &self.formulas {
            if let Some(result) = evaluate(*formula, &self.state) {
                self.state.set(field_id.clone(), FieldValue::Number(result));
            }
        }
    }

    pub fn visible_sections(&self) -> Vec<&Section> {
        visibility::visible_sections(&self.template, &self.state)
    }

    pub fn completion(&self) -> u8 {
        completion_percentage(&self.template, &self.state)
    }
}

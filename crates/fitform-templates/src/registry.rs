//! Template loading and lookup.
//!
//! Two builtin templates ship embedded in the crate; out-of-band templates
//! register from JSON at runtime. All load paths run the same validation:
//! formulas resolve against the closed set (fail fast), field ids must be
//! unique, and conditionals referencing unknown fields are logged but
//! accepted — an unknown reference is simply never satisfied.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, LazyLock};

use crate::error::TemplateError;
use crate::formula::Formula;
use crate::schema::{Conditional, FieldType, Template};

const PAR_Q_PLUS: &str = include_str!("../templates/par_q_plus.json");
const FITNESS_ASSESSMENT: &str = include_str!("../templates/fitness_assessment.json");

/// Parse and validate a template from its JSON wire form.
pub fn parse_template(json: &str) -> Result<Template, TemplateError> {
    let template: Template = serde_json::from_str(json)?;
    validate(&template)?;
    Ok(template)
}

fn validate(template: &Template) -> Result<(), TemplateError> {
    let mut seen = HashSet::new();
    for field in template.all_fields() {
        if !seen.insert(field.id.as_str()) {
            return Err(TemplateError::DuplicateField {
                template_id: template.id.clone(),
                field_id: field.id.clone(),
            });
        }

        if field.kind == FieldType::Calculated {
            let expr = field.formula.as_deref().ok_or_else(|| {
                TemplateError::MissingFormula {
                    field_id: field.id.clone(),
                }
            })?;
            Formula::parse(&field.id, expr)?;
        }
    }

    warn_unknown_references(template, &seen);
    Ok(())
}

/// A conditional naming a field that doesn't exist never matches; that is
/// the contract for malformed templates, but it usually means a typo worth
/// surfacing at load time.
fn warn_unknown_references(template: &Template, known: &HashSet<&str>) {
    let mut check = |referenced: &str| {
        if !known.contains(referenced) {
            tracing::warn!(
                template = %template.id,
                field = %referenced,
                "conditional references unknown field; it will never be satisfied"
            );
        }
    };

    for section in &template.sections {
        match &section.conditional {
            Some(Conditional::FieldEquals { field, .. }) => check(field),
            Some(Conditional::AnyOfYes { any_of }) => any_of.iter().for_each(|f| check(f)),
            None => {}
        }
        for field in section.all_fields() {
            if let Some(cond) = &field.conditional {
                check(&cond.field);
            }
        }
    }
}

static BUILTINS: LazyLock<Vec<Arc<Template>>> = LazyLock::new(|| {
    [PAR_Q_PLUS, FITNESS_ASSESSMENT]
        .iter()
        .map(|json| match parse_template(json) {
            Ok(template) => Arc::new(template),
            Err(e) => panic!("embedded template failed validation: {e}"),
        })
        .collect()
});

/// The templates shipped with this build.
///
/// # Panics
///
/// Panics if an embedded template JSON is invalid. The sources are
/// compile-time constants, so a panic indicates a template definition bug.
pub fn builtin_templates() -> Vec<Arc<Template>> {
    BUILTINS.clone()
}

/// Look up a builtin template by ID.
pub fn get_template(id: &str) -> Option<Arc<Template>> {
    BUILTINS.iter().find(|t| t.id == id).cloned()
}

/// A set of loaded, immutable templates keyed by their stable string ID.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Arc<Template>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for template in builtin_templates() {
            registry.templates.insert(template.id.clone(), template);
        }
        registry
    }

    /// Parse, validate, and add a template authored out of band.
    pub fn register(&mut self, json: &str) -> Result<Arc<Template>, TemplateError> {
        let template = Arc::new(parse_template(json)?);
        if self.templates.contains_key(&template.id) {
            return Err(TemplateError::AlreadyRegistered(template.id.clone()));
        }
        tracing::debug!(template = %template.id, "template registered");
        self.templates.insert(template.id.clone(), Arc::clone(&template));
        Ok(template)
    }

    pub fn get(&self, id: &str) -> Option<Arc<Template>> {
        self.templates.get(id).cloned()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

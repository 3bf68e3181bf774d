//! Event-driven form session: one reducer owns the values, the errors, and
//! the step position, so the whole flow is testable without a UI harness.

use crate::schema::{FormDefinition, SchemaError};
use crate::stepper::{Stepper, ITEMS_PER_STEP};
use crate::submission::{format_values, SubmissionEnvelope};
use crate::validate::validate_fields;
use crate::value::{initial_values, FieldValue, FormValues};
use std::collections::BTreeMap;

/// Everything that can happen to a form in flight.
#[derive(Clone, Debug)]
pub enum FormEvent {
    /// Single mutation entry point for field values. A dotted
    /// `parent.child` key updates an address child in place.
    FieldChanged { key: String, value: FieldValue },
    AdvanceRequested,
    RetreatRequested,
    /// Whole-form validation, then hand the formatted envelope back to the
    /// caller for transport.
    SubmitRequested,
    /// The caller's submission went through; reset for reuse.
    SubmissionSucceeded,
}

/// What the caller must do after an event is applied.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    None,
    /// POST this to the form's submission endpoint.
    Submit(SubmissionEnvelope),
}

/// Live state of one selected form.
#[derive(Clone, Debug)]
pub struct FormSession {
    definition: FormDefinition,
    stepper: Stepper,
    values: FormValues,
    errors: BTreeMap<String, String>,
}

impl FormSession {
    /// Session with the design-default page size.
    pub fn new(definition: FormDefinition) -> Result<Self, SchemaError> {
        Self::with_page_size(definition, ITEMS_PER_STEP)
    }

    pub fn with_page_size(
        definition: FormDefinition,
        items_per_step: usize,
    ) -> Result<Self, SchemaError> {
        definition.ensure_unique_keys()?;
        let values = initial_values(&definition);
        let stepper = Stepper::new(definition.data_fields(), items_per_step);
        Ok(Self {
            definition,
            stepper,
            values,
            errors: BTreeMap::new(),
        })
    }

    /// The reducer. Every state change flows through here.
    pub fn apply(&mut self, event: FormEvent) -> Effect {
        match event {
            FormEvent::FieldChanged { key, value } => {
                // An edit makes any recorded error for the key stale.
                self.errors.remove(&key);
                self.set_value(&key, value);
                Effect::None
            }
            FormEvent::AdvanceRequested => {
                let outcome = self.stepper.advance(&self.values);
                tracing::debug!(
                    step = self.stepper.current(),
                    valid = outcome.is_valid(),
                    "advance requested"
                );
                self.errors = outcome.errors;
                Effect::None
            }
            FormEvent::RetreatRequested => {
                self.stepper.retreat();
                Effect::None
            }
            FormEvent::SubmitRequested => {
                // Final safety net across every field, independent of step
                // navigation.
                let outcome = validate_fields(self.stepper.fields(), &self.values);
                if !outcome.is_valid() {
                    self.errors = outcome.errors;
                    return Effect::None;
                }
                self.errors.clear();
                Effect::Submit(SubmissionEnvelope::new(format_values(&self.values)))
            }
            FormEvent::SubmissionSucceeded => {
                self.values = initial_values(&self.definition);
                self.stepper.reset();
                self.errors.clear();
                tracing::debug!(form = %self.definition.display, "session reset after submission");
                Effect::None
            }
        }
    }

    fn set_value(&mut self, key: &str, value: FieldValue) {
        if let Some((parent, child)) = key.split_once('.') {
            let entry = self
                .values
                .entry(parent.to_string())
                .or_insert_with(|| FieldValue::Nested(BTreeMap::new()));
            // A child write must never be lost: a parent holding a
            // non-composite value is replaced by a fresh nested map.
            if !matches!(entry, FieldValue::Nested(_)) {
                tracing::debug!(key = parent, "replacing non-composite value with a nested map");
                *entry = FieldValue::Nested(BTreeMap::new());
            }
            if let FieldValue::Nested(children) = entry {
                children.insert(child.to_string(), value);
            }
            return;
        }
        self.values.insert(key.to_string(), value);
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn stepper(&self) -> &Stepper {
        &self.stepper
    }

    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }
}

//! Fixed-size pagination over a form's data fields with gated navigation.
//!
//! State is an integer step index in `[0, total_steps - 1]`. Moving forward
//! is gated on the current step validating; moving backward is free.

use crate::schema::FormComponent;
use crate::validate::{validate_fields, ValidationOutcome};
use crate::value::FormValues;

/// Design default for fields shown per step.
pub const ITEMS_PER_STEP: usize = 3;

/// Partitions an ordered field sequence into fixed-size steps.
///
/// Callers construct it from [`FormDefinition::data_fields`], so button
/// descriptors are already excluded.
///
/// [`FormDefinition::data_fields`]: crate::schema::FormDefinition::data_fields
#[derive(Clone, Debug)]
pub struct Stepper {
    fields: Vec<FormComponent>,
    items_per_step: usize,
    current: usize,
}

impl Stepper {
    pub fn new(fields: Vec<FormComponent>, items_per_step: usize) -> Self {
        Self {
            fields,
            items_per_step: items_per_step.max(1),
            current: 0,
        }
    }

    /// Stepper with the design-default page size.
    pub fn with_default_page_size(fields: Vec<FormComponent>) -> Self {
        Self::new(fields, ITEMS_PER_STEP)
    }

    /// `ceil(field_count / items_per_step)`; an empty form still has one
    /// (empty) step.
    pub fn total_steps(&self) -> usize {
        self.fields.len().div_ceil(self.items_per_step).max(1)
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.total_steps()
    }

    /// Half-open slice of the fields on `step`; the last step may be
    /// shorter.
    pub fn step_fields(&self, step: usize) -> &[FormComponent] {
        let start = step * self.items_per_step;
        if start >= self.fields.len() {
            return &[];
        }
        let end = (start + self.items_per_step).min(self.fields.len());
        &self.fields[start..end]
    }

    pub fn current_fields(&self) -> &[FormComponent] {
        self.step_fields(self.current)
    }

    /// The full ordered field sequence, for whole-form validation.
    pub fn fields(&self) -> &[FormComponent] {
        &self.fields
    }

    /// Validates the current step's fields; moves forward only when they
    /// pass and this is not already the last step. The outcome carries the
    /// field-level errors either way.
    pub fn advance(&mut self, values: &FormValues) -> ValidationOutcome {
        let outcome = validate_fields(self.current_fields(), values);
        if outcome.is_valid() && !self.is_last() {
            self.current += 1;
        }
        outcome
    }

    /// Back one step, no validation; no-op at step 0.
    pub fn retreat(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}

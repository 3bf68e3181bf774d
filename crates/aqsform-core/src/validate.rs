//! Required-ness and format validation over a set of field descriptors.
//!
//! Validation errors are returned as data, never raised: they are expected,
//! recoverable, per-field conditions. The same routine backs both step-local
//! checks before advancing and the whole-form check before submission.

use crate::schema::{ComponentType, FormComponent};
use crate::value::{FieldValue, FormValues};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

// Country code optional, 3-3-4..6 digit grouping, separators tolerated.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?(\d{1,3})?[-. (]*\d{3}[-. )]*\d{3}[-. ]*\d{4,6}$").expect("phone regex")
});

/// Per-field validation errors keyed by component key (dotted
/// `parent.child` keys for address children).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub errors: BTreeMap<String, String>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn record(&mut self, key: String, message: impl Into<String>) {
        self.errors.insert(key, message.into());
    }
}

/// Validates each field in `fields` against `values`.
///
/// A required field with an empty value yields `"{label} is required"`;
/// non-empty values get the type-specific format check. A field with no
/// errors is absent from the outcome.
pub fn validate_fields(fields: &[FormComponent], values: &FormValues) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();
    for field in fields {
        validate_field(field, values.get(&field.key), None, &mut outcome);
    }
    outcome
}

fn validate_field(
    field: &FormComponent,
    value: Option<&FieldValue>,
    parent: Option<&str>,
    outcome: &mut ValidationOutcome,
) {
    if field.component_type.is_button() {
        return;
    }
    let key = match parent {
        Some(prefix) => format!("{prefix}.{}", field.key),
        None => field.key.clone(),
    };

    let empty = value.map_or(true, FieldValue::is_empty);
    if field.required && empty {
        outcome.record(key, format!("{} is required", field.label));
        return;
    }
    if empty {
        return;
    }

    match field.component_type {
        ComponentType::Email => {
            if let Some(text) = value.and_then(FieldValue::as_text) {
                if !EMAIL_RE.is_match(text) {
                    outcome.record(key, "Invalid email format");
                }
            }
        }
        ComponentType::PhoneNumber => {
            if let Some(text) = value.and_then(FieldValue::as_text) {
                let stripped: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                if !PHONE_RE.is_match(&stripped) {
                    outcome.record(key, "Invalid phone number format");
                }
            }
        }
        ComponentType::Number => {
            if let Some(text) = value.and_then(FieldValue::as_text) {
                if !text.parse::<f64>().map(f64::is_finite).unwrap_or(false) {
                    outcome.record(key, "Must be a number");
                }
            }
        }
        ComponentType::Address => {
            if let Some(FieldValue::Nested(children)) = value {
                for child in &field.components {
                    validate_field(child, children.get(&child.key), Some(&key), outcome);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn field(key: &str, label: &str, component_type: ComponentType, required: bool) -> FormComponent {
        FormComponent {
            key: key.to_string(),
            label: label.to_string(),
            component_type,
            required,
            components: vec![],
            extra: HashMap::new(),
        }
    }

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), FieldValue::Text(v.to_string())))
            .collect()
    }

    #[test]
    fn required_field_missing_always_errors() {
        let fields = vec![field("name", "Name", ComponentType::Textfield, true)];
        for vals in [FormValues::new(), values(&[("name", "")])] {
            let outcome = validate_fields(&fields, &vals);
            assert_eq!(outcome.errors["name"], "Name is required");
        }
    }

    #[test]
    fn optional_empty_field_passes() {
        let fields = vec![field("nickname", "Nickname", ComponentType::Textfield, false)];
        assert!(validate_fields(&fields, &values(&[("nickname", "")])).is_valid());
    }

    #[test]
    fn email_format() {
        let fields = vec![field("email", "Email", ComponentType::Email, true)];
        let outcome = validate_fields(&fields, &values(&[("email", "not-an-email")]));
        assert_eq!(outcome.errors["email"], "Invalid email format");
        assert!(validate_fields(&fields, &values(&[("email", "user@example.com")])).is_valid());
    }

    #[test]
    fn phone_format() {
        let fields = vec![field("phone", "Phone", ComponentType::PhoneNumber, true)];
        let outcome = validate_fields(&fields, &values(&[("phone", "abc")]));
        assert_eq!(outcome.errors["phone"], "Invalid phone number format");
        for ok in ["+250788123456", "0788 123 456", "(078) 812-3456"] {
            assert!(
                validate_fields(&fields, &values(&[("phone", ok)])).is_valid(),
                "expected {ok:?} to validate"
            );
        }
    }

    #[test]
    fn number_format() {
        let fields = vec![field("amount", "Amount", ComponentType::Number, true)];
        let outcome = validate_fields(&fields, &values(&[("amount", "12a")]));
        assert_eq!(outcome.errors["amount"], "Must be a number");
        assert!(validate_fields(&fields, &values(&[("amount", "42")])).is_valid());
        assert!(validate_fields(&fields, &values(&[("amount", "-3.5")])).is_valid());
    }

    #[test]
    fn required_checkbox_must_be_checked() {
        let fields = vec![field("terms", "Terms", ComponentType::Checkbox, true)];
        let mut vals = FormValues::new();
        vals.insert("terms".into(), FieldValue::Bool(false));
        let outcome = validate_fields(&fields, &vals);
        assert_eq!(outcome.errors["terms"], "Terms is required");

        vals.insert("terms".into(), FieldValue::Bool(true));
        assert!(validate_fields(&fields, &vals).is_valid());
    }

    #[test]
    fn address_children_validate_under_dotted_keys() {
        let mut address = field("address", "Address", ComponentType::Address, true);
        address.components = vec![
            field("street", "Street", ComponentType::Textfield, true),
            field("city", "City", ComponentType::Textfield, false),
        ];
        let fields = vec![address];

        // Parent entirely empty: a single parent-level error.
        let mut vals = FormValues::new();
        vals.insert("address".into(), FieldValue::Nested(BTreeMap::new()));
        let outcome = validate_fields(&fields, &vals);
        assert_eq!(outcome.errors["address"], "Address is required");

        // Partially filled: the required child is reported under its
        // dotted key.
        let mut children = BTreeMap::new();
        children.insert("city".to_string(), FieldValue::Text("Kigali".into()));
        vals.insert("address".into(), FieldValue::Nested(children));
        let outcome = validate_fields(&fields, &vals);
        assert_eq!(outcome.errors["address.street"], "Street is required");
        assert!(!outcome.errors.contains_key("address.city"));
    }

    #[test]
    fn whole_form_and_step_use_the_same_rules() {
        let fields = vec![
            field("name", "Name", ComponentType::Textfield, true),
            field("email", "Email", ComponentType::Email, true),
        ];
        let vals = values(&[("name", "Alice"), ("email", "bad")]);
        let step = validate_fields(&fields[1..], &vals);
        let whole = validate_fields(&fields, &vals);
        assert_eq!(step.errors["email"], whole.errors["email"]);
    }
}

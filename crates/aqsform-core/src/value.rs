//! Tagged field values and the per-form value map.

use crate::schema::{FormComponent, FormDefinition, ValueKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque handle to a user-picked file. Bytes never enter the JSON payload;
/// only the name is serialized on submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub name: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// Current value of one field, tagged by shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    File(FileHandle),
    /// Address composite: child key to child value, stored under the
    /// parent's key rather than flattened into the top-level key space.
    Nested(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Empty text for the given shape, matching how a fresh form seeds its
    /// fields.
    pub fn blank(kind: ValueKind) -> Option<FieldValue> {
        match kind {
            ValueKind::Bool => Some(FieldValue::Bool(false)),
            ValueKind::Nested => Some(FieldValue::Nested(BTreeMap::new())),
            ValueKind::Text | ValueKind::File => Some(FieldValue::Text(String::new())),
            ValueKind::None => None,
        }
    }

    /// "Empty/falsy" in the sense of the required-field rule: empty string,
    /// unchecked checkbox, or a nested map with no non-empty children. A
    /// picked file is never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Bool(b) => !b,
            FieldValue::File(_) => false,
            FieldValue::Nested(children) => children.values().all(FieldValue::is_empty),
        }
    }

    /// The inner string for text-shaped values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Mapping from component key to its current value. Created empty when a
/// form is selected, mutated only through field-change events, reset after
/// a successful submission.
pub type FormValues = BTreeMap<String, FieldValue>;

/// Seeds every non-button field of `definition` with its blank value.
/// Address composites get a nested map seeded from their children.
pub fn initial_values(definition: &FormDefinition) -> FormValues {
    fn seed(component: &FormComponent) -> Option<FieldValue> {
        let kind = component.component_type.value_kind();
        if kind == ValueKind::Nested {
            let children = component
                .components
                .iter()
                .filter_map(|child| seed(child).map(|v| (child.key.clone(), v)))
                .collect();
            return Some(FieldValue::Nested(children));
        }
        FieldValue::blank(kind)
    }

    definition
        .components
        .iter()
        .filter_map(|component| seed(component).map(|v| (component.key.clone(), v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ComponentType;
    use std::collections::HashMap;

    fn component(key: &str, component_type: ComponentType) -> FormComponent {
        FormComponent {
            key: key.to_string(),
            label: key.to_string(),
            component_type,
            required: false,
            components: vec![],
            extra: HashMap::new(),
        }
    }

    #[test]
    fn emptiness_rules() {
        assert!(FieldValue::Text(String::new()).is_empty());
        assert!(!FieldValue::Text("x".into()).is_empty());
        assert!(FieldValue::Bool(false).is_empty());
        assert!(!FieldValue::Bool(true).is_empty());
        assert!(!FieldValue::File(FileHandle {
            name: "id.pdf".into(),
            content_type: None
        })
        .is_empty());

        let mut nested = BTreeMap::new();
        nested.insert("city".to_string(), FieldValue::Text(String::new()));
        assert!(FieldValue::Nested(nested.clone()).is_empty());
        nested.insert("street".to_string(), FieldValue::Text("KG 11 Ave".into()));
        assert!(!FieldValue::Nested(nested).is_empty());
    }

    #[test]
    fn initial_values_seed_every_non_button_field() {
        let mut address = component("address", ComponentType::Address);
        address.components = vec![
            component("street", ComponentType::Textfield),
            component("city", ComponentType::Textfield),
        ];
        let definition = FormDefinition {
            display: "form".into(),
            components: vec![
                component("name", ComponentType::Textfield),
                component("subscribed", ComponentType::Checkbox),
                address,
                component("submit", ComponentType::Button),
            ],
        };

        let values = initial_values(&definition);
        assert_eq!(values.len(), 3);
        assert_eq!(values["name"], FieldValue::Text(String::new()));
        assert_eq!(values["subscribed"], FieldValue::Bool(false));
        match &values["address"] {
            FieldValue::Nested(children) => {
                assert_eq!(children.len(), 2);
                assert!(children.values().all(FieldValue::is_empty));
            }
            other => panic!("expected nested value, got {other:?}"),
        }
        assert!(!values.contains_key("submit"));
    }
}

//! Submission payload formatting: drop empty values, wrap in the fixed
//! envelope the submission endpoint expects.

use crate::value::{FieldValue, FormValues};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status the client stamps on every submission.
pub const SUBMITTED_STATUS: &str = "submitted";

/// `{ data, status: "submitted" }` body POSTed to the submission endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmissionEnvelope {
    pub data: Map<String, Value>,
    pub status: String,
}

impl SubmissionEnvelope {
    pub fn new(data: Map<String, Value>) -> Self {
        Self {
            data,
            status: SUBMITTED_STATUS.to_string(),
        }
    }
}

/// Projects the value map to JSON, omitting every empty value rather than
/// sending blanks (empty fields must not overwrite server defaults).
/// Address maps recursively drop empty children; files serialize as their
/// name. Idempotent: formatting an already-formatted map changes nothing.
pub fn format_values(values: &FormValues) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, value) in values {
        if value.is_empty() {
            continue;
        }
        out.insert(key.clone(), to_json(value));
    }
    out
}

fn to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Text(s) => Value::String(s.clone()),
        FieldValue::Bool(b) => Value::Bool(*b),
        FieldValue::File(handle) => Value::String(handle.name.clone()),
        FieldValue::Nested(children) => {
            let mut map = Map::new();
            for (key, child) in children {
                if child.is_empty() {
                    continue;
                }
                map.insert(key.clone(), to_json(child));
            }
            Value::Object(map)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FileHandle;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn sample_values() -> FormValues {
        let mut address = BTreeMap::new();
        address.insert("street".to_string(), FieldValue::Text("KG 11 Ave".into()));
        address.insert("city".to_string(), FieldValue::Text(String::new()));

        let mut values = FormValues::new();
        values.insert("name".into(), FieldValue::Text("Alice".into()));
        values.insert("note".into(), FieldValue::Text(String::new()));
        values.insert("subscribed".into(), FieldValue::Bool(true));
        values.insert("address".into(), FieldValue::Nested(address));
        values.insert(
            "attachment".into(),
            FieldValue::File(FileHandle {
                name: "id.pdf".into(),
                content_type: Some("application/pdf".into()),
            }),
        );
        values
    }

    #[test]
    fn empty_values_are_omitted() {
        let data = format_values(&sample_values());
        assert!(!data.contains_key("note"));
        assert_eq!(data["name"], json!("Alice"));
        assert_eq!(data["subscribed"], json!(true));
        assert_eq!(data["attachment"], json!("id.pdf"));
        // Address stays nested under the parent key; the empty child is
        // dropped.
        assert_eq!(data["address"], json!({"street": "KG 11 Ave"}));
    }

    #[test]
    fn formatting_is_idempotent() {
        let once = format_values(&sample_values());

        // Feed the formatted projection back through as field values.
        let mut reparsed = FormValues::new();
        for (key, value) in &once {
            let field_value = match value {
                Value::String(s) => FieldValue::Text(s.clone()),
                Value::Bool(b) => FieldValue::Bool(*b),
                Value::Object(map) => FieldValue::Nested(
                    map.iter()
                        .map(|(k, v)| {
                            (k.clone(), FieldValue::Text(v.as_str().unwrap().to_string()))
                        })
                        .collect(),
                ),
                other => panic!("unexpected projection {other:?}"),
            };
            reparsed.insert(key.clone(), field_value);
        }

        assert_eq!(format_values(&reparsed), once);
    }

    #[test]
    fn envelope_carries_fixed_status() {
        let envelope = SubmissionEnvelope::new(format_values(&sample_values()));
        let body = serde_json::to_value(&envelope).unwrap();
        assert_eq!(body["status"], json!("submitted"));
        assert_eq!(body["data"]["name"], json!("Alice"));
    }

    #[test]
    fn all_empty_address_is_dropped_entirely() {
        let mut address = BTreeMap::new();
        address.insert("street".to_string(), FieldValue::Text(String::new()));
        let mut values = FormValues::new();
        values.insert("address".into(), FieldValue::Nested(address));

        assert!(format_values(&values).is_empty());
    }
}

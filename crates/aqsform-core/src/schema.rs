//! Form schema model: typed field descriptors, form metadata, API envelopes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Field descriptor type, spelled the way the wire format spells it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentType {
    Textfield,
    Email,
    PhoneNumber,
    Number,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Date,
    Datetime,
    Address,
    File,
    Button,
}

/// Value shape a component stores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// Single string value (text, choices, dates).
    Text,
    /// Boolean toggle.
    Bool,
    /// Opaque file handle.
    File,
    /// Nested mapping of child key to value (address composites).
    Nested,
    /// Layout-only, never stored.
    None,
}

/// Input affordance a component renders as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Affordance {
    TextInput,
    TelInput,
    NumericInput,
    MultilineInput,
    SingleChoice,
    Toggle,
    InlineChoice,
    DatePicker,
    AddressGroup,
    FilePicker,
    LayoutOnly,
}

impl ComponentType {
    /// Layout-only descriptors are excluded from the data-bearing sequence.
    pub fn is_button(&self) -> bool {
        matches!(self, ComponentType::Button)
    }

    /// The one value shape this type stores.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            ComponentType::Textfield
            | ComponentType::Email
            | ComponentType::PhoneNumber
            | ComponentType::Number
            | ComponentType::Textarea
            | ComponentType::Select
            | ComponentType::Radio
            | ComponentType::Date
            | ComponentType::Datetime => ValueKind::Text,
            ComponentType::Checkbox => ValueKind::Bool,
            ComponentType::File => ValueKind::File,
            ComponentType::Address => ValueKind::Nested,
            ComponentType::Button => ValueKind::None,
        }
    }

    /// The one input affordance this type renders as.
    pub fn affordance(&self) -> Affordance {
        match self {
            ComponentType::Textfield | ComponentType::Email => Affordance::TextInput,
            ComponentType::PhoneNumber => Affordance::TelInput,
            ComponentType::Number => Affordance::NumericInput,
            ComponentType::Textarea => Affordance::MultilineInput,
            ComponentType::Select => Affordance::SingleChoice,
            ComponentType::Checkbox => Affordance::Toggle,
            ComponentType::Radio => Affordance::InlineChoice,
            ComponentType::Date | ComponentType::Datetime => Affordance::DatePicker,
            ComponentType::Address => Affordance::AddressGroup,
            ComponentType::File => Affordance::FilePicker,
            ComponentType::Button => Affordance::LayoutOnly,
        }
    }
}

/// One field descriptor within a form definition.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FormComponent {
    /// Storage key for the field's value, unique within the form.
    pub key: String,
    /// Display label.
    pub label: String,
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    /// Wire name `input`: true marks the field required.
    #[serde(rename = "input", default)]
    pub required: bool,
    /// Child descriptors, used only by address composites.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<FormComponent>,
    /// Display-only hints (picker options, widget formatting) passed
    /// through untouched.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Ordered field descriptors describing one form's shape. Immutable once
/// fetched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FormDefinition {
    pub display: String,
    pub components: Vec<FormComponent>,
}

/// Schema integrity errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("duplicate component key: {0}")]
    DuplicateKey(String),
}

impl FormDefinition {
    /// The data-bearing field sequence, with button descriptors excluded.
    /// Address children stay inside their parent and are not flattened.
    pub fn data_fields(&self) -> Vec<FormComponent> {
        self.components
            .iter()
            .filter(|c| !c.component_type.is_button())
            .cloned()
            .collect()
    }

    /// Checks that `key` is unique across the top-level sequence and within
    /// each address composite (children use an independent key space).
    pub fn ensure_unique_keys(&self) -> Result<(), SchemaError> {
        fn check(components: &[FormComponent]) -> Result<(), SchemaError> {
            let mut seen = std::collections::HashSet::new();
            for component in components {
                if !seen.insert(component.key.as_str()) {
                    return Err(SchemaError::DuplicateKey(component.key.clone()));
                }
                check(&component.components)?;
            }
            Ok(())
        }
        check(&self.components)
    }
}

/// Publication state of a form. Lifecycle managed server-side; clients only
/// read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    Published,
    #[default]
    Draft,
    Archived,
}

/// A form's server-side metadata plus its definition.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AqsForm {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Owning department.
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub status: FormStatus,
    /// Locale code to translated title.
    #[serde(default)]
    pub title_translations: HashMap<String, String>,
    /// Locale code to translated description.
    #[serde(default)]
    pub description_translations: HashMap<String, String>,
    #[serde(default)]
    pub submission_count: u64,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub definition: FormDefinition,
}

/// Pagination descriptor recomputed on every list fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Pagination {
    /// `total_pages = ceil(total / limit)`.
    pub fn compute(page: u32, limit: u32, total: u64) -> Self {
        let limit = limit.max(1);
        let total_pages = total.div_ceil(u64::from(limit)) as u32;
        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// The `{success, message, data}` wrapper the remote API uses for every
/// response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    // No `serde(default)` here: a missing `Option` field already decodes
    // as `None`, and the attribute would demand `T: Default` from every
    // payload type.
    pub data: Option<T>,
}

/// One page of the form catalogue.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FormsPage {
    #[serde(default)]
    pub forms: Vec<AqsForm>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

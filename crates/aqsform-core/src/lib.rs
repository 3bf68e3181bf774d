//! AQS form engine domain crate.
//!
//! Schema-driven multi-step forms: an ordered sequence of typed field
//! descriptors fetched from a remote service, partitioned into fixed-size
//! steps, validated per step and again whole-form before submission, then
//! formatted into the submission envelope.
//!
//! ## Flow
//!
//! loader → [`FormDefinition`] → [`Stepper`] → field edits →
//! [`validate_fields`] → [`SubmissionEnvelope`] → external API
//!
//! The crate is transport-free; HTTP lives in `aqsform-client`.

pub mod schema;
pub mod session;
pub mod stepper;
pub mod submission;
pub mod validate;
pub mod value;

pub use schema::{
    Affordance, ApiEnvelope, AqsForm, ComponentType, FormComponent, FormDefinition, FormStatus,
    FormsPage, Pagination, SchemaError, ValueKind,
};
pub use session::{Effect, FormEvent, FormSession};
pub use stepper::{Stepper, ITEMS_PER_STEP};
pub use submission::{format_values, SubmissionEnvelope, SUBMITTED_STATUS};
pub use validate::{validate_fields, ValidationOutcome};
pub use value::{initial_values, FieldValue, FileHandle, FormValues};

//! Async client for the AQS forms service.
//!
//! Pairs with `aqsform-core`: this crate loads form definitions (with a
//! short-lived per-client list cache) and posts formatted submissions; the
//! core crate owns the schema model, validation, and stepping.
//!
//! # Example
//!
//! ```rust,no_run
//! use aqsform_client::{ClientConfig, FormsClient};
//!
//! # async fn run() -> aqsform_client::Result<()> {
//! let client = FormsClient::new(ClientConfig::default())?;
//! let page = client.list_forms(1, 10).await?;
//! if let Some(form) = page.forms.first() {
//!     println!("{}: {} fields", form.title, form.definition.components.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;

pub use auth::{NoAuth, StaticToken, TokenProvider};
pub use cache::ListCache;
pub use client::{FormsClient, SubmissionReceipt};
pub use config::{ClientConfig, Locale, DEFAULT_BASE_URL, DEFAULT_CACHE_TTL, DEFAULT_TIMEOUT};
pub use error::{ClientError, Result};

//! FHIR data models
//!
//! This crate provides the in-memory shapes that carry FHIR extensions:
//! the base [`Element`], the [`Extension`] entry with its closed
//! [`ExtensionValue`] sum type, and the common datatypes an extension value
//! can hold.
//!
//! # Module Organization
//!
//! - `common`: Version-agnostic models that work across FHIR R4, R4B, and R5
//! - Future: `r4`, `r5` modules for version-specific models
//!
//! # Design Philosophy
//!
//! - **One populated value**: an extension's value is an enum, so two
//!   `value[x]` fields can never be set at once
//! - **Wire compatible**: serializes to the official JSON field names
//!   (`url`, `valueString`, `valueCoding`, ...)
//! - **Absent, never empty**: optional fields are skipped when `None`
//!
//! # Example
//!
//! ```rust
//! use ferrum_models::common::{Coding, ExtensionValue, HasExtensions};
//! use serde_json::json;
//!
//! let coding: Coding = serde_json::from_value(json!({
//!     "system": "system",
//!     "code": "c",
//!     "extension": [{ "url": "exturl", "valueString": "test" }]
//! }))
//! .unwrap();
//!
//! let ext = &coding.extension().unwrap()[0];
//! assert_eq!(ext.url, "exturl");
//! assert_eq!(ext.value, Some(ExtensionValue::String("test".to_string())));
//! ```

pub mod common;

// Re-export commonly used types
pub use common::*;

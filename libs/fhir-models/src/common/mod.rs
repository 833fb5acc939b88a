//! Version-agnostic FHIR models
//!
//! Types that work across FHIR R4, R4B, and R5

pub mod datatypes;
mod decimal;
pub mod element;
pub mod error;
pub mod extension;
pub mod patient;

// Re-export commonly used types
pub use datatypes::*;
pub use element::*;
pub use error::{Error, Result};
pub use extension::*;
pub use patient::*;

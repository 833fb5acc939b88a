//! FHIR extension helpers
//!
//! Finds, sets, adds and clears `(url, value)` extensions on any element that
//! implements [`HasExtensions`]/[`HasExtensionsMut`].
//!
//! - `locator`: read-only lookup by url
//! - `mutator`: set (collapse to one entry), add (append), clear
//! - `accessors`: typed get/set/add for every `value[x]` shape
//!
//! # Example
//!
//! ```rust
//! use ferrum_extensions::{clear_extension, get_extension_string_value, set_extension_string_value};
//! use ferrum_models::Coding;
//!
//! let mut coding = Coding::new("system", "c").with_display("blah");
//! set_extension_string_value(&mut coding, "exturl", "test").unwrap();
//! assert_eq!(get_extension_string_value(&coding, "exturl"), Some("test"));
//!
//! clear_extension(&mut coding, "exturl");
//! assert!(coding.extension.is_none());
//! ```

pub mod accessors;
pub mod error;
pub mod locator;
pub mod mutator;

pub use accessors::*;
pub use error::{Error, Result};
pub use locator::{
    get_extension, get_extension_mut, get_extension_urls, get_extensions, has_extension,
    has_extension_any,
};
pub use mutator::{
    add_extension, clear_extension, clear_extension_in, remove_extension_where, set_extension,
    ElementTarget, IntoElementTarget,
};

pub use ferrum_models::common::{Extension, ExtensionValue, HasExtensions, HasExtensionsMut};

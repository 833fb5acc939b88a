//! Error types for extension mutation

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Cannot set extension {url}: no element and no way to create one")]
    MissingTarget { url: String },

    #[error("Cannot set extension {url}: element factory did not produce an element")]
    ElementCreation { url: String },
}

pub type Result<T> = std::result::Result<T, Error>;

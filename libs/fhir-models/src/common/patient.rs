//! FHIR Patient model
//!
//! Only the fields needed to exercise extensions on a resource and on
//! primitive shadow elements are modelled; everything else is kept verbatim
//! in `other`.

use super::element::Element;
use super::error::{Error, Result};
use super::extension::Extension;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// FHIR Patient resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Resource type - always "Patient"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    /// Logical id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,

    /// Whether this patient's record is in active use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    /// Id and extensions for `active`
    #[serde(rename = "_active", skip_serializing_if = "Option::is_none")]
    pub active_element: Option<Element>,

    /// The date of birth for the individual
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    /// Id and extensions for `birthDate`
    #[serde(rename = "_birthDate", skip_serializing_if = "Option::is_none")]
    pub birth_date_element: Option<Element>,

    /// Additional content beyond modelled fields
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

fn default_resource_type() -> String {
    "Patient".to_string()
}

impl Default for Patient {
    fn default() -> Self {
        Self {
            resource_type: default_resource_type(),
            id: None,
            extension: None,
            active: None,
            active_element: None,
            birth_date: None,
            birth_date_element: None,
            other: Map::new(),
        }
    }
}

impl Patient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_birth_date(mut self, birth_date: impl Into<String>) -> Self {
        self.birth_date = Some(birth_date.into());
        self
    }

    /// Parse from JSON Value
    pub fn from_value(value: &Value) -> Result<Self> {
        let patient: Self = serde_json::from_value(value.clone())?;
        if patient.resource_type != "Patient" {
            return Err(Error::InvalidResource(format!(
                "expected resourceType Patient, got {}",
                patient.resource_type
            )));
        }
        Ok(patient)
    }

    /// Convert to JSON Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Error::from)
    }
}

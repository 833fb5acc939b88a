//! Base Element and the extension-bearing traits
//!
//! Every FHIR element may carry an ordered `extension` array. The traits here
//! expose that array uniformly so extension helpers can work on any datatype,
//! resource, or primitive shadow element (`_birthDate` and friends).

use super::datatypes::{CodeableConcept, Coding, Expression, Identifier, Period, Quantity, Reference};
use super::extension::Extension;
use super::patient::Patient;
use serde::{Deserialize, Serialize};

/// Read access to an element's extensions
pub trait HasExtensions {
    /// Extensions in document order, or `None` when the element carries none
    fn extension(&self) -> Option<&[Extension]>;
}

/// Write access to an element's extension array
///
/// Implementors must store the array as-is; keeping it non-empty is the
/// responsibility of whoever mutates it.
pub trait HasExtensionsMut: HasExtensions {
    fn extension_mut(&mut self) -> &mut Option<Vec<Extension>>;
}

/// An absent element has no extensions.
impl<T: HasExtensions> HasExtensions for Option<T> {
    fn extension(&self) -> Option<&[Extension]> {
        self.as_ref().and_then(HasExtensions::extension)
    }
}

impl<T: HasExtensions + ?Sized> HasExtensions for Box<T> {
    fn extension(&self) -> Option<&[Extension]> {
        (**self).extension()
    }
}

impl<T: HasExtensionsMut + ?Sized> HasExtensionsMut for Box<T> {
    fn extension_mut(&mut self) -> &mut Option<Vec<Extension>> {
        (**self).extension_mut()
    }
}

/// FHIR Element - base for all elements
///
/// Also used standalone as the shadow element of a primitive field, which
/// only holds `id` and `extension`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Additional content defined by implementations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<Vec<Extension>>,
}

impl Element {
    /// Create an element with no id and no extensions
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the element carries neither an id nor extensions
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.extension.is_none()
    }
}

macro_rules! impl_has_extensions {
    ($($ty:ty),* $(,)?) => {
        $(
            impl HasExtensions for $ty {
                fn extension(&self) -> Option<&[Extension]> {
                    self.extension.as_deref()
                }
            }

            impl HasExtensionsMut for $ty {
                fn extension_mut(&mut self) -> &mut Option<Vec<Extension>> {
                    &mut self.extension
                }
            }
        )*
    };
}

impl_has_extensions!(
    Element,
    Extension,
    Coding,
    CodeableConcept,
    Quantity,
    Reference,
    Identifier,
    Period,
    Expression,
    Patient,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_element_serializes_to_empty_object() {
        let elem = Element::new();
        assert!(elem.is_empty());
        assert_eq!(serde_json::to_value(&elem).unwrap(), json!({}));
    }

    #[test]
    fn test_absent_element_has_no_extensions() {
        let missing: Option<Element> = None;
        assert!(missing.extension().is_none());

        let present = Some(Element {
            id: None,
            extension: Some(vec![Extension::new("http://example.org/a")]),
        });
        assert_eq!(present.extension().map(<[Extension]>::len), Some(1));
    }

    #[test]
    fn test_boxed_element_delegates() {
        let mut boxed = Box::new(Element::new());
        boxed
            .extension_mut()
            .get_or_insert_with(Vec::new)
            .push(Extension::new("http://example.org/a"));
        assert_eq!(boxed.extension().map(<[Extension]>::len), Some(1));
    }
}

//! Typed extension accessors
//!
//! One get/get-all/set/add family per `value[x]` shape. A getter only sees
//! extensions whose value has its own shape: `get_extension_string_value`
//! never returns the `valueCode` of an extension with the same url.
//!
//! `get_extension_<shape>_value` looks at the first extension with the url
//! only; if that one holds another shape the result is `None`, even when a
//! later duplicate would match.

use crate::error::Result;
use crate::locator::{get_extension, get_extensions};
use crate::mutator::{add_extension, set_extension, IntoElementTarget};
use ferrum_models::common::{
    CodeableConcept, Coding, Duration, Expression, Extension, ExtensionValue, HasExtensions,
    Identifier, Period, Quantity, Reference,
};
use rust_decimal::Decimal;

/// Generate the get/get-all/set/add functions for one value shape.
///
/// `$lt` names the borrow of the element so that `$output` can refer to it.
macro_rules! typed_accessors {
    (
        $lt:lifetime;
        $(
            $shape:literal => $variant:ident($input:ty) -> $output:ty, $project:ident {
                get: $get:ident,
                get_all: $get_all:ident,
                set: $set:ident,
                add: $add:ident $(,)?
            }
        )*
    ) => {
        $(
            #[doc = concat!("`", $shape, "` value of the first extension with `url`.")]
            pub fn $get<$lt, E>(element: &$lt E, url: &str) -> Option<$output>
            where
                E: HasExtensions + ?Sized,
            {
                get_extension(element, url)?.value.as_ref()?.$project()
            }

            #[doc = concat!("All `", $shape, "` values of extensions with `url`, in order.")]
            ///
            /// Extensions holding another shape are skipped. Returns `None`
            /// rather than an empty vector.
            pub fn $get_all<$lt, E>(element: &$lt E, url: &str) -> Option<Vec<$output>>
            where
                E: HasExtensions + ?Sized,
            {
                let values: Vec<$output> = get_extensions(element, url)?
                    .into_iter()
                    .filter_map(|ext| ext.value.as_ref()?.$project())
                    .collect();

                (!values.is_empty()).then_some(values)
            }

            #[doc = concat!("Set a `", $shape, "` extension, collapsing existing ones with `url`.")]
            pub fn $set<'t, T>(element: T, url: &str, value: impl Into<$input>) -> Result<()>
            where
                T: IntoElementTarget<'t>,
            {
                set_extension(
                    element,
                    Extension::with_value(url, ExtensionValue::$variant(value.into())),
                )
            }

            #[doc = concat!("Append a `", $shape, "` extension.")]
            pub fn $add<'t, T>(element: T, url: &str, value: impl Into<$input>) -> Result<()>
            where
                T: IntoElementTarget<'t>,
            {
                add_extension(
                    element,
                    Extension::with_value(url, ExtensionValue::$variant(value.into())),
                )
            }
        )*
    };
}

typed_accessors! {
    'a;

    "base64Binary" => Base64Binary(String) -> &'a str, as_base64_binary {
        get: get_extension_base64_binary_value,
        get_all: get_extension_base64_binary_values,
        set: set_extension_base64_binary_value,
        add: add_extension_base64_binary_value,
    }
    "boolean" => Boolean(bool) -> bool, as_boolean {
        get: get_extension_boolean_value,
        get_all: get_extension_boolean_values,
        set: set_extension_boolean_value,
        add: add_extension_boolean_value,
    }
    "canonical" => Canonical(String) -> &'a str, as_canonical {
        get: get_extension_canonical_value,
        get_all: get_extension_canonical_values,
        set: set_extension_canonical_value,
        add: add_extension_canonical_value,
    }
    "code" => Code(String) -> &'a str, as_code {
        get: get_extension_code_value,
        get_all: get_extension_code_values,
        set: set_extension_code_value,
        add: add_extension_code_value,
    }
    "date" => Date(String) -> &'a str, as_date {
        get: get_extension_date_value,
        get_all: get_extension_date_values,
        set: set_extension_date_value,
        add: add_extension_date_value,
    }
    "dateTime" => DateTime(String) -> &'a str, as_date_time {
        get: get_extension_date_time_value,
        get_all: get_extension_date_time_values,
        set: set_extension_date_time_value,
        add: add_extension_date_time_value,
    }
    "decimal" => Decimal(Decimal) -> Decimal, as_decimal {
        get: get_extension_decimal_value,
        get_all: get_extension_decimal_values,
        set: set_extension_decimal_value,
        add: add_extension_decimal_value,
    }
    "id" => Id(String) -> &'a str, as_id {
        get: get_extension_id_value,
        get_all: get_extension_id_values,
        set: set_extension_id_value,
        add: add_extension_id_value,
    }
    "instant" => Instant(String) -> &'a str, as_instant {
        get: get_extension_instant_value,
        get_all: get_extension_instant_values,
        set: set_extension_instant_value,
        add: add_extension_instant_value,
    }
    "integer" => Integer(i32) -> i32, as_integer {
        get: get_extension_integer_value,
        get_all: get_extension_integer_values,
        set: set_extension_integer_value,
        add: add_extension_integer_value,
    }
    "markdown" => Markdown(String) -> &'a str, as_markdown {
        get: get_extension_markdown_value,
        get_all: get_extension_markdown_values,
        set: set_extension_markdown_value,
        add: add_extension_markdown_value,
    }
    "oid" => Oid(String) -> &'a str, as_oid {
        get: get_extension_oid_value,
        get_all: get_extension_oid_values,
        set: set_extension_oid_value,
        add: add_extension_oid_value,
    }
    "positiveInt" => PositiveInt(u32) -> u32, as_positive_int {
        get: get_extension_positive_int_value,
        get_all: get_extension_positive_int_values,
        set: set_extension_positive_int_value,
        add: add_extension_positive_int_value,
    }
    "string" => String(String) -> &'a str, as_string {
        get: get_extension_string_value,
        get_all: get_extension_string_values,
        set: set_extension_string_value,
        add: add_extension_string_value,
    }
    "time" => Time(String) -> &'a str, as_time {
        get: get_extension_time_value,
        get_all: get_extension_time_values,
        set: set_extension_time_value,
        add: add_extension_time_value,
    }
    "unsignedInt" => UnsignedInt(u32) -> u32, as_unsigned_int {
        get: get_extension_unsigned_int_value,
        get_all: get_extension_unsigned_int_values,
        set: set_extension_unsigned_int_value,
        add: add_extension_unsigned_int_value,
    }
    "uri" => Uri(String) -> &'a str, as_uri {
        get: get_extension_uri_value,
        get_all: get_extension_uri_values,
        set: set_extension_uri_value,
        add: add_extension_uri_value,
    }
    "url" => Url(String) -> &'a str, as_url {
        get: get_extension_url_value,
        get_all: get_extension_url_values,
        set: set_extension_url_value,
        add: add_extension_url_value,
    }
    "uuid" => Uuid(String) -> &'a str, as_uuid {
        get: get_extension_uuid_value,
        get_all: get_extension_uuid_values,
        set: set_extension_uuid_value,
        add: add_extension_uuid_value,
    }
    "Coding" => Coding(Coding) -> &'a Coding, as_coding {
        get: get_extension_coding_value,
        get_all: get_extension_coding_values,
        set: set_extension_coding_value,
        add: add_extension_coding_value,
    }
    "CodeableConcept" => CodeableConcept(CodeableConcept) -> &'a CodeableConcept, as_codeable_concept {
        get: get_extension_codeable_concept_value,
        get_all: get_extension_codeable_concept_values,
        set: set_extension_codeable_concept_value,
        add: add_extension_codeable_concept_value,
    }
    "Quantity" => Quantity(Quantity) -> &'a Quantity, as_quantity {
        get: get_extension_quantity_value,
        get_all: get_extension_quantity_values,
        set: set_extension_quantity_value,
        add: add_extension_quantity_value,
    }
    "Duration" => Duration(Duration) -> &'a Duration, as_duration {
        get: get_extension_duration_value,
        get_all: get_extension_duration_values,
        set: set_extension_duration_value,
        add: add_extension_duration_value,
    }
    "Reference" => Reference(Reference) -> &'a Reference, as_reference {
        get: get_extension_reference_value,
        get_all: get_extension_reference_values,
        set: set_extension_reference_value,
        add: add_extension_reference_value,
    }
    "Expression" => Expression(Expression) -> &'a Expression, as_expression {
        get: get_extension_expression_value,
        get_all: get_extension_expression_values,
        set: set_extension_expression_value,
        add: add_extension_expression_value,
    }
    "Identifier" => Identifier(Identifier) -> &'a Identifier, as_identifier {
        get: get_extension_identifier_value,
        get_all: get_extension_identifier_values,
        set: set_extension_identifier_value,
        add: add_extension_identifier_value,
    }
    "Period" => Period(Period) -> &'a Period, as_period {
        get: get_extension_period_value,
        get_all: get_extension_period_values,
        set: set_extension_period_value,
        add: add_extension_period_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrum_models::common::Element;
    use std::str::FromStr;

    #[test]
    fn test_getter_ignores_other_shapes() {
        let mut elem = Element::new();
        set_extension_code_value(&mut elem, "u", "active").unwrap();

        assert_eq!(get_extension_code_value(&elem, "u"), Some("active"));
        assert_eq!(get_extension_string_value(&elem, "u"), None);
        assert_eq!(get_extension_string_values(&elem, "u"), None);
    }

    #[test]
    fn test_first_match_decides_single_getter() {
        let mut elem = Element::new();
        add_extension_code_value(&mut elem, "u", "c").unwrap();
        add_extension_string_value(&mut elem, "u", "s").unwrap();

        assert_eq!(get_extension_string_value(&elem, "u"), None);
        assert_eq!(get_extension_string_values(&elem, "u"), Some(vec!["s"]));
    }

    #[test]
    fn test_set_replaces_other_shape_with_same_url() {
        let mut elem = Element::new();
        set_extension_boolean_value(&mut elem, "u", true).unwrap();
        set_extension_integer_value(&mut elem, "u", 7).unwrap();

        assert_eq!(get_extension_boolean_value(&elem, "u"), None);
        assert_eq!(get_extension_integer_value(&elem, "u"), Some(7));
        assert_eq!(elem.extension.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_empty_string_is_still_a_value() {
        let mut elem = Element::new();
        add_extension_string_value(&mut elem, "u", "").unwrap();
        add_extension_string_value(&mut elem, "u", "x").unwrap();
        assert_eq!(get_extension_string_values(&elem, "u"), Some(vec!["", "x"]));
    }

    #[test]
    fn test_decimal_values() {
        let mut elem = Element::new();
        let a = Decimal::from_str("1.25").unwrap();
        let b = Decimal::from_str("-3").unwrap();
        add_extension_decimal_value(&mut elem, "d", a).unwrap();
        add_extension_decimal_value(&mut elem, "d", b).unwrap();

        assert_eq!(get_extension_decimal_value(&elem, "d"), Some(a));
        assert_eq!(get_extension_decimal_values(&elem, "d"), Some(vec![a, b]));
    }

    #[test]
    fn test_structured_values() {
        let mut elem = Element::new();
        let coding = Coding::new("http://loinc.org", "1234-5");
        set_extension_coding_value(&mut elem, "c", coding.clone()).unwrap();
        set_extension_reference_value(&mut elem, "r", Reference::new("Patient/1")).unwrap();
        set_extension_duration_value(
            &mut elem,
            "d",
            Quantity::ucum(Decimal::from(5), "min"),
        )
        .unwrap();

        assert_eq!(get_extension_coding_value(&elem, "c"), Some(&coding));
        assert_eq!(
            get_extension_reference_value(&elem, "r").and_then(|r| r.reference.as_deref()),
            Some("Patient/1")
        );
        assert!(get_extension_duration_value(&elem, "d").is_some());
        assert!(get_extension_quantity_value(&elem, "d").is_none());
    }

    #[test]
    fn test_typed_setter_on_missing_element() {
        let mut slot: Option<Element> = None;
        assert!(set_extension_uri_value(slot.as_mut(), "u", "http://x").is_err());
        assert!(slot.is_none());
    }
}

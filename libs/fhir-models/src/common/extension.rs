//! FHIR Extension model
//!
//! An extension is a `url` plus at most one typed `value[x]`. The value is an
//! enum so that exactly one `value<Shape>` key appears on the wire. Shapes
//! without a variant of their own are kept verbatim in [`ExtensionValue::Other`].
//!
//! Decimals are read and written with their exact digits, never through `f64`.

use super::datatypes::{
    CodeableConcept, Coding, Duration, Expression, Identifier, Period, Quantity, Reference,
};
use super::decimal;
use super::error::{Error, Result};
use rust_decimal::Decimal;
use serde::de::{self, DeserializeOwned, Error as _};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// FHIR Extension
///
/// An extension without a value carries nested sub-extensions instead
/// (a "complex" extension).
///
/// On parse, more than one `value[x]` key or any key outside
/// `id`/`extension`/`url`/`value[x]` is an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extension {
    /// Unique id for inter-element referencing
    pub id: Option<String>,

    /// Nested extensions (for complex extensions)
    pub extension: Option<Vec<Extension>>,

    /// Identifies the meaning of the extension
    pub url: String,

    /// Value of extension, serialized as a single `value<Shape>` property
    pub value: Option<ExtensionValue>,
}

impl Extension {
    /// Create an extension with no value
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: None,
            extension: None,
            url: url.into(),
            value: None,
        }
    }

    /// Create an extension holding `value`
    pub fn with_value(url: impl Into<String>, value: ExtensionValue) -> Self {
        Self {
            value: Some(value),
            ..Self::new(url)
        }
    }

    /// Append a nested sub-extension
    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extension.get_or_insert_with(Vec::new).push(extension);
        self
    }

    /// Check if this extension carries nested sub-extensions
    pub fn is_complex(&self) -> bool {
        self.extension.as_ref().is_some_and(|e| !e.is_empty())
    }

    /// Parse from JSON Value
    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(Error::from)
    }

    /// Convert to JSON Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(Error::from)
    }

    fn from_object(mut object: Map<String, Value>) -> serde_json::Result<Self> {
        let id = take_field::<String>(&mut object, "id")?;
        let extension = take_field::<Vec<Extension>>(&mut object, "extension")?;
        let url = take_field::<String>(&mut object, "url")?
            .ok_or_else(|| serde_json::Error::missing_field("url"))?;

        let mut value: Option<ExtensionValue> = None;
        for (key, json) in object {
            if !is_value_key(&key) {
                return Err(serde_json::Error::custom(format!(
                    "unknown field `{key}` in extension `{url}`"
                )));
            }
            if let Some(existing) = &value {
                return Err(serde_json::Error::custom(format!(
                    "extension `{url}` has both `{}` and `{key}`",
                    existing.key()
                )));
            }
            value = Some(ExtensionValue::from_entry(key, json)?);
        }

        Ok(Self {
            id,
            extension,
            url,
            value,
        })
    }
}

/// Remove `key` from `object`; an explicit `null` counts as absent
fn take_field<T: DeserializeOwned>(
    object: &mut Map<String, Value>,
    key: &str,
) -> serde_json::Result<Option<T>> {
    match object.remove(key) {
        Some(value) => serde_json::from_value::<Option<T>>(value),
        None => Ok(None),
    }
}

/// `valueString`, `valueAge`, ... but not `value` or `valueset`
fn is_value_key(key: &str) -> bool {
    key.strip_prefix("value")
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()))
}

impl Serialize for Extension {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if let Some(id) = &self.id {
            map.serialize_entry("id", id)?;
        }
        if let Some(extension) = &self.extension {
            map.serialize_entry("extension", extension)?;
        }
        map.serialize_entry("url", &self.url)?;
        if let Some(value) = &self.value {
            value.serialize_entry(&mut map)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Extension {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Buffer as JSON so numbers keep their exact text even when the
        // extension sits under a flattened parent.
        let object = Map::<String, Value>::deserialize(deserializer)?;
        Extension::from_object(object).map_err(de::Error::custom)
    }
}

/// The `value[x]` of an extension
#[derive(Debug, Clone, PartialEq)]
pub enum ExtensionValue {
    Base64Binary(String),
    Boolean(bool),
    Canonical(String),
    Code(String),
    Date(String),
    DateTime(String),
    Decimal(Decimal),
    Id(String),
    Instant(String),
    Integer(i32),
    Markdown(String),
    Oid(String),
    PositiveInt(u32),
    String(String),
    Time(String),
    UnsignedInt(u32),
    Uri(String),
    Url(String),
    Uuid(String),
    Coding(Coding),
    CodeableConcept(CodeableConcept),
    Quantity(Quantity),
    Duration(Duration),
    Reference(Reference),
    Expression(Expression),
    Identifier(Identifier),
    Period(Period),
    /// Any other `value[x]` shape (`valueAge`, `valueAttachment`, ...), kept
    /// as parsed. `key` is the full property name.
    Other { key: String, value: Value },
}

impl ExtensionValue {
    /// FHIR type name of the populated value (e.g. "string", "Coding")
    pub fn type_name(&self) -> &str {
        match self {
            Self::Base64Binary(_) => "base64Binary",
            Self::Boolean(_) => "boolean",
            Self::Canonical(_) => "canonical",
            Self::Code(_) => "code",
            Self::Date(_) => "date",
            Self::DateTime(_) => "dateTime",
            Self::Decimal(_) => "decimal",
            Self::Id(_) => "id",
            Self::Instant(_) => "instant",
            Self::Integer(_) => "integer",
            Self::Markdown(_) => "markdown",
            Self::Oid(_) => "oid",
            Self::PositiveInt(_) => "positiveInt",
            Self::String(_) => "string",
            Self::Time(_) => "time",
            Self::UnsignedInt(_) => "unsignedInt",
            Self::Uri(_) => "uri",
            Self::Url(_) => "url",
            Self::Uuid(_) => "uuid",
            Self::Coding(_) => "Coding",
            Self::CodeableConcept(_) => "CodeableConcept",
            Self::Quantity(_) => "Quantity",
            Self::Duration(_) => "Duration",
            Self::Reference(_) => "Reference",
            Self::Expression(_) => "Expression",
            Self::Identifier(_) => "Identifier",
            Self::Period(_) => "Period",
            Self::Other { key, .. } => key.strip_prefix("value").unwrap_or(key),
        }
    }

    /// JSON property name of the value (e.g. "valueString")
    pub fn key(&self) -> &str {
        match self {
            Self::Base64Binary(_) => "valueBase64Binary",
            Self::Boolean(_) => "valueBoolean",
            Self::Canonical(_) => "valueCanonical",
            Self::Code(_) => "valueCode",
            Self::Date(_) => "valueDate",
            Self::DateTime(_) => "valueDateTime",
            Self::Decimal(_) => "valueDecimal",
            Self::Id(_) => "valueId",
            Self::Instant(_) => "valueInstant",
            Self::Integer(_) => "valueInteger",
            Self::Markdown(_) => "valueMarkdown",
            Self::Oid(_) => "valueOid",
            Self::PositiveInt(_) => "valuePositiveInt",
            Self::String(_) => "valueString",
            Self::Time(_) => "valueTime",
            Self::UnsignedInt(_) => "valueUnsignedInt",
            Self::Uri(_) => "valueUri",
            Self::Url(_) => "valueUrl",
            Self::Uuid(_) => "valueUuid",
            Self::Coding(_) => "valueCoding",
            Self::CodeableConcept(_) => "valueCodeableConcept",
            Self::Quantity(_) => "valueQuantity",
            Self::Duration(_) => "valueDuration",
            Self::Reference(_) => "valueReference",
            Self::Expression(_) => "valueExpression",
            Self::Identifier(_) => "valueIdentifier",
            Self::Period(_) => "valuePeriod",
            Self::Other { key, .. } => key,
        }
    }

    fn from_entry(key: String, value: Value) -> serde_json::Result<Self> {
        Ok(match key.as_str() {
            "valueBase64Binary" => Self::Base64Binary(serde_json::from_value(value)?),
            "valueBoolean" => Self::Boolean(serde_json::from_value(value)?),
            "valueCanonical" => Self::Canonical(serde_json::from_value(value)?),
            "valueCode" => Self::Code(serde_json::from_value(value)?),
            "valueDate" => Self::Date(serde_json::from_value(value)?),
            "valueDateTime" => Self::DateTime(serde_json::from_value(value)?),
            "valueDecimal" => Self::Decimal(decimal::from_json(&value)?),
            "valueId" => Self::Id(serde_json::from_value(value)?),
            "valueInstant" => Self::Instant(serde_json::from_value(value)?),
            "valueInteger" => Self::Integer(serde_json::from_value(value)?),
            "valueMarkdown" => Self::Markdown(serde_json::from_value(value)?),
            "valueOid" => Self::Oid(serde_json::from_value(value)?),
            "valuePositiveInt" => Self::PositiveInt(serde_json::from_value(value)?),
            "valueString" => Self::String(serde_json::from_value(value)?),
            "valueTime" => Self::Time(serde_json::from_value(value)?),
            "valueUnsignedInt" => Self::UnsignedInt(serde_json::from_value(value)?),
            "valueUri" => Self::Uri(serde_json::from_value(value)?),
            "valueUrl" => Self::Url(serde_json::from_value(value)?),
            "valueUuid" => Self::Uuid(serde_json::from_value(value)?),
            "valueCoding" => Self::Coding(serde_json::from_value(value)?),
            "valueCodeableConcept" => Self::CodeableConcept(serde_json::from_value(value)?),
            "valueQuantity" => Self::Quantity(serde_json::from_value(value)?),
            "valueDuration" => Self::Duration(serde_json::from_value(value)?),
            "valueReference" => Self::Reference(serde_json::from_value(value)?),
            "valueExpression" => Self::Expression(serde_json::from_value(value)?),
            "valueIdentifier" => Self::Identifier(serde_json::from_value(value)?),
            "valuePeriod" => Self::Period(serde_json::from_value(value)?),
            _ => Self::Other {
                key: key.clone(),
                value,
            },
        })
    }

    fn serialize_entry<M: SerializeMap>(&self, map: &mut M) -> std::result::Result<(), M::Error> {
        let key = self.key();
        match self {
            Self::Base64Binary(v)
            | Self::Canonical(v)
            | Self::Code(v)
            | Self::Date(v)
            | Self::DateTime(v)
            | Self::Id(v)
            | Self::Instant(v)
            | Self::Markdown(v)
            | Self::Oid(v)
            | Self::String(v)
            | Self::Time(v)
            | Self::Uri(v)
            | Self::Url(v)
            | Self::Uuid(v) => map.serialize_entry(key, v),
            Self::Boolean(v) => map.serialize_entry(key, v),
            Self::Decimal(v) => map.serialize_entry(key, &decimal::Exact(v)),
            Self::Integer(v) => map.serialize_entry(key, v),
            Self::PositiveInt(v) | Self::UnsignedInt(v) => map.serialize_entry(key, v),
            Self::Coding(v) => map.serialize_entry(key, v),
            Self::CodeableConcept(v) => map.serialize_entry(key, v),
            Self::Quantity(v) | Self::Duration(v) => map.serialize_entry(key, v),
            Self::Reference(v) => map.serialize_entry(key, v),
            Self::Expression(v) => map.serialize_entry(key, v),
            Self::Identifier(v) => map.serialize_entry(key, v),
            Self::Period(v) => map.serialize_entry(key, v),
            Self::Other { value, .. } => map.serialize_entry(key, value),
        }
    }

    pub fn as_base64_binary(&self) -> Option<&str> {
        match self {
            Self::Base64Binary(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_canonical(&self) -> Option<&str> {
        match self {
            Self::Canonical(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_code(&self) -> Option<&str> {
        match self {
            Self::Code(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&str> {
        match self {
            Self::Date(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<&str> {
        match self {
            Self::DateTime(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_id(&self) -> Option<&str> {
        match self {
            Self::Id(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_instant(&self) -> Option<&str> {
        match self {
            Self::Instant(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_markdown(&self) -> Option<&str> {
        match self {
            Self::Markdown(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_oid(&self) -> Option<&str> {
        match self {
            Self::Oid(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_positive_int(&self) -> Option<u32> {
        match self {
            Self::PositiveInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<&str> {
        match self {
            Self::Time(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_unsigned_int(&self) -> Option<u32> {
        match self {
            Self::UnsignedInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_uri(&self) -> Option<&str> {
        match self {
            Self::Uri(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_url(&self) -> Option<&str> {
        match self {
            Self::Url(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<&str> {
        match self {
            Self::Uuid(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_coding(&self) -> Option<&Coding> {
        match self {
            Self::Coding(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_codeable_concept(&self) -> Option<&CodeableConcept> {
        match self {
            Self::CodeableConcept(v) => Some(v),
            _ => None,
        }
    }

    /// Only a `valueQuantity`; a `valueDuration` is not returned here.
    pub fn as_quantity(&self) -> Option<&Quantity> {
        match self {
            Self::Quantity(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<&Duration> {
        match self {
            Self::Duration(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&Reference> {
        match self {
            Self::Reference(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Self::Expression(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Self::Identifier(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_period(&self) -> Option<&Period> {
        match self {
            Self::Period(v) => Some(v),
            _ => None,
        }
    }
}

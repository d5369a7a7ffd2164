//! ODS `Organization` resource and search `Bundle` wire models.
//!
//! Responsibilities:
//! - Define the JSON wire model returned by the ODS FHIR API
//! - Parse response bodies with path-aware error messages
//! - Check `resourceType` when the upstream supplies one
//!
//! Notes:
//! - Unknown keys are accepted; upstream owns this schema
//! - Malformed extensions degrade to absent values instead of failing the document
//! - `total` is kept as text, callers decide how strictly to parse it

use crate::datatypes::{
    first_of_one_or_many, lenient_list, Address, CodeableConcept, Extension, Identifier, Meta,
};
use crate::{FhirError, FhirResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Wire representation of an ODS organisation resource.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationResource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    #[serde(default)]
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(
        default,
        deserialize_with = "first_of_one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub identifier: Option<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(
        default,
        deserialize_with = "first_of_one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<Address>,

    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub extension: Option<Vec<Extension>>,
}

impl OrganizationResource {
    /// Parse a single organisation from a JSON response body.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Translation`] if the body does not match the wire schema, or
    /// [`FhirError::InvalidInput`] if `resourceType` is present and not `Organization`.
    pub fn from_json(text: &str) -> FhirResult<Self> {
        let resource: Self = parse_json(text, "Organization")?;
        check_resource_type(resource.resource_type.as_deref(), "Organization")?;
        Ok(resource)
    }

    /// Top-level extensions, empty when the field is absent.
    pub fn extensions(&self) -> &[Extension] {
        self.extension.as_deref().unwrap_or_default()
    }
}

/// Search result bundle.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationBundle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    /// Total matches across all pages, as sent (string or number on the wire).
    #[serde(
        default,
        deserialize_with = "total_as_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub total: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<Vec<OrganizationEntry>>,
}

impl OrganizationBundle {
    /// Parse a search bundle from a JSON response body.
    ///
    /// # Errors
    ///
    /// Returns [`FhirError::Translation`] if the body does not match the wire schema, or
    /// [`FhirError::InvalidInput`] if `resourceType` is present and not `Bundle`.
    pub fn from_json(text: &str) -> FhirResult<Self> {
        let bundle: Self = parse_json(text, "Bundle")?;
        check_resource_type(bundle.resource_type.as_deref(), "Bundle")?;
        Ok(bundle)
    }

    pub fn entries(&self) -> &[OrganizationEntry] {
        self.entry.as_deref().unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<OrganizationResource>,
}

fn parse_json<T: DeserializeOwned>(text: &str, label: &str) -> FhirResult<T> {
    let mut deserializer = serde_json::Deserializer::from_str(text);

    match serde_path_to_error::deserialize::<_, T>(&mut deserializer) {
        Ok(parsed) => Ok(parsed),
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>"
            } else {
                path.as_str()
            };
            Err(FhirError::Translation(format!(
                "{label} schema mismatch at {path}: {source}"
            )))
        }
    }
}

fn check_resource_type(found: Option<&str>, expected: &str) -> FhirResult<()> {
    match found {
        Some(found) if found != expected => Err(FhirError::InvalidInput(format!(
            "Expected resourceType '{expected}', got '{found}'"
        ))),
        _ => Ok(()),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TotalRepr {
    Text(String),
    Number(serde_json::Number),
}

fn total_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<TotalRepr>::deserialize(deserializer)?.map(|total| match total {
            TotalRepr::Text(text) => text,
            TotalRepr::Number(number) => number.to_string(),
        }),
    )
}

//! JSON response bodies of the REST API.
//!
//! Field names are camelCase on the wire. Optional values are omitted rather than sent as
//! `null`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationRes {
    pub id: String,
    pub ods_code: String,
    pub name: String,
    pub is_active: bool,
    pub metadata: OrganisationMetadataRes,
    pub address: AddressRes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operational_period: Option<OperationalPeriodRes>,
    pub record_class: String,
    pub roles: Vec<OrganisationRoleRes>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationMetadataRes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressRes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperationalPeriodRes {
    pub date_type: String,
    pub start: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationRoleRes {
    pub code: String,
    pub display: String,
    pub primary: bool,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operational_period: Option<OperationalPeriodRes>,
}

/// One page of search results.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationSearchRes {
    pub page: u32,
    pub page_size: u32,
    /// Matches across all pages; may exceed `items.len()`.
    pub total: u64,
    pub items: Vec<OrganisationRes>,
}

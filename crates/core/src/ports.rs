//! Outbound port to the ODS FHIR API.

use crate::error::ClientError;
use async_trait::async_trait;
use fhir::{OrganizationBundle, OrganizationResource};

/// Search filters forwarded verbatim to the upstream API.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOrganisationsRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub role_code: Option<String>,
    pub active: Option<bool>,
    pub primary_role_only: Option<bool>,
    pub page_size: u32,
    pub page: u32,
}

/// Capability the query handlers depend on.
///
/// Implementations must be safe to share across concurrent requests. Dropping a returned
/// future must abandon the upstream call.
#[async_trait]
pub trait OdsFhirClient: Send + Sync {
    async fn search_organisations(
        &self,
        request: SearchOrganisationsRequest,
    ) -> Result<OrganizationBundle, ClientError>;

    /// `Ok(None)` means the upstream has no such organisation.
    async fn get_organisation_by_id(
        &self,
        organisation_id: &str,
    ) -> Result<Option<OrganizationResource>, ClientError>;
}

//! The gateway application as seen by the HTTP boundary.

use crate::ports::OdsFhirClient;
use crate::queries::{GetOrganisationByOdsCodeHandler, SearchOrganisationsHandler};
use std::sync::Arc;

#[derive(Clone)]
pub struct Queries {
    pub get_organisation_by_ods_code: GetOrganisationByOdsCodeHandler,
    pub search_organisations: SearchOrganisationsHandler,
}

#[derive(Clone)]
pub struct OdsGatewayApp {
    pub queries: Queries,
}

impl OdsGatewayApp {
    /// Wire every query handler to the same upstream client.
    pub fn new(fhir_client: Arc<dyn OdsFhirClient>) -> Self {
        Self {
            queries: Queries {
                get_organisation_by_ods_code: GetOrganisationByOdsCodeHandler::new(
                    fhir_client.clone(),
                ),
                search_organisations: SearchOrganisationsHandler::new(fhir_client),
            },
        }
    }
}

use crate::domain::Organisation;
use crate::error::{QueryError, QueryResult, UpstreamError};
use crate::mapper::map_organisation;
use crate::ports::OdsFhirClient;
use std::sync::Arc;

/// `ods_code` is trimmed before use; the upstream is called with the trimmed code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetOrganisationByOdsCodeQuery {
    pub ods_code: String,
}

/// Fetches a single organisation by its ODS code.
#[derive(Clone)]
pub struct GetOrganisationByOdsCodeHandler {
    fhir_client: Arc<dyn OdsFhirClient>,
}

impl GetOrganisationByOdsCodeHandler {
    pub fn new(fhir_client: Arc<dyn OdsFhirClient>) -> Self {
        Self { fhir_client }
    }

    /// # Errors
    ///
    /// - [`QueryError::InvalidInput`] if the code is empty or whitespace, before any upstream
    ///   call is made.
    /// - [`QueryError::Upstream`] if the upstream call fails or returns no record.
    pub async fn handle(&self, query: GetOrganisationByOdsCodeQuery) -> QueryResult<Organisation> {
        let ods_code = query.ods_code.trim();
        if ods_code.is_empty() {
            return Err(QueryError::InvalidInput("ODS code is required".into()));
        }

        let organisation = self
            .fhir_client
            .get_organisation_by_id(ods_code)
            .await?
            .ok_or_else(|| QueryError::Upstream(UpstreamError::NotFound(ods_code.to_owned())))?;

        Ok(map_organisation(&organisation))
    }
}

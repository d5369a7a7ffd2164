//! Recording test double for [`OdsFhirClient`].
//!
//! Enabled for this crate's tests and for dependants through the `testing` feature.

use crate::error::ClientError;
use crate::ports::{OdsFhirClient, SearchOrganisationsRequest};
use async_trait::async_trait;
use fhir::{OrganizationBundle, OrganizationResource};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Returns programmed results and records every call's arguments.
///
/// Unprogrammed calls return `Ok(None)` and an empty bundle with a total of `0`.
pub struct FakeOdsFhirClient {
    get_result: Mutex<Result<Option<OrganizationResource>, ClientError>>,
    get_calls: Mutex<Vec<String>>,
    search_result: Mutex<Result<OrganizationBundle, ClientError>>,
    search_calls: Mutex<Vec<SearchOrganisationsRequest>>,
}

impl Default for FakeOdsFhirClient {
    fn default() -> Self {
        Self {
            get_result: Mutex::new(Ok(None)),
            get_calls: Mutex::default(),
            search_result: Mutex::new(Ok(OrganizationBundle {
                total: Some("0".into()),
                ..Default::default()
            })),
            search_calls: Mutex::default(),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl FakeOdsFhirClient {
    pub fn get_organisation_by_id_returns(
        &self,
        result: Result<Option<OrganizationResource>, ClientError>,
    ) {
        *lock(&self.get_result) = result;
    }

    pub fn search_organisations_returns(&self, result: Result<OrganizationBundle, ClientError>) {
        *lock(&self.search_result) = result;
    }

    pub fn get_organisation_by_id_call_count(&self) -> usize {
        lock(&self.get_calls).len()
    }

    pub fn get_organisation_by_id_args(&self) -> Vec<String> {
        lock(&self.get_calls).clone()
    }

    pub fn search_organisations_call_count(&self) -> usize {
        lock(&self.search_calls).len()
    }

    /// # Panics
    ///
    /// Panics if fewer than `index + 1` searches were made.
    pub fn search_organisations_args_for_call(&self, index: usize) -> SearchOrganisationsRequest {
        lock(&self.search_calls)[index].clone()
    }
}

#[async_trait]
impl OdsFhirClient for FakeOdsFhirClient {
    async fn search_organisations(
        &self,
        request: SearchOrganisationsRequest,
    ) -> Result<OrganizationBundle, ClientError> {
        lock(&self.search_calls).push(request);
        lock(&self.search_result).clone()
    }

    async fn get_organisation_by_id(
        &self,
        organisation_id: &str,
    ) -> Result<Option<OrganizationResource>, ClientError> {
        lock(&self.get_calls).push(organisation_id.to_owned());
        lock(&self.get_result).clone()
    }
}

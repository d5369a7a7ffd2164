//! # ODS Core
//!
//! Mapping and query orchestration for the ODS directory gateway.
//!
//! This crate contains:
//! - the flat organisation domain model
//! - the mapper from ODS FHIR organisation resources to that model
//! - the outbound port to the ODS FHIR API
//! - the two query handlers (get by ODS code, search)
//!
//! **No API concerns**: HTTP routing, authentication, configuration and logging belong in
//! `api-rest`, `api-shared` and the `ods-gateway` binary. Nothing here logs or retries.

pub mod app;
pub mod constants;
pub mod domain;
pub mod error;
pub mod mapper;
pub mod ports;
pub mod queries;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use app::{OdsGatewayApp, Queries};
pub use domain::{Address, OperationalPeriod, Organisation, OrganisationMetadata, OrganisationRole};
pub use error::{ClientError, QueryError, QueryResult, UpstreamError};
pub use mapper::map_organisation;
pub use ports::{OdsFhirClient, SearchOrganisationsRequest};
pub use queries::{
    GetOrganisationByOdsCodeHandler, GetOrganisationByOdsCodeQuery, SearchOrganisationsHandler,
    SearchOrganisationsQuery, SearchOrganisationsResponse,
};

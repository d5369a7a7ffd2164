//! Query handlers: one upstream call each, mapped into the domain model.

pub mod get_organisation_by_ods_code;
pub mod search_organisations;

pub use get_organisation_by_ods_code::{
    GetOrganisationByOdsCodeHandler, GetOrganisationByOdsCodeQuery,
};
pub use search_organisations::{
    SearchOrganisationsHandler, SearchOrganisationsQuery, SearchOrganisationsResponse,
};

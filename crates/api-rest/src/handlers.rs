//! Endpoint handlers.

use crate::error::ApiError;
use crate::mapping::organisation_res;
use crate::AppState;
use api_shared::{ErrorRes, HealthRes, HealthService, OrganisationRes, OrganisationSearchRes};
use axum::extract::{Path, Query, State};
use axum::Json;
use ods_core::{GetOrganisationByOdsCodeQuery, SearchOrganisationsQuery};
use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Query string of `GET /organisations`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Name contains.
    pub name: Option<String>,
    /// City contains.
    pub city: Option<String>,
    /// Postcode contains.
    pub postcode: Option<String>,
    /// Organisation role code, e.g. `RO177`.
    pub role_code: Option<String>,
    pub active: Option<bool>,
    /// Match the role code against primary roles only.
    pub primary_role_only: Option<bool>,
    /// 1..=100, default 20.
    pub page_size: Option<u32>,
    /// 1-based, default 1.
    pub page: Option<u32>,
}

impl SearchParams {
    fn into_query(self) -> Result<SearchOrganisationsQuery, ApiError> {
        let page = self.page.unwrap_or(DEFAULT_PAGE);
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page == 0 {
            return Err(ApiError::BadRequest("page must be at least 1".into()));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ApiError::BadRequest(format!(
                "pageSize must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }

        Ok(SearchOrganisationsQuery {
            name: self.name,
            city: self.city,
            postcode: self.postcode,
            role_code: self.role_code,
            active: self.active,
            primary_role_only: self.primary_role_only,
            page_size,
            page,
        })
    }
}

#[utoipa::path(
    get,
    path = "/liveness",
    responses((status = 200, description = "Process is alive", body = HealthRes))
)]
pub async fn liveness() -> Json<HealthRes> {
    Json(HealthService::liveness())
}

#[utoipa::path(
    get,
    path = "/readiness",
    responses((status = 200, description = "Process is ready to serve", body = HealthRes))
)]
pub async fn readiness() -> Json<HealthRes> {
    Json(HealthService::readiness())
}

#[utoipa::path(
    get,
    path = "/organisations",
    params(SearchParams),
    responses(
        (status = 200, description = "One page of matching organisations", body = OrganisationSearchRes),
        (status = 400, description = "Invalid query parameters", body = ErrorRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes),
        (status = 502, description = "ODS API failure", body = ErrorRes),
        (status = 504, description = "ODS API timed out", body = ErrorRes)
    ),
    security(("api_key" = []))
)]
/// Search organisations in the ODS directory.
///
/// Filters are passed to the ODS API as-is; `total` counts matches across all pages.
pub async fn search_organisations(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<OrganisationSearchRes>, ApiError> {
    let query = params.into_query()?;
    let (page, page_size) = (query.page, query.page_size);

    let result = state.app.queries.search_organisations.handle(query).await?;

    Ok(Json(OrganisationSearchRes {
        page,
        page_size,
        total: result.total_count,
        items: result
            .organisations
            .into_iter()
            .map(organisation_res)
            .collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/organisations/{code}",
    params(("code" = String, Path, description = "ODS organisation code")),
    responses(
        (status = 200, description = "The organisation", body = OrganisationRes),
        (status = 400, description = "Empty code", body = ErrorRes),
        (status = 401, description = "Missing or invalid API key", body = ErrorRes),
        (status = 404, description = "No organisation with this code", body = ErrorRes),
        (status = 502, description = "ODS API failure", body = ErrorRes),
        (status = 504, description = "ODS API timed out", body = ErrorRes)
    ),
    security(("api_key" = []))
)]
/// Fetch one organisation by ODS code.
pub async fn get_organisation_by_ods_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<OrganisationRes>, ApiError> {
    let organisation = state
        .app
        .queries
        .get_organisation_by_ods_code
        .handle(GetOrganisationByOdsCodeQuery { ods_code: code })
        .await?;

    Ok(Json(organisation_res(organisation)))
}

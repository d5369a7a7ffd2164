use crate::domain::Organisation;
use crate::error::{QueryError, QueryResult};
use crate::mapper::map_organisation;
use crate::ports::{OdsFhirClient, SearchOrganisationsRequest};
use std::sync::Arc;

/// Search filters. Everything except paging is optional and passed upstream untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOrganisationsQuery {
    pub name: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub role_code: Option<String>,
    pub active: Option<bool>,
    pub primary_role_only: Option<bool>,
    pub page_size: u32,
    pub page: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOrganisationsResponse {
    /// Current page only, in upstream order.
    pub organisations: Vec<Organisation>,
    /// Matches across all pages.
    pub total_count: u64,
}

#[derive(Clone)]
pub struct SearchOrganisationsHandler {
    fhir_client: Arc<dyn OdsFhirClient>,
}

impl SearchOrganisationsHandler {
    pub fn new(fhir_client: Arc<dyn OdsFhirClient>) -> Self {
        Self { fhir_client }
    }

    /// # Errors
    ///
    /// - [`QueryError::Upstream`] if the upstream call fails.
    /// - [`QueryError::Parse`] if the bundle total is missing or not a non-negative integer.
    pub async fn handle(
        &self,
        query: SearchOrganisationsQuery,
    ) -> QueryResult<SearchOrganisationsResponse> {
        let bundle = self
            .fhir_client
            .search_organisations(SearchOrganisationsRequest {
                name: query.name,
                city: query.city,
                postcode: query.postcode,
                role_code: query.role_code,
                active: query.active,
                primary_role_only: query.primary_role_only,
                page_size: query.page_size,
                page: query.page,
            })
            .await?;

        // Entries without a resource are a normal sparse-bundle shape.
        let organisations = bundle
            .entries()
            .iter()
            .filter_map(|entry| entry.resource.as_ref())
            .map(map_organisation)
            .collect();

        let total = bundle.total.as_deref().unwrap_or_default();
        let total_count = total.parse::<u64>().map_err(|source| QueryError::Parse {
            value: total.to_owned(),
            source,
        })?;

        Ok(SearchOrganisationsResponse {
            organisations,
            total_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ODS_CODE_SYSTEM;
    use crate::error::{ClientError, UpstreamError};
    use crate::testing::FakeOdsFhirClient;
    use fhir::{Identifier, OrganizationBundle, OrganizationEntry, OrganizationResource};

    fn handler_with_fake() -> (SearchOrganisationsHandler, Arc<FakeOdsFhirClient>) {
        let fake = Arc::new(FakeOdsFhirClient::default());
        let handler = SearchOrganisationsHandler::new(fake.clone());
        (handler, fake)
    }

    fn resource(id: &str, system: &str, value: &str) -> OrganizationResource {
        OrganizationResource {
            id: id.into(),
            name: Some(format!("Org {id}")),
            identifier: Some(Identifier {
                system: Some(system.into()),
                value: Some(value.into()),
            }),
            ..Default::default()
        }
    }

    fn bundle(total: Option<&str>, resources: Vec<Option<OrganizationResource>>) -> OrganizationBundle {
        OrganizationBundle {
            total: total.map(Into::into),
            entry: Some(
                resources
                    .into_iter()
                    .map(|resource| OrganizationEntry {
                        resource,
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn forwards_filters_and_maps_present_entries_in_order() {
        let (handler, fake) = handler_with_fake();
        fake.search_organisations_returns(Ok(bundle(
            Some("40"),
            vec![
                Some(resource("ID-1", ODS_CODE_SYSTEM, "ABC123")),
                None,
                Some(resource("ID-2", "some-other-system", "SHOULD_NOT_BE_USED")),
                None,
            ],
        )));

        let query = SearchOrganisationsQuery {
            name: Some("Acme".into()),
            city: Some("Leeds".into()),
            postcode: Some("LS1".into()),
            role_code: Some("RO177".into()),
            active: Some(true),
            primary_role_only: Some(false),
            page_size: 25,
            page: 2,
        };

        let resp = handler.handle(query.clone()).await.expect("search result");

        assert_eq!(fake.search_organisations_call_count(), 1);
        let request = fake.search_organisations_args_for_call(0);
        assert_eq!(
            request,
            SearchOrganisationsRequest {
                name: query.name,
                city: query.city,
                postcode: query.postcode,
                role_code: query.role_code,
                active: query.active,
                primary_role_only: query.primary_role_only,
                page_size: 25,
                page: 2,
            }
        );

        assert_eq!(resp.total_count, 40);
        let codes: Vec<_> = resp.organisations.iter().map(|o| o.ods_code.as_str()).collect();
        assert_eq!(codes, vec!["ABC123", "ID-2"]);
    }

    #[tokio::test]
    async fn empty_bundle_with_zero_total() {
        let (handler, fake) = handler_with_fake();
        fake.search_organisations_returns(Ok(OrganizationBundle {
            total: Some("0".into()),
            ..Default::default()
        }));

        let resp = handler
            .handle(SearchOrganisationsQuery::default())
            .await
            .expect("search result");

        assert!(resp.organisations.is_empty());
        assert_eq!(resp.total_count, 0);
    }

    #[tokio::test]
    async fn client_error_is_wrapped() {
        let (handler, fake) = handler_with_fake();
        fake.search_organisations_returns(Err(ClientError::Status { status: 503 }));

        let err = handler
            .handle(SearchOrganisationsQuery {
                name: Some("Acme".into()),
                ..Default::default()
            })
            .await
            .expect_err("upstream failure");

        assert!(err.to_string().contains("error getting organisation from ODS API"));
        assert!(matches!(
            err,
            QueryError::Upstream(UpstreamError::Client(ClientError::Status { status: 503 }))
        ));
    }

    #[tokio::test]
    async fn invalid_total_is_a_parse_error() {
        for total in [Some("not-a-number"), Some("-1"), Some(""), Some(" 5 "), None] {
            let (handler, fake) = handler_with_fake();
            fake.search_organisations_returns(Ok(bundle(total, vec![])));

            let err = handler
                .handle(SearchOrganisationsQuery::default())
                .await
                .expect_err("parse error");

            assert!(matches!(err, QueryError::Parse { .. }), "{total:?}: {err:?}");
        }
    }
}

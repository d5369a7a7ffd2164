use httpmock::prelude::*;
use ods_core::{ClientError, OdsFhirClient, SearchOrganisationsRequest};
use ods_fhir_client::OdsFhirHttpClient;
use serde_json::json;
use std::time::Duration;

fn client_for(server: &MockServer) -> OdsFhirHttpClient {
    OdsFhirHttpClient::new(&server.url("/STU3"), Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn fetches_organisation_by_id() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/STU3/Organization/RR8")
                .header("accept", "application/fhir+json");
            then.status(200)
                .header("content-type", "application/fhir+json")
                .json_body(json!({
                    "resourceType": "Organization",
                    "id": "RR8",
                    "name": "LEEDS TEACHING HOSPITALS NHS TRUST",
                    "identifier": {
                        "system": "https://fhir.nhs.uk/Id/ods-organization-code",
                        "value": "RR8"
                    },
                    "active": true
                }));
        })
        .await;

    let org = client_for(&server)
        .get_organisation_by_id("RR8")
        .await
        .expect("request succeeds")
        .expect("organisation present");

    mock.assert_async().await;
    assert_eq!(org.id, "RR8");
    assert_eq!(org.name.as_deref(), Some("LEEDS TEACHING HOSPITALS NHS TRUST"));
}

#[tokio::test]
async fn not_found_means_no_record() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/STU3/Organization/NOPE");
            then.status(404);
        })
        .await;

    let result = client_for(&server)
        .get_organisation_by_id("NOPE")
        .await
        .expect("404 is not an error");

    assert!(result.is_none());
}

#[tokio::test]
async fn other_statuses_are_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/STU3/Organization/RR8");
            then.status(503);
        })
        .await;

    let err = client_for(&server)
        .get_organisation_by_id("RR8")
        .await
        .expect_err("503 is an error");

    assert_eq!(err, ClientError::Status { status: 503 });
}

#[tokio::test]
async fn undecodable_body_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/STU3/Organization/RR8");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let err = client_for(&server)
        .get_organisation_by_id("RR8")
        .await
        .expect_err("html is not FHIR");

    assert!(matches!(err, ClientError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn search_translates_filters_to_query_parameters() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/STU3/Organization")
                .query_param("name:contains", "Acme")
                .query_param("address-city:contains", "Leeds")
                .query_param("address-postalcode:contains", "LS1")
                .query_param("ods-org-role", "RO177")
                .query_param("active", "true")
                .query_param("ods-org-primaryRole", "true")
                .query_param("_count", "25")
                .query_param("_page", "2");
            then.status(200).json_body(json!({
                "resourceType": "Bundle",
                "total": 3,
                "entry": [
                    { "resource": { "resourceType": "Organization", "id": "A" } },
                    { "fullUrl": "https://example.org/Organization/B" }
                ]
            }));
        })
        .await;

    let bundle = client_for(&server)
        .search_organisations(SearchOrganisationsRequest {
            name: Some("Acme".into()),
            city: Some("Leeds".into()),
            postcode: Some("LS1".into()),
            role_code: Some("RO177".into()),
            active: Some(true),
            primary_role_only: Some(true),
            page_size: 25,
            page: 2,
        })
        .await
        .expect("bundle");

    mock.assert_async().await;
    assert_eq!(bundle.total.as_deref(), Some("3"));
    assert_eq!(bundle.entries().len(), 2);
}

#[tokio::test]
async fn search_failure_status_is_an_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/STU3/Organization");
            then.status(500);
        })
        .await;

    let err = client_for(&server)
        .search_organisations(SearchOrganisationsRequest {
            page_size: 20,
            page: 1,
            ..Default::default()
        })
        .await
        .expect_err("500 is an error");

    assert_eq!(err, ClientError::Status { status: 500 });
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/STU3/Organization/SLOW");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!({ "id": "SLOW" }));
        })
        .await;

    let client = OdsFhirHttpClient::new(&server.url("/STU3"), Duration::from_millis(50))
        .expect("client");
    let err = client
        .get_organisation_by_id("SLOW")
        .await
        .expect_err("deadline exceeded");

    assert_eq!(err, ClientError::Timeout);
}

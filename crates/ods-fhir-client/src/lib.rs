//! # ODS FHIR client
//!
//! HTTP implementation of [`ods_core::OdsFhirClient`] against the NHS ODS FHIR STU3 API.
//!
//! - `GET {base}/Organization/{id}`: 200 parses the resource, 404 means no record
//! - `GET {base}/Organization?...`: 200 parses the search bundle
//!
//! Every other status is a [`ClientError::Status`]. The configured timeout bounds each
//! request and surfaces as [`ClientError::Timeout`].

use async_trait::async_trait;
use fhir::{OrganizationBundle, OrganizationResource};
use ods_core::{ClientError, OdsFhirClient, SearchOrganisationsRequest};
use reqwest::{header, StatusCode, Url};
use std::time::Duration;

const FHIR_JSON: &str = "application/fhir+json";

#[derive(Clone, Debug)]
pub struct OdsFhirHttpClient {
    http: reqwest::Client,
    base_url: Url,
}

impl OdsFhirHttpClient {
    /// Build a client for `base_url` (for example `https://directory.spineservices.nhs.uk/STU3`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the URL is not an absolute http(s) URL or the
    /// underlying HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ClientError::Transport(format!("invalid ODS API base URL: {e}")))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::Transport(format!(
                "ODS API base URL must be http(s): {base_url}"
            )));
        }
        // Url::join replaces the last segment unless the path ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport_error)?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Transport(format!("invalid ODS API path {path}: {e}")))
    }

    async fn get(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<(StatusCode, String), ClientError> {
        tracing::debug!(url = %url, "ODS API request");

        let response = self
            .http
            .get(url)
            .header(header::ACCEPT, FHIR_JSON)
            .query(query)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        tracing::debug!(status = %status, "ODS API response");

        let body = response.text().await.map_err(transport_error)?;
        Ok((status, body))
    }
}

#[async_trait]
impl OdsFhirClient for OdsFhirHttpClient {
    async fn search_organisations(
        &self,
        request: SearchOrganisationsRequest,
    ) -> Result<OrganizationBundle, ClientError> {
        let url = self.endpoint("Organization")?;
        let (status, body) = self.get(url, &search_params(&request)).await?;

        if status != StatusCode::OK {
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }

        OrganizationBundle::from_json(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn get_organisation_by_id(
        &self,
        organisation_id: &str,
    ) -> Result<Option<OrganizationResource>, ClientError> {
        let mut url = self.endpoint("Organization")?;
        url.path_segments_mut()
            .map_err(|()| ClientError::Transport("ODS API base URL cannot take a path".into()))?
            .push(organisation_id);

        let (status, body) = self.get(url, &[]).await?;

        match status {
            StatusCode::OK => OrganizationResource::from_json(&body)
                .map(Some)
                .map_err(|e| ClientError::Decode(e.to_string())),
            StatusCode::NOT_FOUND => Ok(None),
            other => Err(ClientError::Status {
                status: other.as_u16(),
            }),
        }
    }
}

/// Upstream query parameters for a search. Absent filters are not sent.
fn search_params(request: &SearchOrganisationsRequest) -> Vec<(&'static str, String)> {
    let optional = [
        ("name:contains", request.name.clone()),
        ("address-city:contains", request.city.clone()),
        ("address-postalcode:contains", request.postcode.clone()),
        ("ods-org-role", request.role_code.clone()),
        ("active", request.active.map(|b| b.to_string())),
        ("ods-org-primaryRole", request.primary_role_only.map(|b| b.to_string())),
    ];

    let mut params: Vec<_> = optional
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect();
    params.push(("_count", request.page_size.to_string()));
    params.push(("_page", request.page.to_string()));
    params
}

fn transport_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_present_filters_are_sent() {
        let params = search_params(&SearchOrganisationsRequest {
            name: Some("Acme".into()),
            active: Some(false),
            page_size: 20,
            page: 1,
            ..Default::default()
        });

        assert_eq!(
            params,
            vec![
                ("name:contains", "Acme".to_string()),
                ("active", "false".to_string()),
                ("_count", "20".to_string()),
                ("_page", "1".to_string()),
            ]
        );
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = OdsFhirHttpClient::new("ftp://example.org", Duration::from_secs(1))
            .expect_err("ftp is not allowed");
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn base_url_keeps_its_path() {
        let client = OdsFhirHttpClient::new("https://example.org/STU3", Duration::from_secs(1))
            .expect("client");
        assert_eq!(
            client.endpoint("Organization").expect("url").as_str(),
            "https://example.org/STU3/Organization"
        );
    }
}

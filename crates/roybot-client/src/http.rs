//! reqwest-backed implementation of [`TranscoderApi`].

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};
use url::Url;

use crate::api::TranscoderApi;
use crate::endpoints::Endpoints;
use crate::error::{ClientError, Result};
use crate::models::{Environment, JobSubmission, Tenant, TenantPage, TranscodeStatus};

/// HTTP client for the transcoder and tenant directory.
#[derive(Clone)]
pub struct HttpTranscoderClient {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpTranscoderClient {
    /// Create a client with a default `reqwest::Client`.
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoints,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder, url: &Url) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::transport(url, e))?;
        debug!(endpoint = %url, status = %response.status(), "Remote call finished");
        Ok(response)
    }

    /// GET a JSON document, failing on any non-2xx status.
    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let response = self.send(self.client.get(url.clone()), url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                endpoint: url.to_string(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::transport(url, e))?;
        trace!(endpoint = %url, body = %body, "Response body");

        serde_json::from_str(&body).map_err(|e| ClientError::decode(url, e))
    }
}

#[async_trait]
impl TranscoderApi for HttpTranscoderClient {
    async fn health_check(&self) -> Result<bool> {
        let url = self.endpoints.ping()?;
        let response = self.send(self.client.get(url.clone()), &url).await?;
        Ok(response.status() == StatusCode::OK)
    }

    async fn query_status(&self) -> Result<TranscodeStatus> {
        let url = self.endpoints.status()?;
        let mut status: TranscodeStatus = self.get_json(&url).await?;

        let environment = status
            .job_mut()
            .map(|job| job.environment.clone())
            .unwrap_or_default();
        if environment.is_empty() {
            return Ok(status);
        }

        let environment = match environment.parse::<Environment>() {
            Ok(env) => env,
            Err(e) => {
                warn!(error = %e, "Skipping owner resolution");
                return Ok(status);
            }
        };

        let tenants = self.list_tenants(environment).await?;
        if let Some(job) = status.job_mut() {
            job.resolve_owner(&tenants);
            debug!(tenant = %job.tenant, owner = %job.owner, "Owner resolution done");
        }

        Ok(status)
    }

    async fn list_tenants(&self, environment: Environment) -> Result<Vec<Tenant>> {
        let url = self.endpoints.tenants(environment).clone();
        let page: TenantPage = self.get_json(&url).await?;
        debug!(environment = %environment, count = page.results.len(), "Tenants fetched");
        Ok(page.results)
    }

    async fn submit_job(&self, job: &JobSubmission) -> Result<bool> {
        let url = self.endpoints.submit()?;
        let response = self
            .send(self.client.post(url.clone()).json(job), &url)
            .await?;

        let accepted = response.status() == StatusCode::OK;
        if !accepted {
            warn!(
                tenant = %job.tenant,
                id = %job.id,
                status = %response.status(),
                "Job not accepted"
            );
        }
        Ok(accepted)
    }

    async fn query_job(&self, tenant: &str, id: &str, media_type: &str) -> Result<String> {
        let url = self.endpoints.job(tenant, id, media_type)?;
        let response = self.send(self.client.get(url.clone()), &url).await?;
        response
            .text()
            .await
            .map_err(|e| ClientError::transport(&url, e))
    }
}

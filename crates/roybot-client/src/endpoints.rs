//! Remote endpoint configuration.

use url::Url;

use crate::error::Result;
use crate::models::Environment;

/// Default transcoder base URL.
pub const DEFAULT_TRANSCODER_URL: &str = "http://transcoder.roy.solutions";

/// Default production tenant directory.
pub const DEFAULT_TENANTS_RELEASE_URL: &str =
    "https://api.roy.solutions/v1/tenants?page=1&size=100";

/// Default staging tenant directory.
pub const DEFAULT_TENANTS_STAGE_URL: &str =
    "https://api.roystaging.com/v1/tenants?page=1&size=100";

const PING_PATH: &str = "ping";
const STATUS_PATH: &str = "transcode/process";
const SUBMIT_PATH: &str = "transcode";
const JOBS_PATH: &str = "jobs";

/// Base URLs of the transcoder and of each environment's tenant directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    transcoder: Url,
    tenants_release: Url,
    tenants_stage: Url,
}

impl Endpoints {
    /// Build endpoints from URL strings.
    ///
    /// A missing trailing slash on the transcoder URL is added so paths join
    /// beneath it rather than replacing its last segment.
    pub fn new(transcoder: &str, tenants_release: &str, tenants_stage: &str) -> Result<Self> {
        let mut transcoder = Url::parse(transcoder)?;
        if !transcoder.path().ends_with('/') {
            let path = format!("{}/", transcoder.path());
            transcoder.set_path(&path);
        }

        Ok(Self {
            transcoder,
            tenants_release: Url::parse(tenants_release)?,
            tenants_stage: Url::parse(tenants_stage)?,
        })
    }

    /// The production transcoder and both Roy tenant directories.
    pub fn defaults() -> Result<Self> {
        Self::new(
            DEFAULT_TRANSCODER_URL,
            DEFAULT_TENANTS_RELEASE_URL,
            DEFAULT_TENANTS_STAGE_URL,
        )
    }

    /// Point every endpoint at one server, for local testing.
    pub fn local(base: &str) -> Result<Self> {
        let base = base.trim_end_matches('/');
        Self::new(
            base,
            &format!("{}/release/v1/tenants?page=1&size=100", base),
            &format!("{}/stage/v1/tenants?page=1&size=100", base),
        )
    }

    pub fn ping(&self) -> Result<Url> {
        Ok(self.transcoder.join(PING_PATH)?)
    }

    pub fn status(&self) -> Result<Url> {
        Ok(self.transcoder.join(STATUS_PATH)?)
    }

    pub fn submit(&self) -> Result<Url> {
        Ok(self.transcoder.join(SUBMIT_PATH)?)
    }

    /// Jobs endpoint with `tenant`, `id` and `type` query parameters.
    pub fn job(&self, tenant: &str, id: &str, media_type: &str) -> Result<Url> {
        let mut url = self.transcoder.join(JOBS_PATH)?;
        url.query_pairs_mut()
            .append_pair("tenant", tenant)
            .append_pair("id", id)
            .append_pair("type", media_type);
        Ok(url)
    }

    /// Tenant directory for an environment.
    pub fn tenants(&self, environment: Environment) -> &Url {
        match environment {
            Environment::Release => &self.tenants_release,
            Environment::Stage => &self.tenants_stage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let endpoints = Endpoints::defaults().unwrap();
        assert_eq!(
            endpoints.ping().unwrap().as_str(),
            "http://transcoder.roy.solutions/ping"
        );
        assert_eq!(
            endpoints.status().unwrap().as_str(),
            "http://transcoder.roy.solutions/transcode/process"
        );
        assert_eq!(
            endpoints.tenants(Environment::Stage).as_str(),
            DEFAULT_TENANTS_STAGE_URL
        );
        assert_eq!(
            endpoints.tenants(Environment::Release).as_str(),
            DEFAULT_TENANTS_RELEASE_URL
        );
    }

    #[test]
    fn test_base_path_is_kept() {
        let endpoints = Endpoints::new(
            "http://gateway.local/transcoder",
            DEFAULT_TENANTS_RELEASE_URL,
            DEFAULT_TENANTS_STAGE_URL,
        )
        .unwrap();
        assert_eq!(
            endpoints.submit().unwrap().as_str(),
            "http://gateway.local/transcoder/transcode"
        );
    }

    #[test]
    fn test_job_query_is_encoded() {
        let endpoints = Endpoints::defaults().unwrap();
        let url = endpoints.job("acme", "4 2", "mp4").unwrap();
        assert_eq!(
            url.as_str(),
            "http://transcoder.roy.solutions/jobs?tenant=acme&id=4+2&type=mp4"
        );
    }

    #[test]
    fn test_rejects_bad_url() {
        let err = Endpoints::new("::", DEFAULT_TENANTS_RELEASE_URL, DEFAULT_TENANTS_STAGE_URL);
        assert!(err.is_err());
    }
}

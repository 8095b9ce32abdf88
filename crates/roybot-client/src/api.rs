//! The seam between command handlers and the remote services.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Environment, JobSubmission, Tenant, TranscodeStatus};

/// Operations offered by the transcoder and tenant directory services.
///
/// Each call is a single round trip, except [`query_status`](Self::query_status)
/// which may also consult the tenant directory to resolve the job owner.
/// Nothing is retried.
#[async_trait]
pub trait TranscoderApi: Send + Sync {
    /// `true` iff the ping endpoint answers exactly 200.
    async fn health_check(&self) -> Result<bool>;

    /// Current queue size and in-flight job, with owner resolved when possible.
    async fn query_status(&self) -> Result<TranscodeStatus>;

    /// Tenants registered in an environment, in directory order.
    async fn list_tenants(&self, environment: Environment) -> Result<Vec<Tenant>>;

    /// Enqueue a transcode job. `true` iff the service answers exactly 200.
    async fn submit_job(&self, job: &JobSubmission) -> Result<bool>;

    /// Raw status text for one job, whatever the HTTP status.
    async fn query_job(&self, tenant: &str, id: &str, media_type: &str) -> Result<String>;
}

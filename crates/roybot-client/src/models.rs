//! Records exchanged with the transcoder and tenant directory services.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Deployment environment a job or tenant belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production.
    Release,
    /// Staging.
    Stage,
}

impl Environment {
    /// Wire name of the environment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Release => "release",
            Environment::Stage => "stage",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEnvironment(pub String);

impl fmt::Display for UnknownEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown environment '{}' (expected release or stage)", self.0)
    }
}

impl std::error::Error for UnknownEnvironment {}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "release" => Ok(Environment::Release),
            "stage" => Ok(Environment::Stage),
            _ => Err(UnknownEnvironment(s.to_string())),
        }
    }
}

/// A tenant registered in the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    #[serde(default)]
    pub hostname: String,
    /// Schema code, matched against a job's tenant.
    #[serde(default)]
    pub schema: String,
}

impl fmt::Display for Tenant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.hostname, self.schema)
    }
}

/// One page of the tenant directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TenantPage {
    #[serde(default)]
    pub results: Vec<Tenant>,
}

/// The job the transcoder is currently working on.
///
/// Every field defaults to empty; the service sends `{}` when idle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub tenant: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub file: String,
    #[serde(default, rename = "type")]
    pub media_type: String,
    #[serde(default)]
    pub environment: String,
    /// Tenant hostname, filled in by owner resolution.
    #[serde(default)]
    pub owner: String,
}

impl Job {
    /// Set `owner` to the hostname of the first tenant whose schema matches.
    ///
    /// Leaves `owner` untouched when nothing matches.
    pub fn resolve_owner(&mut self, tenants: &[Tenant]) {
        if let Some(tenant) = tenants.iter().find(|t| t.schema == self.tenant) {
            self.owner = tenant.hostname.clone();
        }
    }
}

/// What the transcoder reports as its current work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurrentJob {
    /// Structured job record.
    Job(Job),
    /// Free-form description sent by older transcoder builds.
    Description(String),
}

/// Snapshot of the transcoder queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscodeStatus {
    #[serde(default)]
    pub queue_size: u64,
    #[serde(default, rename = "video")]
    pub current: Option<CurrentJob>,
}

impl TranscodeStatus {
    /// The structured job, if one is in flight.
    pub fn job(&self) -> Option<&Job> {
        match &self.current {
            Some(CurrentJob::Job(job)) if !job.id.is_empty() => Some(job),
            _ => None,
        }
    }

    pub(crate) fn job_mut(&mut self) -> Option<&mut Job> {
        match &mut self.current {
            Some(CurrentJob::Job(job)) => Some(job),
            _ => None,
        }
    }

    /// Whether anything is being processed right now.
    pub fn is_processing(&self) -> bool {
        match &self.current {
            Some(CurrentJob::Job(job)) => !job.id.is_empty(),
            Some(CurrentJob::Description(text)) => !text.trim().is_empty(),
            None => false,
        }
    }
}

/// Body of a `POST /transcode` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSubmission {
    pub tenant: String,
    pub id: String,
    pub file: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub environment: Environment,
}

impl JobSubmission {
    /// Build a submission; the source path is derived from tenant, id and basename.
    pub fn new(
        tenant: impl Into<String>,
        id: impl Into<String>,
        basename: &str,
        media_type: impl Into<String>,
        environment: Environment,
    ) -> Self {
        let tenant = tenant.into();
        let id = id.into();
        let filename = format!("{}.mp4", basename);
        let file = format!("{}/contents/videos/{}/{}", tenant, id, filename);

        Self {
            tenant,
            id,
            file,
            filename,
            media_type: media_type.into(),
            environment,
        }
    }
}

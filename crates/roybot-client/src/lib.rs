//! Client for the Roy transcoder and tenant directory REST APIs.
//!
//! The transcoder accepts jobs, reports its queue and answers per-job status
//! queries. The tenant directory lists the tenants of an environment and is
//! used to turn a job's schema code into a hostname.
//!
//! # Example
//!
//! ```no_run
//! use roybot_client::{Endpoints, HttpTranscoderClient, TranscoderApi};
//!
//! # async fn run() -> roybot_client::Result<()> {
//! let client = HttpTranscoderClient::new(Endpoints::defaults()?);
//! if client.health_check().await? {
//!     let status = client.query_status().await?;
//!     println!("queue size: {}", status.queue_size);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod models;

pub use api::TranscoderApi;
pub use endpoints::Endpoints;
pub use error::{ClientError, Result};
pub use http::HttpTranscoderClient;
pub use models::{
    CurrentJob, Environment, Job, JobSubmission, Tenant, TenantPage, TranscodeStatus,
    UnknownEnvironment,
};

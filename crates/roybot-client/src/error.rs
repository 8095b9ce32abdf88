//! Error types for the remote service client.

use thiserror::Error;

/// Errors returned by the transcoder and tenant directory calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the body could not be read.
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}")]
    UnexpectedStatus {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    /// The response body was not the expected JSON.
    #[error("could not decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// An endpoint URL could not be built.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    pub(crate) fn transport(endpoint: &url::Url, source: reqwest::Error) -> Self {
        ClientError::Transport {
            endpoint: endpoint.to_string(),
            source,
        }
    }

    pub(crate) fn decode(endpoint: &url::Url, source: serde_json::Error) -> Self {
        ClientError::Decode {
            endpoint: endpoint.to_string(),
            source,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

use std::time::Duration;

use thiserror::Error;

/// Result type alias for cluster operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised while resolving credentials or talking to the API server.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Kubeconfig error: {message}")]
    Configuration { message: String },

    #[error("Failed to connect to cluster: {message}")]
    Connection { message: String },

    #[error("Failed to list pods: {source}")]
    Transport {
        #[source]
        source: kube::Error,
    },

    #[error("Listing pods timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),
}

impl ClientError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }
}

impl From<kube::Error> for ClientError {
    fn from(source: kube::Error) -> Self {
        Self::Transport { source }
    }
}

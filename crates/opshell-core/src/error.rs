//! Adapter error taxonomy.
//!
//! Argument errors (`InvalidArgument`, `InvalidSelect`) are raised before any
//! call is made. Everything that happens during a call is wrapped into an
//! output error so a batch of pipeline records keeps going.

use std::error::Error as StdError;

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Failure reported by an [`OperationInvoker`](crate::invoke::OperationInvoker).
#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    /// DNS lookup or TCP connect failed before the service answered.
    #[error("unable to reach {endpoint}: {source}")]
    Connectivity {
        endpoint: String,
        region: String,
        #[source]
        source: BoxError,
    },
    /// The service (or the transport after it connected) returned an error.
    #[error("{0}")]
    Service(BoxError),
    /// The request could not be put on the wire.
    #[error("failed to encode request: {0}")]
    Encoding(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("Invalid value for -{parameter} parameter: {message}")]
    InvalidArgument { parameter: String, message: String },

    #[error("Invalid value for -Select parameter: {0}")]
    InvalidSelect(String),

    #[error("{message}")]
    Connectivity {
        message: String,
        #[source]
        source: BoxError,
    },

    #[error("{0}")]
    Service(BoxError),

    #[error("{0}")]
    Encoding(String),
}

impl AdapterError {
    pub fn invalid_argument(parameter: &str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter: parameter.to_string(),
            message: message.into(),
        }
    }

    /// Argument errors terminate the record before any call is made.
    pub fn is_argument_error(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::InvalidSelect(_))
    }
}

impl From<InvokeError> for AdapterError {
    fn from(err: InvokeError) -> Self {
        match err {
            InvokeError::Connectivity {
                endpoint,
                region,
                source,
            } => Self::Connectivity {
                message: name_resolution_failure_message(&endpoint, &region, &source.to_string()),
                source,
            },
            InvokeError::Service(source) => Self::Service(source),
            InvokeError::Encoding(msg) => Self::Encoding(msg),
        }
    }
}

/// Actionable text for a connectivity failure.
pub fn name_resolution_failure_message(endpoint: &str, region: &str, detail: &str) -> String {
    format!(
        "Name resolution failure attempting to reach service in region {} (as supplied to the \
         --region option or from the configured default). Please check the specified region is \
         valid and that the endpoint {} is reachable from this machine. Detail: {}",
        region, endpoint, detail
    )
}

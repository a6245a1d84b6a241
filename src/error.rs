// Error taxonomy for the datadog client
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("metric type must be one of: gauge, counter (got {0:?})")]
    InvalidMetricType(String),

    #[error("event priority must be one of: normal, low (got {0:?})")]
    InvalidPriority(String),

    #[error("event alert type must be one of: info, warning, error, success (got {0:?})")]
    InvalidAlertType(String),

    #[error(
        "event source type must be one of: nagios, hudson, jenkins, user, my apps, feed, \
         chef, puppet, git, bitbucket, fabric, capistrano (got {0:?})"
    )]
    InvalidSourceType(String),

    #[error("invalid point: {0}")]
    InvalidPoint(String),

    #[error("metric {0:?} not found in series")]
    MetricNotFound(String),

    #[error("the series must contain metric data to send")]
    EmptySeries,

    #[error("metric {0:?} must contain points to send")]
    EmptyMetric(String),

    /// The API accepted the connection but rejected the payload.
    /// The message concatenates any `errors` and `warnings` arrays
    /// found in the response body.
    #[error("datadog api rejected the request with status {status}: {message}")]
    Request { status: u16, message: String },

    /// The request never produced an HTTP response.
    #[error("transport failure")]
    Transport(#[source] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

use std::num::ParseIntError;

/// Failure reported by an [`crate::ports::OdsFhirClient`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("ODS API request failed: {0}")]
    Transport(String),
    #[error("ODS API request timed out")]
    Timeout,
    #[error("ODS API responded with status {status}")]
    Status { status: u16 },
    #[error("ODS API response could not be decoded: {0}")]
    Decode(String),
}

/// Upstream failure as seen by the query handlers.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("no data received from ODS API for {0}")]
    NotFound(String),
    #[error(transparent)]
    Client(#[from] ClientError),
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("error getting organisation from ODS API: {0}")]
    Upstream(#[source] UpstreamError),
    #[error("invalid bundle total {value:?} from ODS API: {source}")]
    Parse {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl From<ClientError> for QueryError {
    fn from(err: ClientError) -> Self {
        QueryError::Upstream(UpstreamError::Client(err))
    }
}

pub type QueryResult<T> = std::result::Result<T, QueryError>;

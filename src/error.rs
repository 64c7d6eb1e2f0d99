use thiserror::Error;

/// Problems loading the process settings. Fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config line {line}: {content}")]
    InvalidLine { line: usize, content: String },

    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Any failed or malformed call to the calendar service.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {endpoint} failed with status {status}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("Failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Reasons an event query ends without results.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid symbol/s.")]
    InvalidSymbol,

    #[error("Invalid date: {0} (expected yyyy-mm-dd).")]
    InvalidDate(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

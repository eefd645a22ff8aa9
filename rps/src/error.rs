use std::io;
use thiserror::Error;

/// Failures while talking to an agent or writing the report.
///
/// Every agent-side variant carries the host as given on the command line.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid host = {host}, error = {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid host = {host}, error = {source}")]
    Request {
        host: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("invalid host = {host}, error = unexpected status {status}")]
    Status {
        host: String,
        status: reqwest::StatusCode,
    },
    #[error("invalid host = {host}, error = {source}")]
    Decode {
        host: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Host the error is about, if any.
    pub fn host(&self) -> Option<&str> {
        match self {
            Error::InvalidHost { host, .. }
            | Error::Request { host, .. }
            | Error::Status { host, .. }
            | Error::Decode { host, .. } => Some(host),
            Error::Io(_) => None,
        }
    }

    /// The reader of our output went away, e.g. `rps ... | head -1`.
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == io::ErrorKind::BrokenPipe)
    }
}

//! Minimal HTTP client helpers for requesting process tables from agents.

use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::types::ProcessTable;

/// Path every agent serves its process table on.
pub const PROC_PATH: &str = "/v1/proc";

/// Build the process-table URL for `host[:port]`.
pub fn proc_url(host: &str) -> Result<Url, Error> {
    let invalid = |source| Error::InvalidHost {
        host: host.to_string(),
        source,
    };
    if host.is_empty() {
        return Err(invalid(url::ParseError::EmptyHost));
    }
    // Otherwise these end up in the path or userinfo.
    if host.contains(['/', '?', '#', '@']) {
        return Err(invalid(url::ParseError::InvalidDomainCharacter));
    }
    Url::parse(&format!("http://{host}{PROC_PATH}")).map_err(invalid)
}

/// Shared HTTP client; cheap to clone, one connection pool per process.
#[derive(Debug, Clone)]
pub struct AgentClient {
    http: reqwest::Client,
}

impl AgentClient {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rps/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    // GET /v1/proc and decode the body
    pub async fn fetch(&self, host: &str) -> Result<ProcessTable, Error> {
        let url = proc_url(host)?;
        debug!(%url, "requesting process table");

        let request_err = |source| Error::Request {
            host: host.to_string(),
            source,
        };
        let resp = self.http.get(url).send().await.map_err(request_err)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                host: host.to_string(),
                status,
            });
        }
        let body = resp.bytes().await.map_err(request_err)?;
        let table: ProcessTable = serde_json::from_slice(&body).map_err(|source| Error::Decode {
            host: host.to_string(),
            source,
        })?;
        debug!(host, procs = table.procs.len(), "process table received");
        Ok(table)
    }
}

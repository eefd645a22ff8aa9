//! Report loop: fetch each host's process table and print its rows.
//!
//! Hosts are fetched concurrently but printed strictly in the order they were
//! requested, so the output is identical from run to run.

use std::fmt::Display;
use std::future::Future;
use std::io::Write;

use chrono::{DateTime, TimeZone};
use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::error::Error;
use crate::ps::{PsRow, HEADER};
use crate::types::ProcessTable;

/// Default number of agent requests in flight at once.
pub const DEFAULT_JOBS: usize = 4;

/// Split a `--hosts` value on commas, ignoring blanks.
pub fn parse_hosts(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect()
}

/// Write every process of one host's table, one line each.
pub fn write_table<W, Tz>(
    out: &mut W,
    host: &str,
    table: &ProcessTable,
    now: &DateTime<Tz>,
) -> std::io::Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    for p in &table.procs {
        writeln!(out, "{}", PsRow::build(host, p, now))?;
    }
    Ok(())
}

/// Print the header, then each host's rows in request order.
///
/// Stops at the first host (in request order) whose fetch fails and returns
/// that error; rows of earlier hosts are already written and flushed.
/// Returns the number of rows written.
pub async fn run<W, Tz, F, Fut>(
    out: &mut W,
    hosts: &[String],
    jobs: usize,
    now: &DateTime<Tz>,
    mut fetch: F,
) -> Result<usize, Error>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<ProcessTable, Error>>,
{
    writeln!(out, "{HEADER}")?;

    let mut tables = stream::iter(hosts.iter().cloned())
        .map(|host| {
            let pending = fetch(host.clone());
            async move { (host, pending.await) }
        })
        .buffered(jobs.max(1));

    let mut rows = 0;
    while let Some((host, res)) = tables.next().await {
        let table = match res {
            Ok(t) => t,
            Err(e) => {
                warn!(host = %host, "agent request failed");
                out.flush()?;
                return Err(e);
            }
        };
        write_table(out, &host, &table, now)?;
        out.flush()?;
        info!(host = %host, rows = table.procs.len(), "host rendered");
        rows += table.procs.len();
    }
    Ok(rows)
}

//! One report line per process, laid out under [`HEADER`].

use chrono::{DateTime, TimeZone};
use std::fmt;

use crate::ps::{stat, text, time, tty};
use crate::types::ProcessSnapshot;

/// Column header. Downstream scrapers match on it, so it never changes.
pub const HEADER: &str =
    "HOST            USER       PID %CPU %MEM    VSZ    RSS TTY      STAT START   TIME COMMAND";

/// Every column of one row, already rendered to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PsRow {
    pub host: String,
    pub user: String,
    pub pid: u32,
    pub cpu: String,
    pub mem: String,
    pub vsz: u64,
    pub rss: u64,
    pub tty: String,
    pub stat: String,
    pub start: String,
    pub time: String,
    pub command: String,
}

/// Host column label: everything before the first `:`.
pub fn host_label(host: &str) -> &str {
    host.split(':').next().unwrap_or(host)
}

impl PsRow {
    /// Derive all columns of `p`, judging START against `now`.
    pub fn build<Tz>(host: &str, p: &ProcessSnapshot, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        Self {
            host: host_label(host).to_string(),
            user: text::format_user(&p.user_name),
            pid: p.pid,
            cpu: p.cpu_percent.clone(),
            mem: p.mem_percent.clone(),
            vsz: p.virtual_size_bytes,
            rss: p.resident_set_bytes,
            tty: tty::resolve(p.tty_device_number),
            stat: stat::compose(p.into()),
            start: time::format_start(p.start_time_unix, now),
            time: time::format_elapsed(p.cpu_time_unix),
            command: text::format_command(&p.command_args, &p.process_name),
        }
    }
}

impl fmt::Display for PsRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<15} {:<8} {:>6} {:>3}  {:>3} {:>6} {:>6} {:<8} {:<4} {:<7} {:>5} {}",
            self.host,
            self.user,
            self.pid,
            self.cpu,
            self.mem,
            self.vsz,
            self.rss,
            self.tty,
            self.stat,
            self.start,
            self.time,
            self.command
        )
    }
}

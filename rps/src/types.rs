//! Types that mirror the agent's JSON schema (`GET /v1/proc`).

use serde::{Deserialize, Deserializer, Serialize};

/// One OS process as reported by a remote agent. Numeric fields are taken
/// straight from the kernel's process table; percentages arrive pre-formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSnapshot {
    pub pid: u32,
    pub user_name: String,
    pub cpu_percent: String,
    pub mem_percent: String,
    pub virtual_size_bytes: u64,
    pub resident_set_bytes: u64,
    // packed major/minor, 0 when there is no controlling terminal
    pub tty_device_number: i64,
    pub process_state: char,
    pub niceness: i64,
    pub memory_locked: bool,
    pub session_id: i64,
    pub thread_group_id: i64,
    pub num_threads: i64,
    pub process_group_id: i64,
    pub terminal_foreground_group_id: i64,
    pub start_time_unix: i64,
    pub cpu_time_unix: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub command_args: Vec<String>,
    pub process_name: String,
}

/// Whole response body of one agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessTable {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub procs: Vec<ProcessSnapshot>,
}

// Agents written in languages with nil slices send `null` for empty lists.
fn null_as_empty<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(de)?.unwrap_or_default())
}

//! rps: `ps` for remote hosts.
//!
//! Agents expose their host's process table as JSON; this crate fetches those
//! tables and renders them in the classic `ps aux` layout.

pub mod agent;
pub mod error;
pub mod profiles;
pub mod ps;
pub mod report;
pub mod types;

pub use error::Error;

//! Process record renderer: turns agent snapshots into `ps`-style columns.
//!
//! Everything here is pure; the only clock input is the `now` handed to
//! [`PsRow::build`].

pub mod row;
pub mod stat;
pub mod text;
pub mod time;
pub mod tty;

pub use row::{host_label, PsRow, HEADER};

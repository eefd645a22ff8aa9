//! STAT column: the one-letter scheduler state plus BSD-style modifier flags.

use crate::types::ProcessSnapshot;

/// The inputs the STAT column depends on, borrowed from a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatInputs {
    pub state: char,
    pub niceness: i64,
    pub memory_locked: bool,
    pub session_id: i64,
    pub thread_group_id: i64,
    pub num_threads: i64,
    pub process_group_id: i64,
    pub terminal_foreground_group_id: i64,
}

impl From<&ProcessSnapshot> for StatInputs {
    fn from(p: &ProcessSnapshot) -> Self {
        Self {
            state: p.process_state,
            niceness: p.niceness,
            memory_locked: p.memory_locked,
            session_id: p.session_id,
            thread_group_id: p.thread_group_id,
            num_threads: p.num_threads,
            process_group_id: p.process_group_id,
            terminal_foreground_group_id: p.terminal_foreground_group_id,
        }
    }
}

/// Compose the STAT string.
///
/// Flags follow the state letter in a fixed order: `<` high priority,
/// `N` low priority, `L` pages locked, `s` session leader,
/// `l` multi-threaded, `+` in the terminal's foreground group.
pub fn compose(s: StatInputs) -> String {
    let mut out = String::with_capacity(7);
    out.push(s.state);
    if s.niceness < 0 {
        out.push('<');
    }
    if s.niceness > 0 {
        out.push('N');
    }
    if s.memory_locked {
        out.push('L');
    }
    if s.session_id == s.thread_group_id {
        out.push('s');
    }
    if s.num_threads > 1 {
        out.push('l');
    }
    if s.process_group_id == s.terminal_foreground_group_id {
        out.push('+');
    }
    out
}

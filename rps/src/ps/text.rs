//! USER and COMMAND columns.

/// Width of the USER column.
pub const USER_WIDTH: usize = 8;

/// Names longer than the USER column keep their first 7 characters and are
/// tagged with `+`.
pub fn format_user(name: &str) -> String {
    if name.chars().count() > USER_WIDTH {
        let mut s: String = name.chars().take(USER_WIDTH - 1).collect();
        s.push('+');
        s
    } else {
        name.to_string()
    }
}

/// Full argv joined by spaces; kernel threads and zombies have no argv, so
/// they show their short name in brackets instead.
pub fn format_command(args: &[String], name: &str) -> String {
    let cmd = args.join(" ");
    if cmd.is_empty() {
        format!("[{name}]")
    } else {
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_users_unchanged() {
        assert_eq!(format_user("root"), "root");
        assert_eq!(format_user("postgres"), "postgres");
        assert_eq!(format_user(""), "");
    }

    #[test]
    fn long_users_truncated() {
        assert_eq!(format_user("administrator"), "adminis+");
        assert_eq!(format_user("systemd-network"), "systemd+");
        assert_eq!(format_user("nineteen9"), "ninetee+");
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(format_user("ユーザーアカウント名"), "ユーザーアカウ+");
    }

    #[test]
    fn command_joins_args() {
        let args: Vec<String> = ["/bin/sh", "-c", "sleep 5"].map(String::from).to_vec();
        assert_eq!(format_command(&args, "sh"), "/bin/sh -c sleep 5");
    }

    #[test]
    fn command_falls_back_to_name() {
        assert_eq!(format_command(&[], "kworker"), "[kworker]");
        assert_eq!(format_command(&[String::new()], "kworker"), "[kworker]");
    }
}

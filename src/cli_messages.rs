//! CLI command messaging
//!
//! Status lines for one-shot commands. They go to stderr so that `snapshot`
//! can write HTML to stdout.

const INFO: &str = "\x1b[1;33m[INFO]\x1b[0m";
const WARN: &str = "\x1b[1;91m[WARN]\x1b[0m";
const ERROR: &str = "\x1b[1;31m[ERROR]\x1b[0m";
const SUCCESS: &str = "\x1b[1;32m[SUCCESS]\x1b[0m";

fn print_tagged(tag: &str, title: &str, details: &str) {
    if details.is_empty() {
        eprintln!("{} {}", tag, title);
    } else {
        eprintln!("{} {}\t {}", tag, title, details);
    }
}

pub fn print_info(title: &str, details: &str) {
    print_tagged(INFO, title, details);
}

pub fn print_warn(title: &str, details: &str) {
    print_tagged(WARN, title, details);
}

/// Details, when present, go on their own line.
pub fn print_error(title: &str, details: Option<&str>) {
    eprintln!("{} {}", ERROR, title);
    if let Some(details) = details {
        eprintln!("{} Details: {}", ERROR, details);
    }
}

pub fn print_success(title: &str, details: &str) {
    print_tagged(SUCCESS, title, details);
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_info($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_warn($title, &format!($($details)*))
    };
}

#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_error($title, None)
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_error($title, Some($details))
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_success($title, &format!($($details)*))
    };
}

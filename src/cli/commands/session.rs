use clap::{Arg, Command};
use std::path::PathBuf;

pub const ARG_API_BASE_URL: &str = "api-base-url";
pub const ARG_SESSION_DIR: &str = "session-dir";
pub const ARG_TIMEOUT: &str = "timeout";

/// Identity service and session file options, accepted before or after the
/// subcommand.
#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_BASE_URL)
                .short('u')
                .long(ARG_API_BASE_URL)
                .help("Identity service base URL, example: https://auth.tld/api")
                .env("AUTHGATE_API_BASE_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_DIR)
                .long(ARG_SESSION_DIR)
                .help("Directory holding session.json (default: ~/.authgate)")
                .env("AUTHGATE_SESSION_DIR")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds")
                .default_value("10")
                .env("AUTHGATE_TIMEOUT")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
}

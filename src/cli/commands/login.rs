use clap::{Arg, Command};

pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";

/// Credentials for one non-interactive attempt. Without them the form
/// prompts on the terminal.
#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_EMAIL)
                .long(ARG_EMAIL)
                .help("E-mail to sign in with")
                .env("AUTHGATE_EMAIL")
                .requires(ARG_PASSWORD),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long(ARG_PASSWORD)
                .help("Password to sign in with")
                .env("AUTHGATE_PASSWORD")
                .hide_env_values(true)
                .requires(ARG_EMAIL),
        )
}

pub mod logging;
pub mod login;
pub mod session;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const ARG_ROUTE: &str = "route";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("authgate")
        .about("Sign in to an identity service and open protected pages")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(login::with_args(
            Command::new("open").about("Open a route, signing in when the guard asks for it").arg(
                Arg::new(ARG_ROUTE)
                    .help("Route to open: / or /login")
                    .default_value("/"),
            ),
        ))
        .subcommand(login::with_args(
            Command::new("login").about("Show the login form, then the protected page"),
        ))
        .subcommand(
            Command::new("whoami").about("Validate the stored session without prompting"),
        )
        .subcommand(Command::new("logout").about("Revoke and forget the stored session"));

    let command = session::with_args(command);
    logging::with_args(command)
}

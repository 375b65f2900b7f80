use crate::{
    app::routes::Route,
    auth::GuardState,
    cli::globals::GlobalArgs,
};
use anyhow::{Result, bail};
use std::io::{self, Write};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
}

/// Run the guard against the stored session and print who it belongs to.
///
/// # Errors
/// Returns an error when there is no valid session.
pub async fn execute(args: Args) -> Result<()> {
    let app = args.globals.app(Route::Home)?;

    let GuardState::Authorized(user) = app.whoami().await else {
        bail!("not signed in");
    };

    let mut out = io::stdout().lock();
    writeln!(out, "{}", user.display_name())?;
    if let Some(email) = user.email.as_deref() {
        writeln!(out, "{email}")?;
    }
    Ok(())
}

use crate::{
    app::{
        Outcome,
        form::{ScriptedInput, TerminalInput},
        routes::Route,
    },
    cli::globals::GlobalArgs,
};
use anyhow::{Result, anyhow};
use secrecy::SecretString;
use std::io;
use tracing::info;

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub route: Route,
    /// One non-interactive attempt; `None` prompts on the terminal.
    pub login: Option<(String, SecretString)>,
}

/// Render `route` and follow navigations until the protected page shows.
///
/// # Errors
/// Returns an error if the run ends without an authorized session, or if
/// input or output fails.
pub async fn execute(args: Args) -> Result<()> {
    let app = args.globals.app(args.route)?;
    let mut out = io::stdout();

    let outcome = match args.login {
        Some((email, password)) => {
            let mut input = ScriptedInput::new().with_secret(email, password);
            app.run(&mut input, &mut out).await?
        }
        None => app.run(&mut TerminalInput, &mut out).await?,
    };

    match outcome {
        Outcome::Authorized(user) => {
            info!(user = %user.display_name(), "protected page reached");
            Ok(())
        }
        Outcome::SignedOut => Err(anyhow!("not signed in")),
    }
}

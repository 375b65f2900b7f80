use crate::{app::routes::Route, cli::globals::GlobalArgs};
use anyhow::Result;
use std::io::{self, Write};

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
}

/// # Errors
/// Returns an error if the session file cannot be cleared.
pub async fn execute(args: Args) -> Result<()> {
    let app = args.globals.app(Route::Home)?;
    app.logout().await?;
    writeln!(io::stdout(), "Signed out")?;
    Ok(())
}

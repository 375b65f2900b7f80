pub mod logout;
pub mod open;
pub mod whoami;

// Single dispatch point for `Action`, kept apart so this file only lists variants.
mod run;

#[derive(Debug)]
pub enum Action {
    Open(open::Args),
    Whoami(whoami::Args),
    Logout(logout::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails or the protected page was not reached.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
